//! Contacts screen view.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::ContactsFocus;
use crate::common::render_utils::{
    ACCENT, MUTED, render_button, render_panel, render_text_field, spinner,
};
use crate::common::text::truncate_with_ellipsis;
use crate::state::AppState;

const TITLE: &str = "App Firebase Firestore";
const DELETE_LABEL: &str = "[ Deletar ]";

pub fn render_contacts(app: &AppState, frame: &mut Frame, area: Rect) {
    let contacts = &app.contacts;
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // title
            Constraint::Length(1),
            Constraint::Length(2), // name
            Constraint::Length(2), // phone
            Constraint::Length(1),
            Constraint::Length(1), // button
            Constraint::Length(1),
            Constraint::Min(3), // list
        ])
        .split(area);

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            TITLE,
            Style::default().add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center),
        rows[0],
    );

    render_text_field(
        frame,
        rows[2],
        &contacts.name,
        contacts.focus == ContactsFocus::Name,
    );
    render_text_field(
        frame,
        rows[3],
        &contacts.phone,
        contacts.focus == ContactsFocus::Phone,
    );
    render_button(
        frame,
        rows[5],
        "Cadastrar",
        contacts.focus == ContactsFocus::Submit,
        app.tasks.create_contact.is_running(),
    );

    render_list(app, frame, rows[7]);
}

fn render_list(app: &AppState, frame: &mut Frame, area: Rect) {
    let contacts = &app.contacts;
    let focused = contacts.focus == ContactsFocus::List;
    let border = if focused { ACCENT } else { MUTED };

    let title = if app.tasks.fetch_contacts.is_running() {
        format!("Contatos {}", spinner(app.spinner_frame))
    } else {
        format!("Contatos ({})", contacts.contacts().len())
    };
    let inner = render_panel(frame, area, &title, border);
    if inner.height == 0 {
        return;
    }

    let items = contacts.contacts();
    if items.is_empty() {
        let text = if app.tasks.fetch_contacts.is_running() {
            "Carregando..."
        } else {
            "Nenhum contato."
        };
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(text, Style::default().fg(MUTED)))),
            inner,
        );
        return;
    }

    // Name and phone split the row evenly; the delete action takes the rest.
    let button_width = DELETE_LABEL.len();
    let column = (inner.width as usize).saturating_sub(button_width + 2) / 2;

    let visible = inner.height as usize;
    let offset = (contacts.selected + 1).saturating_sub(visible);

    let deleting = app.tasks.delete_contact.is_running();
    let lines: Vec<Line> = items
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible)
        .map(|(idx, contact)| {
            let is_selected = focused && idx == contacts.selected;
            let base = if is_selected {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            };
            let button_style = if deleting && is_selected {
                Style::default().fg(MUTED)
            } else {
                Style::default().fg(Color::Red)
            };
            Line::from(vec![
                Span::styled(
                    format!(
                        "{:<width$} ",
                        truncate_with_ellipsis(&contact.name, column),
                        width = column
                    ),
                    base,
                ),
                Span::styled(
                    format!(
                        "{:<width$} ",
                        truncate_with_ellipsis(&contact.phone, column),
                        width = column
                    ),
                    base,
                ),
                Span::styled(DELETE_LABEL, button_style),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}
