//! Login screen view.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use super::LoginFocus;
use crate::common::render_utils::{
    ACCENT, centered_area, render_button, render_panel, render_text_field, spinner,
};
use crate::state::AppState;

const PANEL_WIDTH: u16 = 56;
const PANEL_HEIGHT: u16 = 13;

pub fn render_login(app: &AppState, frame: &mut Frame, area: Rect) {
    let login = &app.login;
    let panel = centered_area(area, PANEL_WIDTH, PANEL_HEIGHT);
    let inner = render_panel(frame, panel, "Login", ACCENT);
    let inner = Rect::new(
        inner.x + 1,
        inner.y,
        inner.width.saturating_sub(2),
        inner.height,
    );

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // email
            Constraint::Length(1),
            Constraint::Length(2), // password
            Constraint::Length(1),
            Constraint::Length(1), // button
            Constraint::Length(1),
            Constraint::Min(1), // message
        ])
        .split(inner);

    render_text_field(frame, rows[0], &login.email, login.focus == LoginFocus::Email);
    render_text_field(
        frame,
        rows[2],
        &login.password,
        login.focus == LoginFocus::Password,
    );

    let busy = app.tasks.sign_in.is_running();
    render_button(
        frame,
        rows[4],
        "Entrar",
        login.focus == LoginFocus::Submit,
        busy,
    );

    let message = if busy {
        Line::from(Span::styled(
            format!("{} Entrando...", spinner(app.spinner_frame)),
            Style::default().fg(Color::Yellow),
        ))
    } else {
        Line::from(Span::styled(
            login.message.as_str(),
            Style::default().fg(Color::Red),
        ))
    };
    frame.render_widget(Paragraph::new(message).wrap(Wrap { trim: true }), rows[6]);
}
