//! Pure view/render functions for the TUI.
//!
//! Functions here take `&AppState`, draw to a ratatui Frame, and never
//! mutate state or return effects.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use unicode_width::UnicodeWidthStr;

use crate::common::render_utils::{ACCENT, InputHint, render_hints};
use crate::common::Toast;
use crate::features::{contacts, login};
use crate::state::{AppState, Screen};

/// Height of the hints line at the bottom.
const HINTS_HEIGHT: u16 = 1;

/// Maximum toast width (columns, borders included).
const TOAST_MAX_WIDTH: u16 = 48;

const LOGIN_HINTS: &[InputHint<'static>] = &[
    InputHint {
        key: "Tab",
        action: "next field",
    },
    InputHint {
        key: "Enter",
        action: "sign in",
    },
    InputHint {
        key: "Esc",
        action: "quit",
    },
];

const CONTACTS_HINTS: &[InputHint<'static>] = &[
    InputHint {
        key: "Tab",
        action: "next",
    },
    InputHint {
        key: "Enter",
        action: "save / delete",
    },
    InputHint {
        key: "F5",
        action: "reload",
    },
    InputHint {
        key: "Esc",
        action: "quit",
    },
];

/// Renders the entire TUI to the frame.
pub fn render(app: &AppState, frame: &mut Frame) {
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(HINTS_HEIGHT)])
        .split(area);
    let body = Rect::new(
        chunks[0].x + 1,
        chunks[0].y,
        chunks[0].width.saturating_sub(2),
        chunks[0].height,
    );

    let hints = match app.screen() {
        Screen::Login => {
            login::render_login(app, frame, body);
            LOGIN_HINTS
        }
        Screen::Contacts => {
            contacts::render_contacts(app, frame, body);
            CONTACTS_HINTS
        }
    };
    render_hints(frame, chunks[1], hints, ACCENT);

    render_toasts(app, frame, chunks[0]);
}

/// Stacks toasts in the bottom-right corner, newest at the bottom.
fn render_toasts(app: &AppState, frame: &mut Frame, area: Rect) {
    let width = TOAST_MAX_WIDTH.min(area.width);
    let mut bottom = area.y + area.height;

    for toast in app.toasts.iter().collect::<Vec<_>>().into_iter().rev() {
        let height = toast_height(toast, width);
        if bottom < area.y + height {
            break;
        }
        bottom -= height;
        let rect = Rect::new(area.x + area.width - width, bottom, width, height);
        render_toast(frame, rect, toast);
    }
}

fn toast_height(toast: &Toast, width: u16) -> u16 {
    let text_width = usize::from(width.saturating_sub(4)).max(1);
    let lines = toast.message.width().div_ceil(text_width).max(1);
    u16::try_from(lines).unwrap_or(u16::MAX).saturating_add(2)
}

fn render_toast(frame: &mut Frame, area: Rect, toast: &Toast) {
    frame.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));
    let para = Paragraph::new(Line::from(Span::raw(toast.message.as_str())))
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(para, area);
}
