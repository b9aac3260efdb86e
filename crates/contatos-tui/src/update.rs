//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.

use std::time::Instant;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::debug;

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::features::{contacts, login};
use crate::state::{AppState, Screen};

/// The main reducer function.
///
/// Takes the current state and an event, mutates state, and returns effects
/// for the runtime to execute.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            app.spinner_frame = app.spinner_frame.wrapping_add(1);
            app.toasts.expire(Instant::now());
            vec![]
        }
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
        UiEvent::TaskCompleted { kind, completed } => {
            if app.tasks.state_mut(kind).finish_if_active(completed.id) {
                update(app, *completed.result)
            } else {
                debug!(?kind, "Dropping stale task result");
                vec![]
            }
        }
        UiEvent::SignInFinished(result) => login::handle_sign_in_result(app, result),
        UiEvent::ContactsFetched { refreshed, result } => {
            contacts::handle_fetched(app, refreshed, result)
        }
        UiEvent::ContactCreated { refreshed, result } => {
            contacts::handle_created(app, refreshed, result)
        }
        UiEvent::ContactDeleted {
            id,
            refreshed,
            result,
        } => contacts::handle_deleted(app, &id, refreshed, result),
    }
}

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key(app, key),
        Event::Paste(text) => {
            match app.screen() {
                Screen::Login => login::handle_paste(app, &text),
                Screen::Contacts => contacts::handle_paste(app, &text),
            }
            vec![]
        }
        _ => vec![],
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if key.code == KeyCode::Esc || (ctrl && key.code == KeyCode::Char('c')) {
        return vec![
            UiEffect::CancelScope {
                token: app.scope.clone(),
            },
            UiEffect::Quit,
        ];
    }

    match app.screen() {
        Screen::Login => login::handle_key(app, key),
        Screen::Contacts => contacts::handle_key(app, key),
    }
}
