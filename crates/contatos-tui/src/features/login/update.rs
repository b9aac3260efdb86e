//! Login reducer.

use contatos_core::auth::AuthError;
use contatos_core::session::Session;
use crossterm::event::{KeyCode, KeyEvent};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use super::LoginFocus;
use crate::effects::UiEffect;
use crate::features::contacts;
use crate::state::AppState;

pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    let login = &mut app.login;
    match key.code {
        KeyCode::Tab | KeyCode::Down => {
            login.focus = login.focus.next();
            vec![]
        }
        KeyCode::BackTab | KeyCode::Up => {
            login.focus = login.focus.prev();
            vec![]
        }
        // Enter on the email field moves on; on the password field or button it submits.
        KeyCode::Enter => match login.focus {
            LoginFocus::Email => {
                login.focus = LoginFocus::Password;
                vec![]
            }
            LoginFocus::Password | LoginFocus::Submit => submit(app),
        },
        _ => {
            if let Some(field) = login.focused_field_mut() {
                field.input(key);
            }
            vec![]
        }
    }
}

pub fn handle_paste(app: &mut AppState, text: &str) {
    if let Some(field) = app.login.focused_field_mut() {
        field.insert_str(text);
    }
}

/// Starts a sign-in with the form values as typed.
///
/// Ignored while a sign-in is already in flight.
pub fn submit(app: &mut AppState) -> Vec<UiEffect> {
    if app.tasks.sign_in.is_running() {
        debug!("Sign-in already in progress");
        return vec![];
    }

    let task = app.task_seq.next_id();
    let cancel = app.scope.child_token();
    app.tasks.sign_in.begin(task, cancel.clone());
    app.login.message.clear();

    vec![UiEffect::SignIn {
        task,
        cancel,
        email: app.login.email.value().to_string(),
        password: app.login.password.value().to_string(),
    }]
}

pub fn handle_sign_in_result(
    app: &mut AppState,
    result: Result<Session, AuthError>,
) -> Vec<UiEffect> {
    match result {
        Ok(session) => {
            // The switch happens once.
            if app.session.is_some() {
                return vec![];
            }
            info!(user_id = %session.user_id, "Login succeeded");
            app.login.message.clear();
            app.login.password.clear();
            app.session = Some(session);

            let login_scope = std::mem::replace(&mut app.scope, CancellationToken::new());
            let mut effects = vec![UiEffect::CancelScope { token: login_scope }];
            effects.extend(contacts::start_fetch(app));
            effects
        }
        Err(err) => {
            error!(detail = err.detail(), "Login failed");
            let message = err.user_message();
            app.toasts.error(message.clone());
            app.login.message = message;
            vec![]
        }
    }
}
