//! Application state composition.
//!
//! ```text
//! AppState
//! ├── session: Option<Session>  (drives the screen switch)
//! ├── login: LoginState          (email/password form)
//! ├── contacts: ContactsState    (contact form + observable list)
//! ├── task_seq / tasks           (async task lifecycle)
//! ├── toasts                     (transient notifications)
//! └── scope                      (cancellation token of the active screen)
//! ```
//!
//! State is mutated only by the reducer on the event-loop thread.

use contatos_core::session::Session;
use tokio_util::sync::CancellationToken;

use crate::common::{TaskSeq, Tasks, Toasts};
use crate::features::contacts::ContactsState;
use crate::features::login::LoginState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Contacts,
}

#[derive(Debug)]
pub struct AppState {
    pub should_quit: bool,
    /// Present once sign-in succeeded. Never persisted.
    pub session: Option<Session>,
    pub login: LoginState,
    pub contacts: ContactsState,
    pub task_seq: TaskSeq,
    pub tasks: Tasks,
    pub toasts: Toasts,
    /// Parent token for tasks issued by the current screen.
    pub scope: CancellationToken,
    /// Spinner animation frame counter.
    pub spinner_frame: usize,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            should_quit: false,
            session: None,
            login: LoginState::default(),
            contacts: ContactsState::default(),
            task_seq: TaskSeq::default(),
            tasks: Tasks::default(),
            toasts: Toasts::default(),
            scope: CancellationToken::new(),
            spinner_frame: 0,
        }
    }

    /// The screen follows the session: no session, login; session, contacts.
    pub fn screen(&self) -> Screen {
        if self.session.is_some() {
            Screen::Contacts
        } else {
            Screen::Login
        }
    }

    /// Applies a session handed back by a store call after a refresh.
    pub fn apply_refreshed(&mut self, refreshed: Option<Session>) {
        if let Some(session) = refreshed
            && self.session.is_some()
        {
            self.session = Some(session);
        }
    }
}
