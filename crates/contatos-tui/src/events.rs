//! UI event types.
//!
//! Everything the reducer reacts to: terminal input, timer ticks, and the
//! results of backend tasks delivered through the runtime inbox.

use contatos_core::auth::AuthError;
use contatos_core::models::Contact;
use contatos_core::session::Session;
use contatos_core::store::StoreError;
use crossterm::event::Event;

use crate::common::{TaskCompleted, TaskKind};

#[derive(Debug)]
pub enum UiEvent {
    /// Timer tick (toast expiry, spinner animation).
    Tick,

    /// Raw terminal input.
    Terminal(Event),

    /// A spawned task finished. Dropped unless it is still the active task.
    TaskCompleted {
        kind: TaskKind,
        completed: TaskCompleted<Box<UiEvent>>,
    },

    SignInFinished(Result<Session, AuthError>),

    ContactsFetched {
        refreshed: Option<Session>,
        result: Result<Vec<Contact>, StoreError>,
    },

    ContactCreated {
        refreshed: Option<Session>,
        result: Result<String, StoreError>,
    },

    ContactDeleted {
        id: String,
        refreshed: Option<Session>,
        result: Result<(), StoreError>,
    },
}
