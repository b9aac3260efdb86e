//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They represent I/O and task spawning only (no direct UI mutations).
//!
//! ## Cancellation
//!
//! Every backend task runs under a child of the active screen's token.
//! The reducer decides when to cancel (`CancelTask`, `CancelScope`); the
//! runtime only calls `cancel()`.

use contatos_core::models::NewContact;
use contatos_core::session::Session;
use tokio_util::sync::CancellationToken;

use crate::common::{TaskId, TaskKind};

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    SignIn {
        task: TaskId,
        cancel: CancellationToken,
        email: String,
        password: String,
    },

    FetchContacts {
        task: TaskId,
        cancel: CancellationToken,
        session: Session,
    },

    CreateContact {
        task: TaskId,
        cancel: CancellationToken,
        session: Session,
        contact: NewContact,
    },

    DeleteContact {
        task: TaskId,
        cancel: CancellationToken,
        session: Session,
        id: String,
    },

    /// Cancel one in-progress task.
    CancelTask {
        kind: TaskKind,
        token: Option<CancellationToken>,
    },

    /// Cancel every task issued by a screen that is going away.
    CancelScope { token: CancellationToken },
}
