//! Effect handlers for the TUI runtime.
//!
//! Pure async functions that call the backend and return the `UiEvent` the
//! reducer should see. They never touch `AppState`.

use contatos_core::backend::Backend;
use contatos_core::models::NewContact;
use contatos_core::session::Session;
use tracing::debug;

use crate::events::UiEvent;

pub async fn sign_in(backend: Backend, email: String, password: String) -> UiEvent {
    debug!("Signing in");
    UiEvent::SignInFinished(backend.sign_in(&email, &password).await)
}

pub async fn fetch_contacts(backend: Backend, session: Session) -> UiEvent {
    let outcome = backend.list_contacts(&session).await;
    UiEvent::ContactsFetched {
        refreshed: outcome.refreshed,
        result: outcome.result,
    }
}

pub async fn create_contact(backend: Backend, session: Session, contact: NewContact) -> UiEvent {
    let outcome = backend.create_contact(&session, &contact).await;
    UiEvent::ContactCreated {
        refreshed: outcome.refreshed,
        result: outcome.result,
    }
}

pub async fn delete_contact(backend: Backend, session: Session, id: String) -> UiEvent {
    let outcome = backend.delete_contact(&session, &id).await;
    UiEvent::ContactDeleted {
        id,
        refreshed: outcome.refreshed,
        result: outcome.result,
    }
}
