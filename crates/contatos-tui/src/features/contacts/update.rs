//! Contacts reducer.

use contatos_core::models::{Contact, NewContact};
use contatos_core::session::Session;
use contatos_core::store::StoreError;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, info, warn};

use super::ContactsFocus;
use crate::common::TaskKind;
use crate::effects::UiEffect;
use crate::state::AppState;

pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if key.code == KeyCode::F(5) || (ctrl && key.code == KeyCode::Char('r')) {
        return start_fetch(app);
    }

    let contacts = &mut app.contacts;
    match (contacts.focus, key.code) {
        (_, KeyCode::Tab) => {
            contacts.focus = contacts.focus.next();
            vec![]
        }
        (_, KeyCode::BackTab) => {
            contacts.focus = contacts.focus.prev();
            vec![]
        }

        (ContactsFocus::List, KeyCode::Up) => {
            if contacts.selected == 0 {
                contacts.focus = ContactsFocus::Submit;
            } else {
                contacts.select_prev();
            }
            vec![]
        }
        (ContactsFocus::List, KeyCode::Down) => {
            contacts.select_next();
            vec![]
        }
        (ContactsFocus::List, KeyCode::Enter | KeyCode::Delete) => delete_selected(app),
        (ContactsFocus::List, _) => vec![],

        (_, KeyCode::Down) => {
            contacts.focus = contacts.focus.next();
            vec![]
        }
        (_, KeyCode::Up) => {
            contacts.focus = contacts.focus.prev();
            vec![]
        }
        (ContactsFocus::Name, KeyCode::Enter) => {
            contacts.focus = ContactsFocus::Phone;
            vec![]
        }
        (ContactsFocus::Phone | ContactsFocus::Submit, KeyCode::Enter) => submit_create(app),
        _ => {
            if let Some(field) = contacts.focused_field_mut() {
                field.input(key);
            }
            vec![]
        }
    }
}

pub fn handle_paste(app: &mut AppState, text: &str) {
    if let Some(field) = app.contacts.focused_field_mut() {
        field.insert_str(text);
    }
}

/// Fetches the whole collection. A newer fetch supersedes one in flight.
pub fn start_fetch(app: &mut AppState) -> Vec<UiEffect> {
    let Some(session) = app.session.clone() else {
        return vec![];
    };

    let mut effects = Vec::new();
    if let Some(token) = app.tasks.fetch_contacts.clear() {
        effects.push(UiEffect::CancelTask {
            kind: TaskKind::FetchContacts,
            token: Some(token),
        });
    }

    let task = app.task_seq.next_id();
    let cancel = app.scope.child_token();
    app.tasks.fetch_contacts.begin(task, cancel.clone());
    effects.push(UiEffect::FetchContacts {
        task,
        cancel,
        session,
    });
    effects
}

/// Creates a contact from the form values as typed, empty strings included.
pub fn submit_create(app: &mut AppState) -> Vec<UiEffect> {
    let Some(session) = app.session.clone() else {
        return vec![];
    };
    if app.tasks.create_contact.is_running() {
        debug!("Create already in progress");
        return vec![];
    }

    let task = app.task_seq.next_id();
    let cancel = app.scope.child_token();
    app.tasks.create_contact.begin(task, cancel.clone());

    vec![UiEffect::CreateContact {
        task,
        cancel,
        session,
        contact: NewContact::new(app.contacts.name.value(), app.contacts.phone.value()),
    }]
}

/// Deletes the selected contact. Ignored while another delete is in flight.
pub fn delete_selected(app: &mut AppState) -> Vec<UiEffect> {
    let Some(session) = app.session.clone() else {
        return vec![];
    };
    if app.tasks.delete_contact.is_running() {
        debug!("Delete already in progress");
        return vec![];
    }
    let Some(id) = app.contacts.selected_contact().map(|c| c.id.clone()) else {
        return vec![];
    };

    let task = app.task_seq.next_id();
    let cancel = app.scope.child_token();
    app.tasks.delete_contact.begin(task, cancel.clone());

    vec![UiEffect::DeleteContact {
        task,
        cancel,
        session,
        id,
    }]
}

/// Replaces the list on success; leaves it empty on failure.
pub fn handle_fetched(
    app: &mut AppState,
    refreshed: Option<Session>,
    result: Result<Vec<Contact>, StoreError>,
) -> Vec<UiEffect> {
    app.apply_refreshed(refreshed);
    match result {
        Ok(contacts) => {
            debug!(count = contacts.len(), "Contact list replaced");
            app.contacts.list.set(contacts);
            app.contacts.clamp_selection();
        }
        Err(err) => {
            warn!(error = %err, "Error getting documents");
            app.contacts.list.set(Vec::new());
            app.contacts.clamp_selection();
            app.toasts.error(err.to_string());
        }
    }
    vec![]
}

/// A successful create triggers a full refetch.
pub fn handle_created(
    app: &mut AppState,
    refreshed: Option<Session>,
    result: Result<String, StoreError>,
) -> Vec<UiEffect> {
    app.apply_refreshed(refreshed);
    match result {
        Ok(id) => {
            info!(%id, "Contact created");
            start_fetch(app)
        }
        Err(err) => {
            warn!(error = %err, "Error adding document");
            app.toasts.error(err.to_string());
            vec![]
        }
    }
}

/// A successful delete removes the single matching entry locally (no refetch).
pub fn handle_deleted(
    app: &mut AppState,
    id: &str,
    refreshed: Option<Session>,
    result: Result<(), StoreError>,
) -> Vec<UiEffect> {
    app.apply_refreshed(refreshed);
    match result {
        Ok(()) => {
            info!(%id, "Contact deleted");
            app.contacts.list.update(|contacts| {
                if let Some(pos) = contacts.iter().position(|c| c.id == id) {
                    contacts.remove(pos);
                }
            });
            app.contacts.clamp_selection();
        }
        Err(err) => {
            warn!(%id, error = %err, "Error deleting document");
            app.toasts.error(err.to_string());
        }
    }
    vec![]
}
