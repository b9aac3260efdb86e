//! Domain types shared by the store client and the UI.

use serde::{Deserialize, Serialize};

/// Document field holding the contact name.
pub const NAME_FIELD: &str = "nome";
/// Document field holding the contact phone.
pub const PHONE_FIELD: &str = "telefone";
/// Shown in place of a field that is missing or not a string.
pub const MISSING_FIELD_PLACEHOLDER: &str = "--";

/// A stored contact record.
///
/// `id` is assigned by the store and never by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: String,
    pub name: String,
    pub phone: String,
}

impl Contact {
    pub fn new(id: impl Into<String>, name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            phone: phone.into(),
        }
    }
}

/// Input for a create request. Fields are sent as typed, empty strings included.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewContact {
    pub name: String,
    pub phone: String,
}

impl NewContact {
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
        }
    }
}
