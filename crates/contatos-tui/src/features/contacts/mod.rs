//! Contacts screen: create form plus the remote contact list.
//!
//! The list lives in an observable container; it is replaced wholesale by a
//! fetch and edited in place by a delete.

mod render;
mod state;
mod update;

pub use render::render_contacts;
pub use state::{ContactsFocus, ContactsState};
pub use update::{
    delete_selected, handle_created, handle_deleted, handle_fetched, handle_key, handle_paste,
    start_fetch, submit_create,
};
