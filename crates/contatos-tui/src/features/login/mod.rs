//! Login screen: email and password form backed by the auth gateway.

mod render;
mod state;
mod update;

pub use render::render_login;
pub use state::{LoginFocus, LoginState};
pub use update::{handle_key, handle_paste, handle_sign_in_result, submit};
