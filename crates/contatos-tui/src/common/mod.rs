//! Shared building blocks for the feature slices.

pub mod render_utils;
mod task;
pub mod text;
mod text_field;
mod toast;

pub use task::{TaskCompleted, TaskId, TaskKind, TaskSeq, TaskState, Tasks};
pub use text_field::TextField;
pub use toast::{TOAST_LIFETIME, Toast, Toasts};
