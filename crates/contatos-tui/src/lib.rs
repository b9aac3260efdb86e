//! Full-screen TUI for contatos: login screen, then the contacts screen.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, stderr};

use anyhow::Result;
use contatos_core::backend::Backend;
use contatos_core::config::Config;
pub use runtime::TuiRuntime;
use tracing::info;

/// Runs the interactive application until the user quits.
///
/// # Errors
/// Returns an error if no terminal is attached, the backend settings are
/// incomplete, or the terminal fails.
pub async fn run_interactive(config: &Config) -> Result<()> {
    if !stderr().is_terminal() {
        anyhow::bail!(
            "The interactive app requires a terminal.\n\
             Use `contatos contacts list` for non-interactive access."
        );
    }

    let settings = config.resolve()?;
    let backend = Backend::from_settings(&settings)?;
    info!(project_id = %settings.project_id, collection = %settings.collection, "Starting TUI");

    let mut runtime = TuiRuntime::new(backend)?;
    // The event loop polls the terminal synchronously; keep it off the async workers.
    tokio::task::block_in_place(|| runtime.run())
}
