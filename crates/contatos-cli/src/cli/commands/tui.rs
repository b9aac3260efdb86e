//! Interactive mode.

use anyhow::Result;
use contatos_core::config::Config;

#[cfg(feature = "tui")]
pub async fn run(config: &Config) -> Result<()> {
    contatos_tui::run_interactive(config).await
}

#[cfg(not(feature = "tui"))]
pub async fn run(_config: &Config) -> Result<()> {
    anyhow::bail!("This build has no interactive UI. Use `contatos contacts --help`.")
}
