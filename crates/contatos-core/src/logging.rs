//! Tracing subscriber setup.
//!
//! Logs are appended to `${CONTATOS_HOME}/logs/contatos.log` (never rotated).
//! The interactive TUI owns the terminal, so a stderr layer is only added on
//! request.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::paths;

/// Environment variable holding the filter directives.
pub const LOG_ENV: &str = "CONTATOS_LOG";

const DEFAULT_FILTER: &str = "contatos=info,contatos_core=info,contatos_tui=info";

const LOG_FILE: &str = "contatos.log";

/// Returns the log file path.
pub fn log_path() -> PathBuf {
    paths::logs_dir().join(LOG_FILE)
}

fn build_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Opens the log file for appending. The file is never rotated.
fn open_log_file(dir: &Path) -> Result<RollingFileAppender> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(LOG_FILE)
        .build(dir)
        .with_context(|| format!("Failed to open log file in {}", dir.display()))
}

/// Installs the global subscriber.
///
/// # Errors
/// Returns an error if the log file cannot be opened or a subscriber is
/// already installed.
pub fn init(stderr: bool) -> Result<()> {
    let directives = std::env::var(LOG_ENV).ok();
    let filter = build_filter(directives.as_deref());
    let file = open_log_file(&paths::logs_dir())?;

    let stderr_layer = stderr.then(|| {
        tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file)
                .with_ansi(false),
        )
        .with(stderr_layer)
        .try_init()
        .context("Failed to install tracing subscriber")
}
