//! Sign-in command handlers.

use anyhow::Result;
use contatos_core::backend::Backend;
use contatos_core::config::Config;
use contatos_core::session::Session;
use tracing::{error, info};

/// Signs in, mapping a rejection to its user-facing message.
///
/// # Errors
/// Returns an error if settings are incomplete or the sign-in is rejected.
pub async fn sign_in(config: &Config, email: &str, password: &str) -> Result<Session> {
    let backend = Backend::from_settings(&config.resolve()?)?;
    match backend.sign_in(email, password).await {
        Ok(session) => {
            info!(user_id = %session.user_id, "Login succeeded");
            Ok(session)
        }
        Err(err) => {
            error!(detail = err.detail(), "Login failed");
            anyhow::bail!(err.user_message())
        }
    }
}

pub async fn login(config: &Config, email: &str, password: &str) -> Result<()> {
    let session = sign_in(config, email, password).await?;
    println!("Logged in as {}", session.email);
    Ok(())
}
