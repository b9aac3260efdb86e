//! Backend facade combining the auth gateway and the contact store.
//!
//! Store calls go through [`Backend::ensure_fresh`]: an expired session is
//! refreshed first, and the refreshed session is handed back to the caller
//! alongside the result so it can be written back into state.

use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::auth::{AuthClient, AuthError};
use crate::config::BackendSettings;
use crate::models::{Contact, NewContact};
use crate::session::Session;
use crate::store::{ContactStore, StoreError};

pub const USER_AGENT: &str = concat!("contatos/", env!("CARGO_PKG_VERSION"));

/// Builds the shared HTTP client. `timeout` of `None` leaves requests unbounded.
///
/// # Errors
/// Returns an error if the TLS backend cannot be initialized.
pub fn http_client(timeout: Option<Duration>) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build().context("Failed to build HTTP client")
}

/// Result of a store call, plus the session if it had to be refreshed.
#[derive(Debug)]
pub struct StoreOutcome<T> {
    pub refreshed: Option<Session>,
    pub result: Result<T, StoreError>,
}

impl<T> StoreOutcome<T> {
    fn failed(err: StoreError) -> Self {
        Self {
            refreshed: None,
            result: Err(err),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Backend {
    auth: AuthClient,
    store: ContactStore,
}

impl Backend {
    pub fn new(auth: AuthClient, store: ContactStore) -> Self {
        Self { auth, store }
    }

    /// Builds the facade from resolved settings.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_settings(settings: &BackendSettings) -> Result<Self> {
        let http = http_client(settings.timeout)?;
        Ok(Self::new(
            AuthClient::from_settings(http.clone(), settings),
            ContactStore::from_settings(http, settings),
        ))
    }

    /// Signs in with email and password.
    ///
    /// # Errors
    /// Returns a classified [`AuthError`].
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        self.auth.sign_in(email, password).await
    }

    /// Returns `Some(new_session)` if `session` had to be refreshed, `None` if it is still valid.
    ///
    /// # Errors
    /// Returns [`StoreError::Unauthenticated`] if the refresh fails.
    pub async fn ensure_fresh(&self, session: &Session) -> Result<Option<Session>, StoreError> {
        if !session.is_expired() {
            return Ok(None);
        }
        debug!(user_id = %session.user_id, "Session expired, refreshing");
        match self.auth.refresh(session).await {
            Ok(fresh) => Ok(Some(fresh)),
            Err(err) => {
                warn!(detail = err.detail(), "Session refresh failed");
                Err(StoreError::Unauthenticated(err.detail().to_string()))
            }
        }
    }

    pub async fn create_contact(
        &self,
        session: &Session,
        contact: &NewContact,
    ) -> StoreOutcome<String> {
        let refreshed = match self.ensure_fresh(session).await {
            Ok(refreshed) => refreshed,
            Err(err) => return StoreOutcome::failed(err),
        };
        let token = refreshed.as_ref().unwrap_or(session).id_token.clone();
        let result = self.store.create(&token, contact).await;
        StoreOutcome { refreshed, result }
    }

    pub async fn list_contacts(&self, session: &Session) -> StoreOutcome<Vec<Contact>> {
        let refreshed = match self.ensure_fresh(session).await {
            Ok(refreshed) => refreshed,
            Err(err) => return StoreOutcome::failed(err),
        };
        let token = refreshed.as_ref().unwrap_or(session).id_token.clone();
        let result = self.store.list(&token).await;
        StoreOutcome { refreshed, result }
    }

    pub async fn delete_contact(&self, session: &Session, id: &str) -> StoreOutcome<()> {
        let refreshed = match self.ensure_fresh(session).await {
            Ok(refreshed) => refreshed,
            Err(err) => return StoreOutcome::failed(err),
        };
        let token = refreshed.as_ref().unwrap_or(session).id_token.clone();
        let result = self.store.delete(&token, id).await;
        StoreOutcome { refreshed, result }
    }
}
