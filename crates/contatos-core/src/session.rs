//! Authenticated session held in memory for the lifetime of the process.
//!
//! Never persisted: restarting the process returns to the login screen.

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Tokens are treated as expired this long before the backend says so.
const EXPIRY_MARGIN_MS: u64 = 5 * 60 * 1000;

pub fn now_millis_u64() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .ok()
        .and_then(|d| u64::try_from(d.as_millis()).ok())
        .unwrap_or(u64::MAX)
}

/// Computes an absolute expiry (ms since epoch) from a lifetime in seconds,
/// keeping a five minute safety margin.
pub fn compute_expires_at(expires_in_secs: u64) -> u64 {
    let now = now_millis_u64();
    now.saturating_add(expires_in_secs.saturating_mul(1000).saturating_sub(EXPIRY_MARGIN_MS))
}

#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    /// Short-lived bearer token for store requests.
    pub id_token: String,
    /// Long-lived token exchanged for a new id token.
    pub refresh_token: String,
    pub user_id: String,
    pub email: String,
    /// Expiry timestamp in milliseconds since epoch (margin already applied).
    pub expires_at: u64,
}

impl Session {
    /// Returns true if the id token is expired or about to expire.
    pub fn is_expired(&self) -> bool {
        now_millis_u64() >= self.expires_at
    }
}

// Tokens never reach logs.
impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("user_id", &self.user_id)
            .field("email", &self.email)
            .field("expires_at", &self.expires_at)
            .finish_non_exhaustive()
    }
}
