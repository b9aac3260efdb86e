//! Transient notifications shown over the active screen.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// How long a toast stays on screen.
pub const TOAST_LIFETIME: Duration = Duration::from_millis(3500);

/// Older toasts are dropped beyond this.
const MAX_TOASTS: usize = 3;

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub created: Instant,
}

#[derive(Debug, Default)]
pub struct Toasts {
    items: VecDeque<Toast>,
}

impl Toasts {
    pub fn push(&mut self, message: impl Into<String>, now: Instant) {
        self.items.push_back(Toast {
            message: message.into(),
            created: now,
        });
        while self.items.len() > MAX_TOASTS {
            self.items.pop_front();
        }
    }

    /// Shows an error notification starting now.
    pub fn error(&mut self, message: impl Into<String>) {
        self.push(message, Instant::now());
    }

    /// Drops expired toasts. Returns true if any were removed.
    pub fn expire(&mut self, now: Instant) -> bool {
        let before = self.items.len();
        self.items
            .retain(|toast| now.saturating_duration_since(toast.created) < TOAST_LIFETIME);
        self.items.len() != before
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.items.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toasts_expire_after_lifetime() {
        let start = Instant::now();
        let mut toasts = Toasts::default();
        toasts.push("Senha incorreta.", start);
        toasts.push("later", start + Duration::from_millis(1000));

        assert!(!toasts.expire(start + Duration::from_millis(3000)));
        assert_eq!(toasts.len(), 2);

        assert!(toasts.expire(start + TOAST_LIFETIME));
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts.iter().next().unwrap().message, "later");
    }

    #[test]
    fn test_oldest_toast_dropped_when_full() {
        let now = Instant::now();
        let mut toasts = Toasts::default();
        for i in 0..5 {
            toasts.push(format!("t{i}"), now);
        }
        let messages: Vec<_> = toasts.iter().map(|t| t.message.as_str()).collect();
        assert_eq!(messages, vec!["t2", "t3", "t4"]);
    }
}
