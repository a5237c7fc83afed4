//! Transient notifications.

use std::time::{Duration, Instant};

/// How long a toast stays on screen.
///
pub const TOAST_DURATION: Duration = Duration::from_secs(4);

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    expires_at: Instant,
}

impl Toast {
    pub fn new(message: impl Into<String>, kind: ToastKind, now: Instant) -> Self {
        Toast {
            message: message.into(),
            kind,
            expires_at: now + TOAST_DURATION,
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toast_expiry() {
        let now = Instant::now();
        let toast = Toast::new("Saved", ToastKind::Success, now);
        assert!(!toast.is_expired(now));
        assert!(toast.is_expired(now + TOAST_DURATION));
    }
}
