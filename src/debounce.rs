//! Tick-driven debouncing.
//!
//! Values are pushed with [`Debounced::set`] as they change and pulled with
//! [`Debounced::poll`] on every UI tick. Each `set` cancels the pending value
//! and restarts the quiet window, so only the last value of a burst is ever
//! emitted.

use std::time::{Duration, Instant};

/// Delay before a typed filter is sent to the server.
///
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

#[derive(Debug, Clone)]
pub struct Debounced<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debounced<T> {
    pub fn new(delay: Duration) -> Self {
        Debounced {
            delay,
            pending: None,
        }
    }

    /// Schedule `value` for emission `delay` after `now`, replacing whatever
    /// was pending.
    ///
    pub fn set(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now + self.delay));
    }

    /// Emit the pending value once its quiet window has elapsed.
    ///
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((_, due)) if now >= *due => self.pending.take().map(|(value, _)| value),
            _ => None,
        }
    }

    pub fn pending(&self) -> Option<&T> {
        self.pending.as_ref().map(|(value, _)| value)
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
