use crate::debounce::Debounced;
use std::time::{Duration, Instant};

/// Text filter typed into a list view. Keystrokes update the raw text at
/// once; the server only sees the debounced value, and only when it differs
/// from the filter already in effect.
///
#[derive(Debug, Clone)]
pub struct FilterBinding {
    raw: String,
    debounced: Debounced<String>,
    committed: String,
}

impl FilterBinding {
    pub fn new(delay: Duration) -> Self {
        FilterBinding {
            raw: String::new(),
            debounced: Debounced::new(delay),
            committed: String::new(),
        }
    }

    /// Text as typed.
    ///
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Filter the current rows were requested with.
    ///
    pub fn committed(&self) -> &str {
        &self.committed
    }

    pub fn push(&mut self, c: char, now: Instant) {
        self.raw.push(c);
        self.debounced.set(self.raw.clone(), now);
    }

    pub fn pop(&mut self, now: Instant) {
        if self.raw.pop().is_some() {
            self.debounced.set(self.raw.clone(), now);
        }
    }

    pub fn clear(&mut self, now: Instant) {
        if !self.raw.is_empty() {
            self.raw.clear();
            self.debounced.set(String::new(), now);
        }
    }

    /// Return the new filter once the typing settles and the settled text
    /// differs from the committed filter.
    ///
    pub fn poll(&mut self, now: Instant) -> Option<&str> {
        let settled = self.debounced.poll(now)?;
        let settled = settled.trim().to_string();
        if settled == self.committed {
            return None;
        }
        self.committed = settled;
        Some(&self.committed)
    }
}
