//! Keyset (cursor) pagination: next/previous only, no absolute page numbers.

use super::PaginationError;

/// Limits offered by keyset-paginated lists.
///
pub const LIMIT_OPTIONS: [usize; 4] = [20, 30, 40, 50];

/// Default keyset limit.
///
pub const DEFAULT_LIMIT: usize = 20;

/// Signal emitted by the keyset control. The caller owns the cursor and
/// decides what the signal means for its next request.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeysetSignal {
    Next,
    Previous,
    LimitChanged(usize),
}

/// State of a keyset page control, derived from the latest server response.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeysetState {
    pub limit: usize,
    pub has_next: bool,
    pub can_previous: bool,
}

impl Default for KeysetState {
    fn default() -> Self {
        KeysetState {
            limit: DEFAULT_LIMIT,
            has_next: false,
            can_previous: false,
        }
    }
}

impl KeysetState {
    /// Return a new state with no pages known yet. Falls back to the default
    /// limit if the requested one is not offered.
    ///
    pub fn new(limit: usize) -> Self {
        let limit = if LIMIT_OPTIONS.contains(&limit) {
            limit
        } else {
            log::warn!(
                "Keyset limit {} is not offered, using {} instead.",
                limit, DEFAULT_LIMIT
            );
            DEFAULT_LIMIT
        };
        KeysetState {
            limit,
            ..KeysetState::default()
        }
    }

    /// Returns the next signal only if the server reported a further page.
    ///
    pub fn next(&self) -> Option<KeysetSignal> {
        self.has_next.then_some(KeysetSignal::Next)
    }

    /// Returns the previous signal only if there is a page to go back to.
    ///
    pub fn previous(&self) -> Option<KeysetSignal> {
        self.can_previous.then_some(KeysetSignal::Previous)
    }

    /// Change the limit. The caller must reset its cursor on the returned
    /// signal.
    ///
    pub fn set_limit(&mut self, limit: usize) -> Result<KeysetSignal, PaginationError> {
        if !LIMIT_OPTIONS.contains(&limit) {
            return Err(PaginationError::UnsupportedLimit(limit));
        }
        self.limit = limit;
        Ok(KeysetSignal::LimitChanged(limit))
    }

    /// Cycle to the next offered limit, wrapping around.
    ///
    pub fn cycle_limit(&mut self) -> KeysetSignal {
        let index = LIMIT_OPTIONS
            .iter()
            .position(|limit| *limit == self.limit)
            .map(|i| (i + 1) % LIMIT_OPTIONS.len())
            .unwrap_or(0);
        self.limit = LIMIT_OPTIONS[index];
        KeysetSignal::LimitChanged(self.limit)
    }
}

/// Caller-side history of cursors visited, so "previous" can replay the
/// cursor that produced the earlier page. The first entry is always the
/// initial page (no cursor).
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorTrail {
    cursors: Vec<Option<String>>,
}

impl Default for CursorTrail {
    fn default() -> Self {
        CursorTrail {
            cursors: vec![None],
        }
    }
}

impl CursorTrail {
    pub fn new() -> Self {
        CursorTrail::default()
    }

    /// Cursor for the page currently shown.
    ///
    pub fn current(&self) -> Option<&str> {
        self.cursors.last().and_then(|c| c.as_deref())
    }

    pub fn can_previous(&self) -> bool {
        self.cursors.len() > 1
    }

    /// Number of pages visited, counting the initial one.
    ///
    pub fn depth(&self) -> usize {
        self.cursors.len()
    }

    /// Record the continuation marker of the page being left.
    ///
    pub fn advance(&mut self, next_cursor: String) {
        self.cursors.push(Some(next_cursor));
    }

    /// Drop the current cursor. Returns false on the initial page.
    ///
    pub fn back(&mut self) -> bool {
        if !self.can_previous() {
            return false;
        }
        self.cursors.pop();
        true
    }

    /// Return to the initial page.
    ///
    pub fn reset(&mut self) {
        self.cursors.truncate(1);
    }
}
