//! Keyboard-driven page control.
//!
//! The pager keeps a cursor over the visible entries of the page control.
//! Activating a page entry navigates to it; activating an ellipsis turns that
//! slot into a small numeric input that jumps to the typed page on commit.

use super::VisiblePageEntry;
use log::*;

/// Outcome of activating the entry under the cursor.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagerAction {
    GoTo(usize),
    StartJump,
    None,
}

/// Numeric input that replaces an ellipsis slot while it is being edited.
///
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageJump {
    slot: usize,
    input: String,
}

impl PageJump {
    pub fn slot(&self) -> usize {
        self.slot
    }

    pub fn input(&self) -> &str {
        &self.input
    }
}

/// Cursor and jump-input state for one page control.
///
#[derive(Debug, Clone, Default)]
pub struct Pager {
    cursor: usize,
    jump: Option<PageJump>,
}

impl Pager {
    pub fn new() -> Self {
        Pager::default()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn jump(&self) -> Option<&PageJump> {
        self.jump.as_ref()
    }

    pub fn is_jumping(&self) -> bool {
        self.jump.is_some()
    }

    /// Move the cursor one entry to the right, staying on the last entry.
    ///
    pub fn move_right(&mut self, entries: &[VisiblePageEntry]) {
        self.blur();
        if self.cursor + 1 < entries.len() {
            self.cursor += 1;
        }
    }

    /// Move the cursor one entry to the left, staying on the first entry.
    ///
    pub fn move_left(&mut self) {
        self.blur();
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Put the cursor on the entry showing `page`, if it is visible. Called
    /// after the layout changes so the cursor follows the current page.
    ///
    pub fn follow(&mut self, entries: &[VisiblePageEntry], page: usize) {
        if let Some(index) = entries.iter().position(|e| e.page() == Some(page)) {
            self.cursor = index;
        } else {
            self.cursor = self.cursor.min(entries.len().saturating_sub(1));
        }
    }

    /// Activate the entry under the cursor.
    ///
    pub fn activate(&mut self, entries: &[VisiblePageEntry]) -> PagerAction {
        match entries.get(self.cursor) {
            Some(VisiblePageEntry::Page(page)) => PagerAction::GoTo(*page),
            Some(VisiblePageEntry::Ellipsis) => {
                self.jump = Some(PageJump {
                    slot: self.cursor,
                    input: String::new(),
                });
                PagerAction::StartJump
            }
            None => PagerAction::None,
        }
    }

    /// Feed a typed character into the jump input. Anything but an ASCII
    /// digit is refused and leaves the input untouched.
    ///
    pub fn input_char(&mut self, c: char) -> bool {
        match self.jump.as_mut() {
            Some(jump) if c.is_ascii_digit() => {
                jump.input.push(c);
                true
            }
            _ => false,
        }
    }

    /// Remove the last typed digit.
    ///
    pub fn backspace(&mut self) {
        if let Some(jump) = self.jump.as_mut() {
            jump.input.pop();
        }
    }

    /// Close the jump input and return the page to navigate to, if the typed
    /// value lies within `[1, total_pages]`. Out-of-range or empty input is
    /// dropped silently.
    ///
    pub fn commit(&mut self, total_pages: usize) -> Option<usize> {
        let jump = self.jump.take()?;
        match jump.input.parse::<usize>() {
            Ok(page) if (1..=total_pages).contains(&page) => Some(page),
            _ => {
                debug!("Discarding page jump input '{}'.", jump.input);
                None
            }
        }
    }

    /// Close the jump input without navigating (Escape).
    ///
    pub fn cancel(&mut self) {
        self.jump = None;
    }

    /// Focus left the page control; same as cancelling.
    ///
    pub fn blur(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::compute_visible_pages;

    fn jump_at_first_ellipsis(pager: &mut Pager, entries: &[VisiblePageEntry]) {
        let slot = entries
            .iter()
            .position(|e| *e == VisiblePageEntry::Ellipsis)
            .unwrap();
        for _ in 0..slot {
            pager.move_right(entries);
        }
        assert_eq!(pager.activate(entries), PagerAction::StartJump);
        assert_eq!(pager.jump().map(|j| j.slot()), Some(slot));
    }

    #[test]
    fn test_activate_page_entry() {
        let entries = compute_visible_pages(5, 10);
        let mut pager = Pager::new();
        pager.follow(&entries, 5);
        assert_eq!(pager.activate(&entries), PagerAction::GoTo(5));
        pager.move_right(&entries);
        assert_eq!(pager.activate(&entries), PagerAction::GoTo(6));
        assert!(!pager.is_jumping());
    }

    #[test]
    fn test_non_digits_are_refused() {
        let entries = compute_visible_pages(5, 10);
        let mut pager = Pager::new();
        jump_at_first_ellipsis(&mut pager, &entries);

        assert!(pager.input_char('7'));
        for c in ['a', '-', ' ', '.', 'é', '+'] {
            assert!(!pager.input_char(c));
            assert_eq!(pager.jump().unwrap().input(), "7");
        }
    }

    #[test]
    fn test_commit_in_range() {
        let entries = compute_visible_pages(5, 10);
        let mut pager = Pager::new();
        jump_at_first_ellipsis(&mut pager, &entries);
        pager.input_char('8');
        assert_eq!(pager.commit(10), Some(8));
        assert!(!pager.is_jumping());
    }

    #[test]
    fn test_commit_out_of_range_is_discarded() {
        let entries = compute_visible_pages(5, 10);
        let mut pager = Pager::new();

        for typed in ["0", "11", "999", ""] {
            jump_at_first_ellipsis(&mut pager, &entries);
            for c in typed.chars() {
                pager.input_char(c);
            }
            assert_eq!(pager.commit(10), None);
            assert!(!pager.is_jumping());
            pager = Pager::new();
        }
    }

    #[test]
    fn test_cancel_and_blur_discard() {
        let entries = compute_visible_pages(5, 10);
        let mut pager = Pager::new();
        jump_at_first_ellipsis(&mut pager, &entries);
        pager.input_char('3');
        pager.cancel();
        assert_eq!(pager.commit(10), None);

        let mut pager = Pager::new();
        jump_at_first_ellipsis(&mut pager, &entries);
        pager.input_char('3');
        pager.move_left();
        assert!(!pager.is_jumping());
    }

    #[test]
    fn test_backspace() {
        let entries = compute_visible_pages(5, 10);
        let mut pager = Pager::new();
        jump_at_first_ellipsis(&mut pager, &entries);
        pager.input_char('1');
        pager.input_char('2');
        pager.backspace();
        assert_eq!(pager.jump().unwrap().input(), "1");
    }

    #[test]
    fn test_input_without_jump_is_ignored() {
        let mut pager = Pager::new();
        assert!(!pager.input_char('4'));
        assert_eq!(pager.commit(10), None);
    }

    #[test]
    fn test_cursor_stays_in_bounds() {
        let entries = compute_visible_pages(1, 3);
        let mut pager = Pager::new();
        pager.move_left();
        assert_eq!(pager.cursor(), 0);
        for _ in 0..10 {
            pager.move_right(&entries);
        }
        assert_eq!(pager.cursor(), entries.len() - 1);
    }
}
