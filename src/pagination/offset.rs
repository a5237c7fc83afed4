//! Offset pagination: absolute page numbers against a known total.

use super::PaginationError;
use log::*;

/// Page sizes offered by offset-paginated lists.
///
pub const PAGE_SIZE_OPTIONS: [usize; 5] = [10, 20, 30, 40, 50];

/// Default page size for offset-paginated lists.
///
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// One slot of the page control: either a page button or a gap.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisiblePageEntry {
    Page(usize),
    Ellipsis,
}

impl VisiblePageEntry {
    /// Returns the page number for page entries.
    ///
    pub fn page(&self) -> Option<usize> {
        match self {
            VisiblePageEntry::Page(page) => Some(*page),
            VisiblePageEntry::Ellipsis => None,
        }
    }
}

/// Lay out the page control for the given position. The first and last pages
/// are always present, the neighbours of the current page are shown, and each
/// side collapses into a single ellipsis once the gap is wide enough. Never
/// yields more than seven entries.
///
pub fn compute_visible_pages(current_page: usize, total_pages: usize) -> Vec<VisiblePageEntry> {
    let mut entries = Vec::with_capacity(7);
    entries.push(VisiblePageEntry::Page(1));

    if current_page > 3 {
        entries.push(VisiblePageEntry::Ellipsis);
    }
    if current_page > 2 {
        entries.push(VisiblePageEntry::Page(current_page - 1));
    }
    if current_page != 1 && current_page != total_pages {
        entries.push(VisiblePageEntry::Page(current_page));
    }
    if current_page + 1 < total_pages {
        entries.push(VisiblePageEntry::Page(current_page + 1));
    }
    if current_page + 2 < total_pages {
        entries.push(VisiblePageEntry::Ellipsis);
    }
    if total_pages > 1 {
        entries.push(VisiblePageEntry::Page(total_pages));
    }

    entries
}

/// Number of pages needed to show `rows` rows at `page_size` rows per page.
///
pub fn total_pages_for(rows: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    rows.div_ceil(page_size)
}

/// Page position of an offset-paginated list.
///
/// `current_page` is 1-based and never exceeds `max(total_pages, 1)`.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageState {
    current_page: usize,
    page_size: usize,
    total_pages: usize,
}

impl Default for PageState {
    fn default() -> Self {
        PageState::new(DEFAULT_PAGE_SIZE)
    }
}

impl PageState {
    /// Return a new state on the first page. Falls back to the default page
    /// size if the requested one is not offered.
    ///
    pub fn new(page_size: usize) -> Self {
        let page_size = if PAGE_SIZE_OPTIONS.contains(&page_size) {
            page_size
        } else {
            warn!(
                "Page size {} is not offered, using {} instead.",
                page_size, DEFAULT_PAGE_SIZE
            );
            DEFAULT_PAGE_SIZE
        };
        PageState {
            current_page: 1,
            page_size,
            total_pages: 0,
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// Whether the page control should be drawn at all.
    ///
    pub fn has_pages(&self) -> bool {
        self.total_pages > 0
    }

    pub fn can_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn can_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Return the layout of the page control for the current position.
    ///
    pub fn visible_pages(&self) -> Vec<VisiblePageEntry> {
        compute_visible_pages(self.current_page, self.total_pages)
    }

    /// Record the page count reported by the server, pulling the current page
    /// back inside the new range.
    ///
    pub fn set_total_pages(&mut self, total_pages: usize) -> &mut Self {
        self.total_pages = total_pages;
        self.current_page = self.current_page.clamp(1, total_pages.max(1));
        self
    }

    /// Navigate to the given page, clamped to `[1, total_pages]`. Returns true
    /// if the current page changed.
    ///
    pub fn go_to(&mut self, page: usize) -> bool {
        let page = page.clamp(1, self.total_pages.max(1));
        if page == self.current_page {
            return false;
        }
        self.current_page = page;
        true
    }

    /// Move to the next page. No-op on the last page.
    ///
    pub fn next(&mut self) -> bool {
        if !self.can_next() {
            return false;
        }
        self.current_page += 1;
        true
    }

    /// Move to the previous page. No-op on the first page.
    ///
    pub fn previous(&mut self) -> bool {
        if !self.can_previous() {
            return false;
        }
        self.current_page -= 1;
        true
    }

    /// Change the page size and return to the first page in the same update.
    ///
    pub fn set_page_size(&mut self, page_size: usize) -> Result<(), PaginationError> {
        if !PAGE_SIZE_OPTIONS.contains(&page_size) {
            return Err(PaginationError::UnsupportedPageSize(page_size));
        }
        self.page_size = page_size;
        self.current_page = 1;
        Ok(())
    }

    /// Cycle to the next offered page size, wrapping around.
    ///
    pub fn cycle_page_size(&mut self) -> usize {
        let index = PAGE_SIZE_OPTIONS
            .iter()
            .position(|size| *size == self.page_size)
            .map(|i| (i + 1) % PAGE_SIZE_OPTIONS.len())
            .unwrap_or(0);
        self.page_size = PAGE_SIZE_OPTIONS[index];
        self.current_page = 1;
        self.page_size
    }

    /// Return to the first page (filter changed).
    ///
    pub fn reset(&mut self) -> &mut Self {
        self.current_page = 1;
        self
    }

    /// Step back one page when a delete emptied the current page. Returns true
    /// if the page changed.
    ///
    pub fn after_delete(&mut self, rows_left_on_page: usize) -> bool {
        if rows_left_on_page == 0 && self.current_page > 1 {
            self.current_page -= 1;
            return true;
        }
        false
    }
}
