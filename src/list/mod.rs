//! Server-driven list views.
//!
//! This module holds the client-side half of every paginated list:
//! - `ListController`: filter, page position and rows of an offset list
//! - `KeysetList`: cursor trail and rows of a keyset list
//! - `RequestGuard`: drops responses superseded by a newer request
//!
//! Controllers never fetch anything themselves. They hand out tickets naming
//! the query to run, and accept results tagged with the ticket's generation.

mod filter;
mod guard;

pub use filter::FilterBinding;
pub use guard::RequestGuard;

use crate::api::{ApiError, KeysetResponse, PageResponse};
use crate::pagination::{
    CursorTrail, KeysetSignal, KeysetState, PageState, Pager, PagerAction, PaginationError,
};
use log::*;
use std::time::{Duration, Instant};

/// Parameters of an offset-paginated request.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub filter: String,
    pub page: usize,
    pub page_size: usize,
}

/// Parameters of a keyset-paginated request.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeysetQuery {
    pub cursor: Option<String>,
    pub limit: usize,
}

/// A request to run, tagged with the generation that must still be current
/// when its result arrives.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket<Q> {
    pub generation: u64,
    pub query: Q,
}

pub type ListTicket = Ticket<ListQuery>;
pub type KeysetTicket = Ticket<KeysetQuery>;

/// What became of a response handed to [`ListController::apply`].
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    /// A newer request superseded this one; nothing changed.
    Stale,
    Shown,
    /// The server reported fewer pages than the requested page. The list
    /// moved back inside the range and this ticket fetches the rows there.
    Refetch(ListTicket),
}

/// Position of a row when its delete was confirmed.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteOrigin {
    pub page: usize,
    pub rows_on_page: usize,
}

/// Loading status of a list.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

/// Offset-paginated list with a debounced text filter.
///
#[derive(Debug, Clone)]
pub struct ListController<T> {
    filter: FilterBinding,
    pages: PageState,
    pager: Pager,
    guard: RequestGuard,
    rows: Vec<T>,
    load: LoadState,
}

impl<T> ListController<T> {
    pub fn new(page_size: usize, debounce: Duration) -> Self {
        ListController {
            filter: FilterBinding::new(debounce),
            pages: PageState::new(page_size),
            pager: Pager::new(),
            guard: RequestGuard::new(),
            rows: vec![],
            load: LoadState::Idle,
        }
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn pages(&self) -> &PageState {
        &self.pages
    }

    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load
    }

    pub fn filter_input(&self) -> &str {
        self.filter.raw()
    }

    /// The query the next request should run.
    ///
    pub fn query(&self) -> ListQuery {
        ListQuery {
            filter: self.filter.committed().to_owned(),
            page: self.pages.current_page(),
            page_size: self.pages.page_size(),
        }
    }

    /// Start a request for the current query, superseding any in flight.
    ///
    pub fn request(&mut self) -> ListTicket {
        self.load = LoadState::Loading;
        Ticket {
            generation: self.guard.issue(),
            query: self.query(),
        }
    }

    /// Accept the result of a request. Results of superseded requests are
    /// dropped. Failures empty the list and keep the message for an inline
    /// error row.
    ///
    pub fn apply(&mut self, generation: u64, result: Result<PageResponse<T>, ApiError>) -> Applied {
        if !self.guard.is_current(generation) {
            debug!("Ignoring stale list response (generation {}).", generation);
            return Applied::Stale;
        }
        match result {
            Ok(page) => {
                let requested = self.pages.current_page();
                self.rows = page.data;
                self.pages.set_total_pages(page.total_pages);
                let entries = self.pages.visible_pages();
                self.pager.follow(&entries, self.pages.current_page());
                self.load = LoadState::Loaded;
                if self.pages.has_pages() && self.pages.current_page() != requested {
                    info!(
                        "Page {} is past the last page, fetching page {}.",
                        requested,
                        self.pages.current_page()
                    );
                    return Applied::Refetch(self.request());
                }
            }
            Err(e) => {
                warn!("List request failed: {}", e);
                self.rows.clear();
                self.load = LoadState::Failed(e.user_message());
            }
        }
        Applied::Shown
    }

    pub fn type_filter(&mut self, c: char, now: Instant) {
        self.filter.push(c, now);
    }

    pub fn erase_filter(&mut self, now: Instant) {
        self.filter.pop(now);
    }

    pub fn clear_filter(&mut self, now: Instant) {
        self.filter.clear(now);
    }

    /// Advance time. When the typed filter settles on a new value, return to
    /// the first page and start a request for it.
    ///
    pub fn tick(&mut self, now: Instant) -> Option<ListTicket> {
        let filter = self.filter.poll(now)?.to_owned();
        debug!("Filter settled on '{}', returning to page 1.", filter);
        self.pages.reset();
        Some(self.request())
    }

    pub fn next_page(&mut self) -> Option<ListTicket> {
        self.pages.next().then(|| self.request())
    }

    pub fn previous_page(&mut self) -> Option<ListTicket> {
        self.pages.previous().then(|| self.request())
    }

    pub fn go_to(&mut self, page: usize) -> Option<ListTicket> {
        self.pages.go_to(page).then(|| self.request())
    }

    pub fn set_page_size(&mut self, page_size: usize) -> Result<ListTicket, PaginationError> {
        self.pages.set_page_size(page_size)?;
        Ok(self.request())
    }

    pub fn cycle_page_size(&mut self) -> ListTicket {
        self.pages.cycle_page_size();
        self.request()
    }

    pub fn pager_left(&mut self) {
        self.pager.move_left();
    }

    pub fn pager_right(&mut self) {
        let entries = self.pages.visible_pages();
        self.pager.move_right(&entries);
    }

    /// Activate the pager entry under the cursor.
    ///
    pub fn pager_activate(&mut self) -> Option<ListTicket> {
        let entries = self.pages.visible_pages();
        match self.pager.activate(&entries) {
            PagerAction::GoTo(page) => self.go_to(page),
            PagerAction::StartJump | PagerAction::None => None,
        }
    }

    pub fn pager_input(&mut self, c: char) -> bool {
        self.pager.input_char(c)
    }

    pub fn pager_backspace(&mut self) {
        self.pager.backspace();
    }

    pub fn pager_commit(&mut self) -> Option<ListTicket> {
        let page = self.pager.commit(self.pages.total_pages())?;
        self.go_to(page)
    }

    pub fn pager_cancel(&mut self) {
        self.pager.cancel();
    }

    /// Where a row deleted now would be taken from.
    ///
    pub fn delete_origin(&self) -> DeleteOrigin {
        DeleteOrigin {
            page: self.pages.current_page(),
            rows_on_page: self.rows.len(),
        }
    }

    /// A row confirmed for deletion at `origin` is gone. If that emptied the
    /// page the list is still showing, step back a page. Then refetch.
    ///
    pub fn after_delete(&mut self, origin: DeleteOrigin) -> ListTicket {
        if origin.page != self.pages.current_page() {
            debug!(
                "Delete was confirmed on page {}, now on page {}; refetching only.",
                origin.page,
                self.pages.current_page()
            );
        } else if self.pages.after_delete(origin.rows_on_page.saturating_sub(1)) {
            info!(
                "Page emptied by delete, moving back to page {}.",
                self.pages.current_page()
            );
        }
        self.request()
    }

    /// Run a key-driven action against the list.
    ///
    pub fn perform(&mut self, action: ListAction, now: Instant) -> Option<ListTicket> {
        match action {
            ListAction::FilterChar(c) => {
                self.type_filter(c, now);
                None
            }
            ListAction::FilterBackspace => {
                self.erase_filter(now);
                None
            }
            ListAction::FilterClear => {
                self.clear_filter(now);
                None
            }
            ListAction::NextPage => self.next_page(),
            ListAction::PreviousPage => self.previous_page(),
            ListAction::CyclePageSize => Some(self.cycle_page_size()),
            ListAction::PagerLeft => {
                self.pager_left();
                None
            }
            ListAction::PagerRight => {
                self.pager_right();
                None
            }
            ListAction::PagerActivate => self.pager_activate(),
            ListAction::PagerChar(c) => {
                self.pager_input(c);
                None
            }
            ListAction::PagerBackspace => {
                self.pager_backspace();
                None
            }
            ListAction::PagerCommit => self.pager_commit(),
            ListAction::PagerCancel => {
                self.pager_cancel();
                None
            }
            ListAction::Refresh => Some(self.request()),
        }
    }
}

/// Key-driven actions on an offset list.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListAction {
    FilterChar(char),
    FilterBackspace,
    FilterClear,
    NextPage,
    PreviousPage,
    CyclePageSize,
    PagerLeft,
    PagerRight,
    PagerActivate,
    PagerChar(char),
    PagerBackspace,
    PagerCommit,
    PagerCancel,
    Refresh,
}

/// Keyset-paginated list. The cursor trail is owned here, the control state
/// is derived from the latest response.
///
#[derive(Debug, Clone)]
pub struct KeysetList<T> {
    state: KeysetState,
    trail: CursorTrail,
    pending: Option<(u64, KeysetSignal)>,
    guard: RequestGuard,
    rows: Vec<T>,
    next_cursor: Option<String>,
    load: LoadState,
}

impl<T> KeysetList<T> {
    pub fn new(limit: usize) -> Self {
        KeysetList {
            state: KeysetState::new(limit),
            trail: CursorTrail::new(),
            pending: None,
            guard: RequestGuard::new(),
            rows: vec![],
            next_cursor: None,
            load: LoadState::Idle,
        }
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn state(&self) -> &KeysetState {
        &self.state
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load
    }

    /// 1-based position in the trail, for display only.
    ///
    pub fn depth(&self) -> usize {
        self.trail.depth()
    }

    fn issue(&mut self, query: KeysetQuery) -> KeysetTicket {
        self.load = LoadState::Loading;
        Ticket {
            generation: self.guard.issue(),
            query,
        }
    }

    /// Request the page the trail currently points at.
    ///
    pub fn request(&mut self) -> KeysetTicket {
        self.pending = None;
        let query = KeysetQuery {
            cursor: self.trail.current().map(str::to_owned),
            limit: self.state.limit,
        };
        self.issue(query)
    }

    /// Request the following page. No-op unless the server reported one.
    ///
    pub fn next(&mut self) -> Option<KeysetTicket> {
        let signal = self.state.next()?;
        let cursor = self.next_cursor.clone()?;
        let ticket = self.issue(KeysetQuery {
            cursor: Some(cursor),
            limit: self.state.limit,
        });
        self.pending = Some((ticket.generation, signal));
        Some(ticket)
    }

    /// Request the preceding page. No-op on the first page.
    ///
    pub fn previous(&mut self) -> Option<KeysetTicket> {
        let signal = self.state.previous()?;
        let mut trail = self.trail.clone();
        trail.back();
        let ticket = self.issue(KeysetQuery {
            cursor: trail.current().map(str::to_owned),
            limit: self.state.limit,
        });
        self.pending = Some((ticket.generation, signal));
        Some(ticket)
    }

    /// Change the limit and restart from the first page.
    ///
    pub fn set_limit(&mut self, limit: usize) -> Result<KeysetTicket, PaginationError> {
        self.state.set_limit(limit)?;
        self.trail.reset();
        Ok(self.request())
    }

    pub fn cycle_limit(&mut self) -> KeysetTicket {
        self.state.cycle_limit();
        self.trail.reset();
        self.request()
    }

    /// Accept the result of a request, moving the trail only once the page
    /// it points at has actually arrived.
    ///
    pub fn apply(
        &mut self,
        generation: u64,
        result: Result<KeysetResponse<T>, ApiError>,
    ) -> bool {
        if !self.guard.is_current(generation) {
            debug!("Ignoring stale keyset response (generation {}).", generation);
            return false;
        }
        let pending = self.pending.take();
        match result {
            Ok(page) => {
                match pending {
                    Some((g, KeysetSignal::Next)) if g == generation => {
                        if let Some(cursor) = self.next_cursor.take() {
                            self.trail.advance(cursor);
                        }
                    }
                    Some((g, KeysetSignal::Previous)) if g == generation => {
                        self.trail.back();
                    }
                    _ => {}
                }
                self.rows = page.data;
                self.next_cursor = page.next_cursor;
                self.state.has_next = page.has_next && self.next_cursor.is_some();
                self.state.can_previous = self.trail.can_previous();
                self.load = LoadState::Loaded;
            }
            Err(e) => {
                warn!("Keyset request failed: {}", e);
                self.rows.clear();
                self.load = LoadState::Failed(e.user_message());
            }
        }
        true
    }
}
