//! Page controls for server-backed lists.
//!
//! - Offset pagination with a fixed-width page layout
//! - A keyboard pager with ellipsis jump input
//! - Keyset (cursor) pagination signals

mod error;
mod keyset;
mod offset;
mod pager;

pub use error::PaginationError;
pub use keyset::{CursorTrail, KeysetSignal, KeysetState, DEFAULT_LIMIT, LIMIT_OPTIONS};
pub use offset::{
    compute_visible_pages, total_pages_for, PageState, VisiblePageEntry, DEFAULT_PAGE_SIZE,
    PAGE_SIZE_OPTIONS,
};
pub use pager::{PageJump, Pager, PagerAction};
