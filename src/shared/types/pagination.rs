//! Page window calculation for paginated listings.
//!
//! Given a total item count, a page size and a requested page, these helpers
//! compute the row window to request from the store and the page numbers a
//! pager control shows. Everything here is pure integer arithmetic.

use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// Number of numbered page buttons a pager shows by default.
pub const DEFAULT_MAX_VISIBLE_PAGES: u64 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaginationError {
    #[error("Invalid argument: {name} must be positive, got {value}")]
    InvalidArgument { name: &'static str, value: i64 },
}

/// Half-open window `[offset, offset + limit)` into a result set ordered
/// newest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct RowRange {
    pub offset: u64,
    pub limit: u64,
}

impl RowRange {
    /// Exclusive end of the window.
    pub fn end(&self) -> u64 {
        self.offset.saturating_add(self.limit)
    }

    /// Inclusive last row index, as used by `range(from, to)` style APIs.
    pub fn last_index(&self) -> u64 {
        self.end().saturating_sub(1)
    }
}

/// Page numbers and ellipsis flags used to render pagination controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct PagerModel {
    pub current_page: u64,
    pub total_pages: u64,
    /// Numbered window, ascending and distinct, within `[1, total_pages]`.
    pub visible_pages: Vec<u64>,
    /// Page 1 is rendered before the window.
    pub show_first_page: bool,
    /// A gap marker sits between page 1 and the window.
    pub leading_ellipsis: bool,
    /// A gap marker sits between the window and the last page.
    pub trailing_ellipsis: bool,
    /// The last page is rendered after the window.
    pub show_last_page: bool,
    pub has_previous: bool,
    pub has_next: bool,
}

impl PagerModel {
    /// Pager for listings with at most one page: nothing to render.
    pub fn empty(current_page: u64, total_pages: u64) -> Self {
        Self {
            current_page,
            total_pages,
            visible_pages: Vec::new(),
            show_first_page: false,
            leading_ellipsis: false,
            trailing_ellipsis: false,
            show_last_page: false,
            has_previous: false,
            has_next: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.visible_pages.is_empty()
    }

    pub fn previous_page(&self) -> Option<u64> {
        self.has_previous.then(|| self.current_page - 1)
    }

    pub fn next_page(&self) -> Option<u64> {
        self.has_next.then(|| self.current_page + 1)
    }
}

/// Number of pages needed for `total_count` items.
///
/// A page size below 1 is treated as 1.
pub fn total_pages(total_count: u64, page_size: u64) -> u64 {
    total_count.div_ceil(page_size.max(1))
}

/// Clamp a requested page into `[1, total_pages]`.
pub fn clamp_page(page: u64, total_pages: u64) -> u64 {
    page.clamp(1, total_pages.max(1))
}

/// Row window for `current_page`.
///
/// `current_page` is not clamped: a page past the end yields a window past
/// the end of the result set, which the store answers with zero rows. Callers
/// that want the last page instead must clamp with [`clamp_page`] first.
/// An offset that does not fit in a `u64` is rejected as `InvalidArgument`.
pub fn compute_range(
    _total_count: u64,
    page_size: i64,
    current_page: i64,
) -> Result<RowRange, PaginationError> {
    if page_size <= 0 {
        return Err(PaginationError::InvalidArgument {
            name: "page_size",
            value: page_size,
        });
    }
    if current_page <= 0 {
        return Err(PaginationError::InvalidArgument {
            name: "current_page",
            value: current_page,
        });
    }

    let limit = page_size as u64;
    let offset = (current_page as u64 - 1).checked_mul(limit).ok_or(
        PaginationError::InvalidArgument {
            name: "current_page",
            value: current_page,
        },
    )?;
    Ok(RowRange { offset, limit })
}

/// Pager window centred on `current_page`, at most `max_visible` wide.
///
/// A `max_visible` of 0 is treated as 1.
pub fn compute_pager(current_page: u64, total_pages: u64, max_visible: u64) -> PagerModel {
    if total_pages <= 1 {
        return PagerModel::empty(current_page, total_pages);
    }

    let width = max_visible.max(1);
    let mut start = current_page.saturating_sub(width / 2).max(1);
    let end = total_pages.min(start.saturating_add(width - 1));

    // Window hit the right edge (or the page lies past it): slide left.
    if end < start || end - start < width - 1 {
        start = end.saturating_sub(width - 1).max(1);
    }

    PagerModel {
        current_page,
        total_pages,
        visible_pages: (start..=end).collect(),
        show_first_page: start > 1,
        leading_ellipsis: start > 2,
        trailing_ellipsis: end.saturating_add(1) < total_pages,
        show_last_page: end < total_pages,
        has_previous: current_page > 1,
        has_next: current_page < total_pages,
    }
}

/// The inputs of one paginated request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageQuery {
    pub total_count: u64,
    pub page_size: u64,
    pub current_page: u64,
}

impl PageQuery {
    pub fn new(total_count: u64, page_size: u64, current_page: u64) -> Self {
        Self {
            total_count,
            page_size,
            current_page,
        }
    }

    pub fn total_pages(&self) -> u64 {
        total_pages(self.total_count, self.page_size)
    }

    /// Same query with `current_page` clamped into the valid page range.
    pub fn clamped(self) -> Self {
        Self {
            current_page: clamp_page(self.current_page, self.total_pages()),
            ..self
        }
    }

    /// Row window for this query, `None` when there is nothing to fetch.
    pub fn range(&self) -> Result<Option<RowRange>, PaginationError> {
        if self.total_count == 0 {
            return Ok(None);
        }
        compute_range(
            self.total_count,
            to_signed(self.page_size),
            to_signed(self.current_page),
        )
        .map(Some)
    }

    pub fn pager(&self, max_visible: u64) -> PagerModel {
        compute_pager(self.current_page, self.total_pages(), max_visible)
    }
}

fn to_signed(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

// ── Tests ──────────────────────────────────────────────────────
