//! Pagination Engine
//!
//! Clamps requested page coordinates and builds the page envelope.
//!
//! Out-of-range inputs are corrected rather than rejected: a page below 1
//! becomes 1, a size below 1 becomes the default size, and a size above
//! the maximum becomes the maximum. When the store is empty the envelope
//! reports `total_pages == 0`, even though page 1 is still served (empty).

use serde::Serialize;

use crate::models::Record;

/// Page size used when the requested size is below 1.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Largest page size a caller may request.
pub const MAX_PAGE_SIZE: u32 = 1000;

// == Page Limits ==
/// Default and maximum page sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimits {
    pub default_size: u32,
    pub max_size: u32,
}

impl PageLimits {
    /// Creates limits, keeping `default_size` within `1..=max_size`.
    pub fn new(default_size: u32, max_size: u32) -> Self {
        let max_size = max_size.max(1);
        Self {
            default_size: default_size.clamp(1, max_size),
            max_size,
        }
    }
}

impl Default for PageLimits {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE)
    }
}

// == Page Window ==
/// A clamped (page, size) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// Page number, starting at 1
    pub page: u32,
    /// Page size in `1..=max_size`
    pub size: u32,
}

impl PageWindow {
    /// Number of records preceding this page.
    pub fn offset(&self) -> u64 {
        (u64::from(self.page) - 1) * u64::from(self.size)
    }
}

// == Paginate ==
/// Clamps a requested page and size into a servable window.
pub fn paginate(requested_page: i64, requested_size: i64, limits: PageLimits) -> PageWindow {
    let page = if requested_page < 1 {
        1
    } else {
        u32::try_from(requested_page).unwrap_or(u32::MAX)
    };

    let size = if requested_size < 1 {
        limits.default_size
    } else if requested_size > i64::from(limits.max_size) {
        limits.max_size
    } else {
        requested_size as u32
    };

    PageWindow { page, size }
}

/// Returns `ceil(total / size)`; zero records means zero pages.
pub fn total_pages(total: u64, size: u32) -> u64 {
    if size == 0 {
        return 0;
    }
    total.div_ceil(u64::from(size))
}

// == Page Result ==
/// One page of records, ordered by identifier ascending.
///
/// Never mutated after construction; writes invalidate it instead.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResult {
    pub page: u32,
    pub page_size: u32,
    /// Record count at query time
    pub total_records: u64,
    pub total_pages: u64,
    pub records: Vec<Record>,
}

impl PageResult {
    /// Builds the envelope for `window` from a store snapshot.
    pub fn new(window: PageWindow, total_records: u64, records: Vec<Record>) -> Self {
        Self {
            page: window.page,
            page_size: window.size,
            total_records,
            total_pages: total_pages(total_records, window.size),
            records,
        }
    }
}
