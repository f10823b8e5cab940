//! Page Key Module
//!
//! Typed cache key for one page of the record listing.

use std::fmt;

use crate::pagination::PageWindow;

// == Page Key ==
/// Identifies a cached page by its clamped coordinates.
///
/// A tagged struct rather than a concatenated string, so (1, 23) and
/// (12, 3) can never alias the same slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageKey {
    pub page: u32,
    pub size: u32,
}

impl PageKey {
    /// Creates a new PageKey.
    pub fn new(page: u32, size: u32) -> Self {
        Self { page, size }
    }
}

impl From<PageWindow> for PageKey {
    fn from(window: PageWindow) -> Self {
        Self::new(window.page, window.size)
    }
}

impl fmt::Display for PageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "page={} size={}", self.page, self.size)
    }
}
