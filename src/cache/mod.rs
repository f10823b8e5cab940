//! Cache Module
//!
//! Page-keyed in-memory cache with sliding/absolute expiration, LRU
//! eviction and generation-tagged full invalidation.

mod entry;
mod key;
mod lru;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

use std::sync::Arc;

use tokio::sync::RwLock;

// Re-export public types
pub use entry::{CacheEntry, ExpirationPolicy};
pub use key::PageKey;
pub use lru::LruTracker;
pub use stats::CacheStats;
pub use store::PageCache;

/// Cache handle shared between request handlers and the sweep task.
pub type SharedCache = Arc<RwLock<PageCache>>;
