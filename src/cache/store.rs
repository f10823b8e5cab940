//! Page Cache Module
//!
//! Bounded page cache combining HashMap storage with LRU tracking,
//! sliding/absolute expiration and generation-tagged invalidation.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use crate::cache::{CacheEntry, CacheStats, ExpirationPolicy, LruTracker, PageKey};
use crate::pagination::PageResult;

// == Page Cache ==
/// Read-through cache of listing pages.
///
/// Lookups never fail: absence, expiry and invalidation all surface as a
/// miss. Every `invalidate_all` bumps `generation`, and populates tagged
/// with an older generation are discarded, so a page read from the store
/// before a write can never be cached after that write's invalidation.
#[derive(Debug)]
pub struct PageCache {
    /// Cached pages by key
    entries: HashMap<PageKey, CacheEntry>,
    /// LRU access tracker
    lru: LruTracker,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    max_entries: usize,
    /// Expiration applied by `insert` callers that have no override
    default_policy: ExpirationPolicy,
    /// Incremented by every invalidation
    generation: u64,
}

impl PageCache {
    // == Constructor ==
    /// Creates a new PageCache with specified capacity and expiration policy.
    pub fn new(max_entries: usize, default_policy: ExpirationPolicy) -> Self {
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            stats: CacheStats::new(),
            max_entries,
            default_policy,
            generation: 0,
        }
    }

    /// Policy used for entries populated by the directory service.
    pub fn default_policy(&self) -> ExpirationPolicy {
        self.default_policy
    }

    /// Current invalidation generation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    // == Get ==
    /// Returns the cached page, or `None` on a miss.
    ///
    /// A hit refreshes the sliding window and the LRU position. An expired
    /// entry is removed and counted as a miss.
    pub fn get(&mut self, key: &PageKey) -> Option<Arc<PageResult>> {
        self.get_at(key, Instant::now())
    }

    pub(crate) fn get_at(&mut self, key: &PageKey, now: Instant) -> Option<Arc<PageResult>> {
        let expired = match self.entries.get_mut(key) {
            Some(entry) if !entry.is_expired_at(now) => {
                entry.touch(now);
                let value = Arc::clone(&entry.value);
                self.lru.touch(*key);
                self.stats.record_hit();
                return Some(value);
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            self.remove_entry(key);
            self.stats.record_expirations(1);
        }
        self.stats.record_miss();
        None
    }

    // == Insert ==
    /// Stores a page, overwriting any existing entry for the key.
    ///
    /// If the cache is at capacity, least recently used entries are evicted.
    pub fn insert(&mut self, key: PageKey, value: Arc<PageResult>, policy: ExpirationPolicy) {
        self.insert_at(key, value, policy, Instant::now());
    }

    /// Stores a page only if no invalidation happened since `generation`
    /// was observed. Returns whether the page was stored.
    pub fn insert_if_current(
        &mut self,
        key: PageKey,
        value: Arc<PageResult>,
        policy: ExpirationPolicy,
        generation: u64,
    ) -> bool {
        if generation != self.generation {
            self.stats.record_stale_populate();
            return false;
        }
        self.insert(key, value, policy);
        true
    }

    pub(crate) fn insert_at(
        &mut self,
        key: PageKey,
        value: Arc<PageResult>,
        policy: ExpirationPolicy,
        now: Instant,
    ) {
        if self.max_entries == 0 {
            return;
        }

        let is_overwrite = self.entries.contains_key(&key);
        while !is_overwrite && self.entries.len() >= self.max_entries {
            match self.lru.evict_oldest() {
                Some(evicted) => {
                    self.entries.remove(&evicted);
                    self.stats.record_eviction();
                }
                None => break,
            }
        }

        self.entries.insert(key, CacheEntry::new(value, policy, now));
        self.lru.touch(key);
        self.stats.set_total_entries(self.entries.len());
    }

    // == Invalidate All ==
    /// Drops every entry and advances the generation.
    ///
    /// Returns the number of entries dropped.
    pub fn invalidate_all(&mut self) -> usize {
        let removed = self.entries.len();
        self.entries.clear();
        self.lru.clear();
        self.generation = self.generation.wrapping_add(1);
        self.stats.record_invalidation();
        self.stats.set_total_entries(0);
        removed
    }

    // == Cleanup Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup_expired(&mut self) -> usize {
        self.cleanup_expired_at(Instant::now())
    }

    pub(crate) fn cleanup_expired_at(&mut self, now: Instant) -> usize {
        let expired_keys: Vec<PageKey> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired_at(now))
            .map(|(key, _)| *key)
            .collect();

        for key in &expired_keys {
            self.remove_entry(key);
        }

        self.stats.record_expirations(expired_keys.len());
        expired_keys.len()
    }

    fn remove_entry(&mut self, key: &PageKey) {
        self.entries.remove(key);
        self.lru.remove(key);
        self.stats.set_total_entries(self.entries.len());
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Checks for a live entry without touching it.
    pub fn contains(&self, key: &PageKey) -> bool {
        self.entries
            .get(key)
            .is_some_and(|entry| !entry.is_expired_at(Instant::now()))
    }
}
