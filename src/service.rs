//! Directory Service
//!
//! Answers listing and create requests with a read-through,
//! write-invalidate protocol over the page cache and the record store.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::cache::{CacheStats, ExpirationPolicy, PageCache, PageKey, SharedCache};
use crate::config::Config;
use crate::error::{DirectoryError, Result};
use crate::ingest::{IngestSummary, IngestionBatcher};
use crate::models::{generate_records, NewRecord, Record};
use crate::pagination::{paginate, PageLimits, PageResult};
use crate::store::{InMemoryRecordStore, RecordStore, TimedStore};

/// Whether a listing was served from the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    Hit,
    Miss,
}

impl CacheStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheStatus::Hit => "HIT",
            CacheStatus::Miss => "MISS",
        }
    }
}

/// A page of records and where it came from.
#[derive(Debug, Clone)]
pub struct Listing {
    pub page: Arc<PageResult>,
    pub status: CacheStatus,
}

// == Directory Service ==
/// Owns the page cache and composes it with the store and batcher.
///
/// Requests are independent; the cache is the only shared mutable state
/// and its lock is never held across a store call.
#[derive(Clone)]
pub struct DirectoryService {
    store: Arc<dyn RecordStore>,
    cache: SharedCache,
    batcher: IngestionBatcher,
    limits: PageLimits,
    policy: ExpirationPolicy,
}

impl DirectoryService {
    /// Creates a service over `store`, taking ownership of `cache`.
    pub fn new(
        store: Arc<dyn RecordStore>,
        cache: PageCache,
        limits: PageLimits,
        batch_size: usize,
    ) -> Self {
        let policy = cache.default_policy();
        let cache: SharedCache = Arc::new(RwLock::new(cache));
        let batcher = IngestionBatcher::new(Arc::clone(&store), Arc::clone(&cache), batch_size);
        Self {
            store,
            cache,
            batcher,
            limits,
            policy,
        }
    }

    /// Creates a service over `store` using the configured cache and limits.
    pub fn with_store(store: Arc<dyn RecordStore>, config: &Config) -> Self {
        let cache = PageCache::new(config.cache.max_entries, config.cache.policy());
        Self::new(store, cache, config.page_limits(), config.batch_size)
    }

    /// Creates a service backed by a fresh in-memory store with call timeouts.
    pub fn from_config(config: &Config) -> Self {
        let store = TimedStore::new(InMemoryRecordStore::new(), config.store_timeout());
        Self::with_store(Arc::new(store), config)
    }

    /// Shared cache handle, for the background sweep.
    pub fn cache(&self) -> SharedCache {
        Arc::clone(&self.cache)
    }

    pub fn limits(&self) -> PageLimits {
        self.limits
    }

    // == Read ==
    /// Returns page `page` of size `size`, clamping both first.
    ///
    /// On a miss the count and rows come from one store call. The populate
    /// is dropped if a write invalidated the cache while the store was read.
    pub async fn list(&self, page: i64, size: i64) -> Result<Listing> {
        let window = paginate(page, size, self.limits);
        let key = PageKey::from(window);

        let generation = {
            let mut cache = self.cache.write().await;
            if let Some(hit) = cache.get(&key) {
                info!(%key, "Cache hit - returning cached page");
                return Ok(Listing {
                    page: hit,
                    status: CacheStatus::Hit,
                });
            }
            cache.generation()
        };

        info!(%key, "Cache miss - fetching from store");
        let (total, records) = self
            .store
            .page(window.offset(), window.size)
            .await
            .map_err(|e| DirectoryError::store(format!("list {}", key), e))?;

        let result = Arc::new(PageResult::new(window, total, records));
        let stored = self.cache.write().await.insert_if_current(
            key,
            Arc::clone(&result),
            self.policy,
            generation,
        );
        if stored {
            info!(%key, records = result.records.len(), "Cached page");
        } else {
            debug!(%key, "Discarded page read before an invalidation");
        }

        Ok(Listing {
            page: result,
            status: CacheStatus::Miss,
        })
    }

    // == Write One ==
    /// Inserts one record and invalidates every cached page.
    pub async fn create(&self, record: NewRecord) -> Result<Record> {
        let email = record.email.clone();
        let created = self
            .store
            .insert_one(record)
            .await
            .map_err(|e| DirectoryError::store(format!("create record '{}'", email), e))?;

        let removed = self.cache.write().await.invalidate_all();
        info!(id = created.id, name = %created.name, removed, "Created record");
        Ok(created)
    }

    // == Write Bulk ==
    /// Ingests `records` in chunks; the batcher invalidates the cache.
    pub async fn create_bulk(&self, records: Vec<NewRecord>) -> Result<IngestSummary> {
        self.batcher.ingest(records).await
    }

    /// Generates `count` random records and ingests them.
    pub async fn create_generated(&self, count: usize) -> Result<IngestSummary> {
        info!(count, "Starting bulk record creation");
        self.create_bulk(generate_records(count)).await
    }

    // == Clear Cache ==
    /// Drops every cached page. Always succeeds.
    pub async fn clear_cache(&self) -> usize {
        let removed = self.cache.write().await.invalidate_all();
        info!(removed, "Cache cleared");
        removed
    }

    // == Count ==
    /// Total number of records in the store.
    pub async fn count(&self) -> Result<u64> {
        self.store
            .count()
            .await
            .map_err(|e| DirectoryError::store("count records", e))
    }

    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.read().await.stats()
    }

    /// Releases cached pages at shutdown.
    pub async fn shutdown(&self) {
        let removed = self.cache.write().await.invalidate_all();
        info!(removed, "Directory service shut down");
    }
}
