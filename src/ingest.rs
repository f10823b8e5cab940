//! Ingestion Batcher
//!
//! Splits bulk writes into fixed-size chunks, commits each chunk as its own
//! store transaction and invalidates the page cache once per bulk call.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::cache::SharedCache;
use crate::error::{DirectoryError, Result};
use crate::models::NewRecord;
use crate::store::RecordStore;

/// Records per chunk when none is configured.
pub const DEFAULT_BATCH_SIZE: usize = 1000;

// == Ingest Progress ==
/// Reported after every committed chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestProgress {
    /// 1-based number of the chunk just committed
    pub batch: usize,
    /// Total number of chunks in this call
    pub batches: usize,
    /// Records committed so far
    pub committed: usize,
    /// Records submitted to this call
    pub total: usize,
}

// == Ingest Summary ==
/// Outcome of a fully successful bulk ingestion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IngestSummary {
    pub inserted: usize,
    pub batches: usize,
    pub elapsed: Duration,
}

// == Ingestion Batcher ==
/// Sequential chunked writer in front of the record store.
///
/// Chunks run one after another; the store is the serialization point.
/// A failed chunk stops the run. Chunks committed before it stay
/// committed, there is no rollback across chunks.
#[derive(Clone)]
pub struct IngestionBatcher {
    store: Arc<dyn RecordStore>,
    cache: SharedCache,
    batch_size: usize,
}

impl IngestionBatcher {
    /// Creates a batcher; a zero `batch_size` falls back to the default.
    pub fn new(store: Arc<dyn RecordStore>, cache: SharedCache, batch_size: usize) -> Self {
        let batch_size = if batch_size == 0 {
            DEFAULT_BATCH_SIZE
        } else {
            batch_size
        };
        Self {
            store,
            cache,
            batch_size,
        }
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Ingests `records`, logging progress after each chunk.
    pub async fn ingest(&self, records: Vec<NewRecord>) -> Result<IngestSummary> {
        self.ingest_with_progress(records, |progress| {
            info!(
                batch = progress.batch,
                batches = progress.batches,
                committed = progress.committed,
                total = progress.total,
                "Saved batch {} of {}",
                progress.batch,
                progress.batches
            );
        })
        .await
    }

    /// Ingests `records`, calling `on_progress` after each committed chunk.
    ///
    /// The cache is invalidated exactly once: after the last chunk, or
    /// before the error is returned if any chunk had already committed.
    pub async fn ingest_with_progress<F>(
        &self,
        mut records: Vec<NewRecord>,
        mut on_progress: F,
    ) -> Result<IngestSummary>
    where
        F: FnMut(IngestProgress) + Send,
    {
        let started = Instant::now();
        let total = records.len();
        let batches = total.div_ceil(self.batch_size);
        let mut committed = 0;

        info!(total, batches, batch_size = self.batch_size, "Starting bulk ingestion");

        for batch in 1..=batches {
            let rest = records.split_off(self.batch_size.min(records.len()));
            let chunk = std::mem::replace(&mut records, rest);

            match self.store.insert_batch(chunk).await {
                Ok(inserted) => {
                    committed += inserted;
                    on_progress(IngestProgress {
                        batch,
                        batches,
                        committed,
                        total,
                    });
                }
                Err(source) => {
                    warn!(batch, committed, error = %source, "Bulk ingestion aborted");
                    if committed > 0 {
                        self.invalidate_cache().await;
                    }
                    return Err(DirectoryError::Ingest {
                        batch,
                        committed,
                        source,
                    });
                }
            }
        }

        self.invalidate_cache().await;

        let elapsed = started.elapsed();
        info!(
            inserted = committed,
            duration_secs = elapsed.as_secs_f64(),
            "Bulk ingestion completed"
        );

        Ok(IngestSummary {
            inserted: committed,
            batches,
            elapsed,
        })
    }

    async fn invalidate_cache(&self) {
        let removed = self.cache.write().await.invalidate_all();
        info!(removed, "Cache invalidated after bulk ingestion");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{ExpirationPolicy, PageCache, PageKey};
    use crate::error::{StoreError, StoreResult};
    use crate::models::Record;
    use crate::pagination::{PageResult, PageWindow};
    use crate::store::InMemoryRecordStore;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::RwLock;

    /// Delegates to an in-memory store but rejects one chunk.
    struct FailingChunkStore {
        inner: InMemoryRecordStore,
        fail_on_call: usize,
        calls: AtomicUsize,
    }

    impl FailingChunkStore {
        fn new(fail_on_call: usize) -> Self {
            Self {
                inner: InMemoryRecordStore::new(),
                fail_on_call,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl RecordStore for FailingChunkStore {
        async fn count(&self) -> StoreResult<u64> {
            self.inner.count().await
        }

        async fn range_read(&self, offset: u64, limit: u32) -> StoreResult<Vec<Record>> {
            self.inner.range_read(offset, limit).await
        }

        async fn insert_one(&self, record: NewRecord) -> StoreResult<Record> {
            self.inner.insert_one(record).await
        }

        async fn insert_batch(&self, records: Vec<NewRecord>) -> StoreResult<usize> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if call == self.fail_on_call {
                return Err(StoreError::Write("transaction aborted".to_string()));
            }
            self.inner.insert_batch(records).await
        }
    }

    fn inputs(n: usize) -> Vec<NewRecord> {
        (0..n)
            .map(|i| NewRecord::new(format!("User {}", i), 30, format!("user{}@example.com", i)))
            .collect()
    }

    fn shared_cache() -> SharedCache {
        Arc::new(RwLock::new(PageCache::new(100, ExpirationPolicy::default())))
    }

    async fn warm(cache: &SharedCache) {
        let key = PageKey::new(1, 10);
        let page = Arc::new(PageResult::new(PageWindow { page: 1, size: 10 }, 0, Vec::new()));
        cache
            .write()
            .await
            .insert(key, page, ExpirationPolicy::default());
    }

    #[tokio::test]
    async fn test_ingest_splits_into_chunks() {
        let store = Arc::new(InMemoryRecordStore::new());
        let cache = shared_cache();
        let batcher = IngestionBatcher::new(store.clone(), cache.clone(), 1000);

        let mut seen = Vec::new();
        let summary = batcher
            .ingest_with_progress(inputs(2500), |p| seen.push(p))
            .await
            .unwrap();

        assert_eq!(summary.inserted, 2500);
        assert_eq!(summary.batches, 3);
        assert_eq!(store.count().await.unwrap(), 2500);
        assert_eq!(
            seen.iter().map(|p| p.committed).collect::<Vec<_>>(),
            vec![1000, 2000, 2500]
        );
        assert!(seen.iter().all(|p| p.batches == 3 && p.total == 2500));
    }

    #[tokio::test]
    async fn test_ingest_invalidates_once() {
        let store = Arc::new(InMemoryRecordStore::new());
        let cache = shared_cache();
        warm(&cache).await;
        let batcher = IngestionBatcher::new(store, cache.clone(), 100);

        batcher.ingest(inputs(1000)).await.unwrap();

        let guard = cache.read().await;
        assert!(guard.is_empty());
        assert_eq!(guard.stats().invalidations, 1);
    }

    #[tokio::test]
    async fn test_partial_commit_on_chunk_failure() {
        let store = Arc::new(FailingChunkStore::new(3));
        let cache = shared_cache();
        warm(&cache).await;
        let batcher = IngestionBatcher::new(store.clone(), cache.clone(), 1000);

        let err = batcher.ingest(inputs(5000)).await.unwrap_err();

        match err {
            DirectoryError::Ingest {
                batch,
                committed,
                source,
            } => {
                assert_eq!(batch, 3);
                assert_eq!(committed, 2000);
                assert!(matches!(source, StoreError::Write(_)));
            }
            other => panic!("unexpected error: {other:?}"),
        }

        // Chunks 1-2 stay committed, chunks 4-5 never ran.
        assert_eq!(store.count().await.unwrap(), 2000);
        assert_eq!(store.calls.load(Ordering::SeqCst), 3);
        // Committed rows must not hide behind cached pages.
        assert!(cache.read().await.is_empty());
    }

    #[tokio::test]
    async fn test_first_chunk_failure_leaves_cache_alone() {
        let store = Arc::new(FailingChunkStore::new(1));
        let cache = shared_cache();
        warm(&cache).await;
        let batcher = IngestionBatcher::new(store, cache.clone(), 10);

        let err = batcher.ingest(inputs(50)).await.unwrap_err();
        assert!(matches!(err, DirectoryError::Ingest { committed: 0, .. }));
        assert_eq!(cache.read().await.len(), 1);
    }

    #[tokio::test]
    async fn test_empty_input() {
        let store = Arc::new(InMemoryRecordStore::new());
        let batcher = IngestionBatcher::new(store, shared_cache(), 0);
        assert_eq!(batcher.batch_size(), DEFAULT_BATCH_SIZE);

        let summary = batcher.ingest(Vec::new()).await.unwrap();
        assert_eq!(summary.inserted, 0);
        assert_eq!(summary.batches, 0);
    }
}
