//! Timeout decorator for record stores.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;

use crate::error::{StoreError, StoreResult};
use crate::models::{NewRecord, Record};
use crate::store::RecordStore;

// == Timed Store ==
/// Bounds every call on the inner store by `timeout`.
///
/// An elapsed call surfaces as `StoreError::Unavailable`. The inner
/// future is dropped, so an in-flight batch either committed before the
/// deadline or not at all.
#[derive(Debug)]
pub struct TimedStore<S> {
    inner: S,
    timeout: Duration,
}

impl<S: RecordStore> TimedStore<S> {
    pub fn new(inner: S, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    async fn bounded<T>(
        &self,
        operation: &'static str,
        call: impl Future<Output = StoreResult<T>> + Send,
    ) -> StoreResult<T> {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result,
            Err(_) => {
                warn!(operation, timeout_ms = self.timeout.as_millis() as u64, "store call timed out");
                Err(StoreError::Unavailable(format!(
                    "{} timed out after {}ms",
                    operation,
                    self.timeout.as_millis()
                )))
            }
        }
    }
}

#[async_trait]
impl<S: RecordStore> RecordStore for TimedStore<S> {
    async fn count(&self) -> StoreResult<u64> {
        self.bounded("count", self.inner.count()).await
    }

    async fn range_read(&self, offset: u64, limit: u32) -> StoreResult<Vec<Record>> {
        self.bounded("range_read", self.inner.range_read(offset, limit))
            .await
    }

    async fn insert_one(&self, record: NewRecord) -> StoreResult<Record> {
        self.bounded("insert_one", self.inner.insert_one(record)).await
    }

    async fn insert_batch(&self, records: Vec<NewRecord>) -> StoreResult<usize> {
        self.bounded("insert_batch", self.inner.insert_batch(records))
            .await
    }

    async fn page(&self, offset: u64, limit: u32) -> StoreResult<(u64, Vec<Record>)> {
        self.bounded("page", self.inner.page(offset, limit)).await
    }
}
