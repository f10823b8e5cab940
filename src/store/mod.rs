//! Record Store Adapter
//!
//! Boundary to the authoritative record store. The directory only needs
//! ordered range scans, a count, and transactional inserts.

mod memory;
mod timed;

use async_trait::async_trait;

use crate::error::StoreResult;
use crate::models::{NewRecord, Record};

pub use memory::InMemoryRecordStore;
pub use timed::TimedStore;

// == Record Store ==
/// Operations consumed from the durable record store.
#[async_trait]
pub trait RecordStore: Send + Sync + 'static {
    /// Number of live records.
    async fn count(&self) -> StoreResult<u64>;

    /// Up to `limit` records ordered by id ascending, starting at `offset`.
    /// Empty when `offset` is at or past the end.
    async fn range_read(&self, offset: u64, limit: u32) -> StoreResult<Vec<Record>>;

    /// Inserts one record, returning it with its id and timestamp.
    async fn insert_one(&self, record: NewRecord) -> StoreResult<Record>;

    /// Inserts all records in a single transaction and returns how many
    /// were stored. On failure none of them are stored.
    async fn insert_batch(&self, records: Vec<NewRecord>) -> StoreResult<usize>;

    /// Count and range read for one page.
    ///
    /// The default issues two independent calls, so the count may be torn
    /// from the rows by a concurrent insert. Adapters that can read both
    /// from one snapshot should override it.
    async fn page(&self, offset: u64, limit: u32) -> StoreResult<(u64, Vec<Record>)> {
        let total = self.count().await?;
        let records = self.range_read(offset, limit).await?;
        Ok((total, records))
    }
}
