//! In-memory record store.

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::models::{NewRecord, Record};
use crate::store::RecordStore;

#[derive(Debug, Default)]
struct Rows {
    /// Records in id order
    records: Vec<Record>,
    /// Lowercased emails, backing the unique constraint
    emails: HashSet<String>,
    next_id: u64,
}

impl Rows {
    fn allocate_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

// == In-Memory Record Store ==
/// Record store held in process memory.
///
/// Ids start at 1 and only grow. Emails are unique ignoring case. One
/// lock guards all rows, so `page` reads count and rows from the same
/// snapshot and a batch is applied entirely or not at all.
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    rows: RwLock<Rows>,
}

impl InMemoryRecordStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn email_key(email: &str) -> String {
    email.trim().to_lowercase()
}

fn slice(records: &[Record], offset: u64, limit: u32) -> Vec<Record> {
    let start = usize::try_from(offset).unwrap_or(usize::MAX);
    records
        .iter()
        .skip(start)
        .take(limit as usize)
        .cloned()
        .collect()
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn count(&self) -> StoreResult<u64> {
        Ok(self.rows.read().await.records.len() as u64)
    }

    async fn range_read(&self, offset: u64, limit: u32) -> StoreResult<Vec<Record>> {
        let rows = self.rows.read().await;
        Ok(slice(&rows.records, offset, limit))
    }

    async fn insert_one(&self, record: NewRecord) -> StoreResult<Record> {
        let mut rows = self.rows.write().await;
        let key = email_key(&record.email);
        if rows.emails.contains(&key) {
            return Err(StoreError::Write(format!(
                "email '{}' already exists",
                record.email
            )));
        }

        let id = rows.allocate_id();
        let record = record.into_record(id, Utc::now());
        rows.emails.insert(key);
        rows.records.push(record.clone());
        debug!(id, "inserted record");
        Ok(record)
    }

    async fn insert_batch(&self, records: Vec<NewRecord>) -> StoreResult<usize> {
        let mut rows = self.rows.write().await;

        // Validate the whole batch before touching any row.
        let mut batch_emails = HashSet::with_capacity(records.len());
        for (position, record) in records.iter().enumerate() {
            let key = email_key(&record.email);
            if rows.emails.contains(&key) || !batch_emails.insert(key) {
                return Err(StoreError::Write(format!(
                    "email '{}' at batch position {} already exists",
                    record.email, position
                )));
            }
        }

        let timestamp = Utc::now();
        let inserted = records.len();
        rows.records.reserve(inserted);
        for record in records {
            let id = rows.allocate_id();
            rows.records.push(record.into_record(id, timestamp));
        }
        rows.emails.extend(batch_emails);
        debug!(inserted, "inserted batch");
        Ok(inserted)
    }

    async fn page(&self, offset: u64, limit: u32) -> StoreResult<(u64, Vec<Record>)> {
        let rows = self.rows.read().await;
        Ok((rows.records.len() as u64, slice(&rows.records, offset, limit)))
    }
}
