//! Record types owned by the record store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// == Record ==
/// A stored record. The identifier and timestamp are assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Store-assigned identifier, unique and monotonically increasing
    pub id: u64,
    pub name: String,
    pub age: u32,
    pub email: String,
    /// Creation time in UTC, set at write time
    pub timestamp: DateTime<Utc>,
}

// == New Record ==
/// Client-supplied fields of a record about to be inserted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewRecord {
    pub name: String,
    pub age: u32,
    pub email: String,
}

impl NewRecord {
    /// Creates a new record input.
    pub fn new(name: impl Into<String>, age: u32, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            age,
            email: email.into(),
        }
    }

    /// Materializes the record with store-assigned fields.
    pub fn into_record(self, id: u64, timestamp: DateTime<Utc>) -> Record {
        Record {
            id,
            name: self.name,
            age: self.age,
            email: self.email,
            timestamp,
        }
    }
}
