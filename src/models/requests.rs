//! Request DTOs for the directory API
//!
//! Defines the structure of incoming HTTP request bodies and query strings.

use serde::Deserialize;

use crate::models::NewRecord;

/// Maximum accepted length of a record name or email.
pub const MAX_FIELD_LENGTH: usize = 256;

/// Request body for POST /api/create-users
pub type CreateRecordRequest = NewRecord;

impl NewRecord {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.name.trim().is_empty() {
            return Some("Name cannot be empty".to_string());
        }
        if self.email.trim().is_empty() {
            return Some("Email cannot be empty".to_string());
        }
        if self.name.len() > MAX_FIELD_LENGTH || self.email.len() > MAX_FIELD_LENGTH {
            return Some(format!(
                "Fields cannot exceed {} characters",
                MAX_FIELD_LENGTH
            ));
        }
        None
    }
}

/// Query string for GET /api/fetch-users
///
/// Out-of-range values are clamped by the pagination engine, not rejected.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    #[serde(default)]
    pub page: Option<i64>,
    #[serde(default)]
    pub page_size: Option<i64>,
}

/// Query string for POST /api/create-bulk-users
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BulkQuery {
    /// Number of records to generate; the configured volume when absent
    #[serde(default)]
    pub count: Option<usize>,
}
