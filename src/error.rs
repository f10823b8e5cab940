//! Error types for the record directory
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Store Error Enum ==
/// Failures reported by a record store adapter.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Store unreachable or the call timed out. Safe to retry with backoff.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Constraint violation or failed transaction. Not retried.
    #[error("store write rejected: {0}")]
    Write(String),
}

impl StoreError {
    /// True for transient failures a caller may retry.
    pub fn is_transient(&self) -> bool {
        matches!(self, StoreError::Unavailable(_))
    }
}

// == Directory Error Enum ==
/// Unified error type for the directory service.
#[derive(Error, Debug)]
pub enum DirectoryError {
    /// A store call failed; `context` names the page or operation.
    #[error("{context}: {source}")]
    Store {
        context: String,
        #[source]
        source: StoreError,
    },

    /// A bulk ingestion chunk failed after `committed` records were stored.
    #[error("batch {batch} failed after {committed} records committed: {source}")]
    Ingest {
        batch: usize,
        committed: usize,
        #[source]
        source: StoreError,
    },

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl DirectoryError {
    /// Attaches request context to a store failure.
    pub fn store(context: impl Into<String>, source: StoreError) -> Self {
        DirectoryError::Store {
            context: context.into(),
            source,
        }
    }

    /// Returns the underlying store failure, if any.
    pub fn store_error(&self) -> Option<&StoreError> {
        match self {
            DirectoryError::Store { source, .. } | DirectoryError::Ingest { source, .. } => {
                Some(source)
            }
            DirectoryError::InvalidRequest(_) => None,
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for DirectoryError {
    fn into_response(self) -> Response {
        let status = match &self {
            DirectoryError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            DirectoryError::Store { source, .. } | DirectoryError::Ingest { source, .. } => {
                match source {
                    StoreError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
                    StoreError::Write(_) => StatusCode::UNPROCESSABLE_ENTITY,
                }
            }
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the directory service.
pub type Result<T> = std::result::Result<T, DirectoryError>;

/// Result type returned by record store adapters.
pub type StoreResult<T> = std::result::Result<T, StoreError>;
