//! Record and transport models
//!
//! Domain records plus the DTOs used for serializing/deserializing
//! HTTP request and response bodies.

pub mod generator;
pub mod record;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use generator::generate_records;
pub use record::{NewRecord, Record};
pub use requests::{BulkQuery, CreateRecordRequest, ListQuery};
pub use responses::{
    BulkCreateResponse, CountResponse, HealthResponse, MessageResponse, StatsResponse,
};
