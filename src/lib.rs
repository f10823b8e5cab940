//! Record Directory - paginated record listings behind a page cache
//!
//! Serves ordered pages of records through a read-through cache that every
//! write invalidates, and ingests bulk writes in independently committed
//! chunks.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod ingest;
pub mod models;
pub mod pagination;
pub mod service;
pub mod store;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use service::DirectoryService;
pub use tasks::spawn_cleanup_task;
