//! Response DTOs for the directory API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::CacheStats;

/// Response body for POST /api/create-bulk-users
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkCreateResponse {
    pub message: String,
    /// Number of records inserted
    pub count: usize,
    /// Wall-clock duration of the ingestion in seconds
    pub duration_seconds: f64,
}

impl BulkCreateResponse {
    /// Creates a new BulkCreateResponse
    pub fn new(count: usize, duration_seconds: f64) -> Self {
        Self {
            message: format!("Successfully created {} records", count),
            count,
            duration_seconds,
        }
    }
}

/// Response body for GET /api/users/count
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountResponse {
    pub total_records: u64,
}

/// Response body for DELETE /api/clear-cache
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    /// Acknowledgement returned after the cache was cleared.
    pub fn cache_cleared(removed: usize) -> Self {
        Self {
            message: format!("Cache cleared successfully ({} entries removed)", removed),
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Number of LRU evictions
    pub evictions: u64,
    /// Number of entries dropped for expiring
    pub expirations: u64,
    /// Number of full invalidations
    pub invalidations: u64,
    /// Number of page reads dropped because a write invalidated the cache first
    pub stale_populates: u64,
    /// Current number of entries in cache
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            expirations: stats.expirations,
            invalidations: stats.invalidations,
            stale_populates: stats.stale_populates,
            total_entries: stats.total_entries,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
