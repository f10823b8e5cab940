//! Configuration Module
//!
//! Handles loading and managing service configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;

use crate::cache::ExpirationPolicy;
use crate::pagination::{PageLimits, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// Page cache options.
///
/// Deserializes from `{slidingMinutes, absoluteMinutes, maxEntries}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CacheConfig {
    /// Refresh-on-access TTL in minutes
    pub sliding_minutes: u64,
    /// Hard ceiling in minutes
    pub absolute_minutes: u64,
    /// Eviction bound
    pub max_entries: usize,
}

/// Longest window a cached page may live, one year.
pub const MAX_WINDOW_MINUTES: u64 = 365 * 24 * 60;

fn minutes(value: u64) -> Duration {
    Duration::from_secs(value.min(MAX_WINDOW_MINUTES).saturating_mul(60))
}

impl CacheConfig {
    /// Expiration windows for cached pages, capped at `MAX_WINDOW_MINUTES`.
    pub fn policy(&self) -> ExpirationPolicy {
        ExpirationPolicy::new(
            minutes(self.sliding_minutes),
            minutes(self.absolute_minutes),
        )
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            sliding_minutes: 5,
            absolute_minutes: 30,
            max_entries: 1000,
        }
    }
}

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    pub cache: CacheConfig,
    /// Page size used when the requested size is below 1
    pub default_page_size: u32,
    /// Largest servable page size
    pub max_page_size: u32,
    /// Records per ingestion chunk
    pub batch_size: usize,
    /// Records generated by the bulk endpoint
    pub bulk_record_count: usize,
    /// Largest count a bulk request may ask for
    pub max_bulk_record_count: usize,
    /// Per-call store timeout in milliseconds
    pub store_timeout_ms: u64,
    /// Background sweep interval in seconds
    pub cleanup_interval: u64,
    /// HTTP server port
    pub server_port: u16,
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_SLIDING_MINUTES` - Sliding expiration (default: 5)
    /// - `CACHE_ABSOLUTE_MINUTES` - Absolute expiration (default: 30)
    /// - `CACHE_MAX_ENTRIES` - Maximum cached pages (default: 1000)
    /// - `DEFAULT_PAGE_SIZE` - Fallback page size (default: 100)
    /// - `MAX_PAGE_SIZE` - Page size ceiling (default: 1000)
    /// - `INGEST_BATCH_SIZE` - Records per ingestion chunk (default: 1000)
    /// - `BULK_RECORD_COUNT` - Records per bulk request (default: 10000)
    /// - `BULK_MAX_COUNT` - Bulk request ceiling (default: `BULK_RECORD_COUNT`)
    /// - `STORE_TIMEOUT_MS` - Store call timeout (default: 5000)
    /// - `CLEANUP_INTERVAL` - Sweep frequency in seconds (default: 60)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let bulk_record_count = env_or("BULK_RECORD_COUNT", defaults.bulk_record_count);
        Self {
            cache: CacheConfig {
                sliding_minutes: env_or("CACHE_SLIDING_MINUTES", defaults.cache.sliding_minutes),
                absolute_minutes: env_or(
                    "CACHE_ABSOLUTE_MINUTES",
                    defaults.cache.absolute_minutes,
                ),
                max_entries: env_or("CACHE_MAX_ENTRIES", defaults.cache.max_entries),
            },
            default_page_size: env_or("DEFAULT_PAGE_SIZE", defaults.default_page_size),
            max_page_size: env_or("MAX_PAGE_SIZE", defaults.max_page_size),
            batch_size: env_or("INGEST_BATCH_SIZE", defaults.batch_size),
            bulk_record_count,
            max_bulk_record_count: env_or("BULK_MAX_COUNT", bulk_record_count),
            store_timeout_ms: env_or("STORE_TIMEOUT_MS", defaults.store_timeout_ms),
            cleanup_interval: env_or("CLEANUP_INTERVAL", defaults.cleanup_interval),
            server_port: env_or("SERVER_PORT", defaults.server_port),
        }
    }

    pub fn page_limits(&self) -> PageLimits {
        PageLimits::new(self.default_page_size, self.max_page_size)
    }

    pub fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store_timeout_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache: CacheConfig::default(),
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
            batch_size: 1000,
            bulk_record_count: 10_000,
            max_bulk_record_count: 10_000,
            store_timeout_ms: 5000,
            cleanup_interval: 60,
            server_port: 3000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.cache.sliding_minutes, 5);
        assert_eq!(config.cache.absolute_minutes, 30);
        assert_eq!(config.cache.max_entries, 1000);
        assert_eq!(config.page_limits(), PageLimits::new(100, 1000));
        assert_eq!(config.batch_size, 1000);
        assert_eq!(config.bulk_record_count, 10_000);
        assert_eq!(config.max_bulk_record_count, 10_000);
        assert_eq!(config.store_timeout(), Duration::from_secs(5));
        assert_eq!(config.server_port, 3000);
    }

    #[test]
    fn test_config_from_env_defaults() {
        env::remove_var("CACHE_SLIDING_MINUTES");
        env::remove_var("CACHE_MAX_ENTRIES");
        env::remove_var("INGEST_BATCH_SIZE");
        env::remove_var("SERVER_PORT");

        let config = Config::from_env();
        assert_eq!(config.cache.sliding_minutes, 5);
        assert_eq!(config.cache.max_entries, 1000);
        assert_eq!(config.batch_size, 1000);
        assert_eq!(config.server_port, 3000);
    }

    #[test]
    fn test_cache_config_policy() {
        let policy = CacheConfig::default().policy();
        assert_eq!(policy.sliding, Duration::from_secs(300));
        assert_eq!(policy.absolute, Duration::from_secs(1800));
    }

    #[test]
    fn test_huge_windows_are_capped() {
        let config = CacheConfig {
            sliding_minutes: u64::MAX,
            absolute_minutes: u64::MAX,
            max_entries: 10,
        };
        let policy = config.policy();
        let year = Duration::from_secs(MAX_WINDOW_MINUTES * 60);
        assert_eq!(policy.sliding, year);
        assert_eq!(policy.absolute, year);
    }

    #[test]
    fn test_bulk_ceiling_follows_bulk_count() {
        env::set_var("BULK_RECORD_COUNT", "250");
        env::remove_var("BULK_MAX_COUNT");
        let config = Config::from_env();
        env::remove_var("BULK_RECORD_COUNT");

        assert_eq!(config.bulk_record_count, 250);
        assert_eq!(config.max_bulk_record_count, 250);
    }

    #[test]
    fn test_cache_config_recognized_options() {
        let json = r#"{"slidingMinutes": 2, "absoluteMinutes": 10, "maxEntries": 50}"#;
        let config: CacheConfig = serde_json::from_str(json).unwrap();
        assert_eq!(
            config,
            CacheConfig {
                sliding_minutes: 2,
                absolute_minutes: 10,
                max_entries: 50,
            }
        );

        let partial: CacheConfig = serde_json::from_str(r#"{"maxEntries": 7}"#).unwrap();
        assert_eq!(partial.sliding_minutes, 5);
        assert_eq!(partial.max_entries, 7);
    }
}
