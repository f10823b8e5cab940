//! Expiration Sweep Task
//!
//! Background task that periodically removes expired cached pages.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::SharedCache;

/// Spawns a background task that periodically removes expired pages.
///
/// Expiry is already enforced lazily on lookup; the sweep only reclaims
/// memory. A tick is skipped when the cache lock is taken, so the sweep
/// never makes a request wait.
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
pub fn spawn_cleanup_task(cache: SharedCache, cleanup_interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(
            "Starting cache sweep task with interval of {} ms",
            cleanup_interval.as_millis()
        );

        let mut ticker = tokio::time::interval(cleanup_interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // The first tick completes immediately.
        ticker.tick().await;

        loop {
            ticker.tick().await;

            let removed = match cache.try_write() {
                Ok(mut guard) => guard.cleanup_expired(),
                Err(_) => {
                    debug!("Cache sweep: cache busy, skipping tick");
                    continue;
                }
            };

            if removed > 0 {
                info!("Cache sweep: removed {} expired pages", removed);
            } else {
                debug!("Cache sweep: no expired pages found");
            }
        }
    })
}
