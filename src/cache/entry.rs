//! Cache Entry Module
//!
//! Defines cached pages with sliding and absolute expiration.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::pagination::PageResult;

// == Expiration Policy ==
/// Expiration windows applied to a cache entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpirationPolicy {
    /// Idle time after the last access before the entry expires
    pub sliding: Duration,
    /// Lifetime from insertion, regardless of access
    pub absolute: Duration,
}

impl ExpirationPolicy {
    /// Creates a new policy.
    pub fn new(sliding: Duration, absolute: Duration) -> Self {
        Self { sliding, absolute }
    }
}

impl Default for ExpirationPolicy {
    fn default() -> Self {
        Self::new(Duration::from_secs(5 * 60), Duration::from_secs(30 * 60))
    }
}

// == Cache Entry ==
/// A cached page plus its expiration metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The cached page, shared with every reader that hits it
    pub value: Arc<PageResult>,
    /// Sliding window measured from `last_access`
    pub sliding: Duration,
    /// Hard deadline after which the entry is never served; `None` when
    /// the window reaches past what `Instant` can represent
    pub absolute_deadline: Option<Instant>,
    /// Time of insertion or of the most recent hit
    pub last_access: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an entry inserted at `now`.
    pub fn new(value: Arc<PageResult>, policy: ExpirationPolicy, now: Instant) -> Self {
        Self {
            value,
            sliding: policy.sliding,
            absolute_deadline: now.checked_add(policy.absolute),
            last_access: now,
        }
    }

    // == Is Expired ==
    /// Checks whether either deadline has passed at `now`.
    ///
    /// Boundary condition: reaching a deadline exactly counts as expired.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        let passed = |deadline: Option<Instant>| deadline.is_some_and(|d| now >= d);
        passed(self.absolute_deadline) || passed(self.sliding_deadline())
    }

    /// Instant at which the sliding window runs out, if representable.
    pub fn sliding_deadline(&self) -> Option<Instant> {
        self.last_access.checked_add(self.sliding)
    }

    // == Touch ==
    /// Records a hit, extending the sliding window (never past the absolute deadline).
    pub fn touch(&mut self, now: Instant) {
        self.last_access = now;
    }

    /// Remaining lifetime at `now`: the earlier of the two deadlines.
    pub fn remaining_at(&self, now: Instant) -> Duration {
        match (self.sliding_deadline(), self.absolute_deadline) {
            (Some(a), Some(b)) => a.min(b).saturating_duration_since(now),
            (Some(d), None) | (None, Some(d)) => d.saturating_duration_since(now),
            (None, None) => Duration::MAX,
        }
    }
}
