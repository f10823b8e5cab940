//! Property-Based Tests for Cache Module

use proptest::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use crate::cache::{ExpirationPolicy, PageCache, PageKey};
use crate::pagination::{PageResult, PageWindow};

// == Test Configuration ==
const TEST_MAX_ENTRIES: usize = 100;

fn policy() -> ExpirationPolicy {
    ExpirationPolicy::new(Duration::from_secs(300), Duration::from_secs(1800))
}

fn page_for(key: PageKey, total: u64) -> Arc<PageResult> {
    Arc::new(PageResult::new(
        PageWindow {
            page: key.page,
            size: key.size,
        },
        total,
        Vec::new(),
    ))
}

// == Strategies ==
fn key_strategy() -> impl Strategy<Value = PageKey> {
    (1u32..50, 1u32..=1000).prop_map(|(page, size)| PageKey::new(page, size))
}

#[derive(Debug, Clone)]
enum CacheOp {
    Insert { key: PageKey, total: u64 },
    Get { key: PageKey },
    InvalidateAll,
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        4 => (key_strategy(), 0u64..10_000).prop_map(|(key, total)| CacheOp::Insert { key, total }),
        4 => key_strategy().prop_map(|key| CacheOp::Get { key }),
        1 => Just(CacheOp::InvalidateAll),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Hit and miss counters match the observed outcomes of every lookup.
    #[test]
    fn prop_statistics_accuracy(ops in prop::collection::vec(cache_op_strategy(), 1..60)) {
        let mut cache = PageCache::new(TEST_MAX_ENTRIES, policy());
        let mut expected_hits = 0u64;
        let mut expected_misses = 0u64;

        for op in ops {
            match op {
                CacheOp::Insert { key, total } => cache.insert(key, page_for(key, total), policy()),
                CacheOp::Get { key } => match cache.get(&key) {
                    Some(_) => expected_hits += 1,
                    None => expected_misses += 1,
                },
                CacheOp::InvalidateAll => {
                    cache.invalidate_all();
                }
            }
        }

        let stats = cache.stats();
        prop_assert_eq!(stats.hits, expected_hits);
        prop_assert_eq!(stats.misses, expected_misses);
        prop_assert_eq!(stats.total_entries, cache.len());
    }

    // The most recent insert for a key is what a later lookup returns,
    // unless an invalidation intervened.
    #[test]
    fn prop_matches_model(ops in prop::collection::vec(cache_op_strategy(), 1..60)) {
        let mut cache = PageCache::new(TEST_MAX_ENTRIES, policy());
        let mut model = std::collections::HashMap::new();

        for op in ops {
            match op {
                CacheOp::Insert { key, total } => {
                    cache.insert(key, page_for(key, total), policy());
                    model.insert(key, total);
                }
                CacheOp::Get { key } => {
                    let got = cache.get(&key).map(|page| page.total_records);
                    prop_assert_eq!(got, model.get(&key).copied());
                }
                CacheOp::InvalidateAll => {
                    cache.invalidate_all();
                    model.clear();
                }
            }
        }
    }

    // The cache never holds more than its configured bound.
    #[test]
    fn prop_capacity_enforcement(keys in prop::collection::vec(key_strategy(), 1..200)) {
        let max_entries = 20;
        let mut cache = PageCache::new(max_entries, policy());

        for key in keys {
            cache.insert(key, page_for(key, 1), policy());
            prop_assert!(cache.len() <= max_entries);
        }
    }

    // Filling to capacity and inserting a new key evicts the first key.
    #[test]
    fn prop_lru_eviction_order(
        initial in prop::collection::vec(key_strategy(), 3..12),
        new_key in key_strategy()
    ) {
        let mut seen = HashSet::new();
        let unique: Vec<PageKey> = initial.into_iter().filter(|k| seen.insert(*k)).collect();
        prop_assume!(unique.len() >= 2);
        prop_assume!(!unique.contains(&new_key));

        let mut cache = PageCache::new(unique.len(), policy());
        for key in &unique {
            cache.insert(*key, page_for(*key, 1), policy());
        }
        cache.insert(new_key, page_for(new_key, 1), policy());

        prop_assert_eq!(cache.len(), unique.len());
        prop_assert!(!cache.contains(&unique[0]));
        prop_assert!(cache.contains(&new_key));
    }

    // Nothing inserted before an invalidation is visible after it, and
    // populates tagged with the old generation are rejected.
    #[test]
    fn prop_invalidation_hides_everything(keys in prop::collection::vec(key_strategy(), 1..50)) {
        let mut cache = PageCache::new(TEST_MAX_ENTRIES, policy());
        for key in &keys {
            cache.insert(*key, page_for(*key, 1), policy());
        }
        let before = cache.generation();

        cache.invalidate_all();

        for key in &keys {
            prop_assert!(cache.get(key).is_none());
            prop_assert!(!cache.insert_if_current(*key, page_for(*key, 2), policy(), before));
        }
        prop_assert!(cache.is_empty());
    }
}
