// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::cache::CacheExt;
use crate::clock::FakeClock;

fn test_cache(max_size: usize) -> (MemoryCache<FakeClock>, FakeClock) {
    let clock = FakeClock::new();
    let config = CacheConfig::new()
        .with_timeout(Duration::from_secs(60))
        .with_max_size(max_size);
    (MemoryCache::with_clock(config, clock.clone()), clock)
}

#[test]
fn missing_key_is_not_found() {
    let (cache, _) = test_cache(10);
    assert_eq!(cache.retrieve::<String>("key1").unwrap(), None);
    assert!(!cache.contains("key1").unwrap());
}

#[test]
fn store_then_retrieve_before_expiry() {
    let (cache, clock) = test_cache(10);

    let stored = cache
        .store("key1", "value1".to_string(), Some(Duration::from_millis(250)))
        .unwrap();
    assert_eq!(stored, "value1");

    clock.advance(Duration::from_millis(100));
    assert_eq!(
        cache.retrieve::<String>("key1").unwrap(),
        Some("value1".to_string())
    );
}

#[test]
fn value_expires_after_ttl() {
    let (cache, clock) = test_cache(10);
    cache
        .store("key1", "value1", Some(Duration::from_millis(250)))
        .unwrap();

    clock.advance(Duration::from_millis(500));

    assert_eq!(cache.retrieve::<String>("key1").unwrap(), None);
    // Expired entry is dropped on read
    assert_eq!(cache.len(), 0);
}

#[test]
fn zero_or_missing_ttl_uses_default_timeout() {
    let (cache, clock) = test_cache(10);
    cache.store("a", 1, None).unwrap();
    cache.store("b", 2, Some(Duration::ZERO)).unwrap();

    clock.advance(Duration::from_secs(59));
    assert!(cache.contains("a").unwrap());
    assert!(cache.contains("b").unwrap());

    clock.advance(Duration::from_secs(2));
    assert!(!cache.contains("a").unwrap());
    assert!(!cache.contains("b").unwrap());
}

#[test]
fn restore_replaces_value_and_extends_expiry() {
    let (cache, clock) = test_cache(10);
    cache.store("k", "old", Some(Duration::from_secs(1))).unwrap();

    clock.advance(Duration::from_millis(900));
    cache.store("k", "new", Some(Duration::from_secs(1))).unwrap();

    clock.advance(Duration::from_millis(900));
    assert_eq!(cache.retrieve::<String>("k").unwrap(), Some("new".to_string()));
}

#[test]
fn retrieve_returns_detached_copy() {
    let (cache, _) = test_cache(10);
    let mut original = vec![1, 2, 3];
    cache.store("list", &original, None).unwrap();

    original.push(4);
    let mut first: Vec<i32> = cache.retrieve("list").unwrap().unwrap_or_default();
    first.push(5);

    let second: Vec<i32> = cache.retrieve("list").unwrap().unwrap_or_default();
    assert_eq!(second, vec![1, 2, 3]);
}

#[test]
fn remove_and_clear() {
    let (cache, _) = test_cache(10);
    cache.store("a", 1, None).unwrap();
    cache.store("b", 2, None).unwrap();

    cache.remove("a").unwrap();
    assert!(!cache.contains("a").unwrap());
    assert!(cache.contains("b").unwrap());

    cache.clear();
    assert!(cache.is_empty());
}

#[test]
fn empty_key_is_rejected() {
    let (cache, _) = test_cache(10);
    assert!(matches!(cache.store("", 1, None), Err(CacheError::EmptyKey)));
    assert!(matches!(cache.retrieve::<i32>(""), Err(CacheError::EmptyKey)));
    assert!(matches!(cache.contains(""), Err(CacheError::EmptyKey)));
    assert!(matches!(cache.remove(""), Err(CacheError::EmptyKey)));
}

#[test]
fn decode_failure_is_serialization_error() {
    let (cache, _) = test_cache(10);
    cache.store("k", "not a number", None).unwrap();

    assert!(matches!(
        cache.retrieve::<u64>("k"),
        Err(CacheError::Serialization(_))
    ));
    // Entry survives a failed decode
    assert!(cache.contains("k").unwrap());
}

#[test]
fn unserializable_value_leaves_entry_untouched() {
    use std::collections::HashMap;

    let (cache, _) = test_cache(10);
    cache.store("k", "kept", None).unwrap();

    // JSON object keys must be strings
    let mut bad = HashMap::new();
    bad.insert(vec![1u8], 1);
    assert!(matches!(
        cache.store("k", bad, None),
        Err(CacheError::Serialization(_))
    ));
    assert_eq!(cache.retrieve::<String>("k").unwrap(), Some("kept".to_string()));
}

#[test]
fn overflow_sweeps_expired_entries_first() {
    let (cache, clock) = test_cache(2);
    cache.store("short1", 1, Some(Duration::from_secs(1))).unwrap();
    cache.store("short2", 2, Some(Duration::from_secs(1))).unwrap();

    clock.advance(Duration::from_secs(2));
    cache.store("fresh", 3, Some(Duration::from_secs(10))).unwrap();

    assert_eq!(cache.len(), 1);
    assert!(cache.contains("fresh").unwrap());
}

#[test]
fn overflow_evicts_soonest_expiring_entry() {
    let (cache, _) = test_cache(2);
    cache.store("long", 1, Some(Duration::from_secs(100))).unwrap();
    cache.store("soon", 2, Some(Duration::from_secs(5))).unwrap();
    cache.store("medium", 3, Some(Duration::from_secs(50))).unwrap();

    assert_eq!(cache.len(), 2);
    assert!(!cache.contains("soon").unwrap());
    assert!(cache.contains("long").unwrap());
    assert!(cache.contains("medium").unwrap());
}

#[test]
fn ttl_beyond_clock_range_never_expires() {
    let (cache, clock) = test_cache(10);
    cache.store("forever", 1, Some(Duration::MAX)).unwrap();
    cache.store("forever", 2, Some(Duration::MAX)).unwrap();

    clock.advance(Duration::from_secs(10 * 365 * 24 * 3600));
    assert_eq!(cache.retrieve::<i32>("forever").unwrap(), Some(2));
}

#[test]
fn never_expiring_entry_is_evicted_last() {
    let (cache, _) = test_cache(2);
    cache.store("forever", 1, Some(Duration::MAX)).unwrap();
    cache.store("soon", 2, Some(Duration::from_secs(5))).unwrap();
    cache.store("medium", 3, Some(Duration::from_secs(50))).unwrap();

    assert!(cache.contains("forever").unwrap());
    assert!(cache.contains("medium").unwrap());
    assert!(!cache.contains("soon").unwrap());
}

#[test]
fn zero_max_size_disables_cap() {
    let (cache, _) = test_cache(0);
    for i in 0..50 {
        cache.store(&format!("k{}", i), i, None).unwrap();
    }
    assert_eq!(cache.len(), 50);
}

#[test]
fn configures_from_params() {
    let params = ParameterBag::from_tuples([("options.timeout", "250"), ("options.max_size", "5")]);
    let cache = MemoryCache::from_params(&params);
    assert_eq!(cache.config().timeout, Duration::from_millis(250));
    assert_eq!(cache.config().max_size, 5);
}

#[test]
fn concurrent_stores_respect_capacity() {
    use std::sync::Arc;

    let cache = Arc::new(MemoryCache::with_config(CacheConfig::new().with_max_size(16)));
    let handles: Vec<_> = (0..8)
        .map(|t| {
            let cache = Arc::clone(&cache);
            std::thread::spawn(move || {
                for i in 0..100 {
                    let _ = cache.store(&format!("t{}-{}", t, i), i, None);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    assert!(cache.len() <= 16);
}

mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn never_exceeds_max_size_after_store(
            max_size in 1usize..8,
            ops in proptest::collection::vec((0u8..32, 1u64..100, 0u64..50), 1..60)
        ) {
            let (cache, clock) = test_cache(max_size);
            for (key, ttl_ms, advance_ms) in ops {
                clock.advance(Duration::from_millis(advance_ms));
                cache
                    .store(&format!("k{}", key), key, Some(Duration::from_millis(ttl_ms)))
                    .unwrap();
                prop_assert!(cache.len() <= max_size);
            }
        }
    }
}
