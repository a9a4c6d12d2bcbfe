//! Capacity and eviction properties of `LfuCache`.

use aas::cache::LfuCache;
use rstest::rstest;

/// Fill a cache of `capacity` and give key `i` a use count that varies with `i`.
fn warmed(capacity: usize) -> LfuCache<String, usize> {
    let mut cache = LfuCache::new(capacity);
    for i in 0..capacity {
        cache.put(format!("k{i}"), i);
    }
    for i in 0..capacity {
        for _ in 0..(i * 7 + 3) % 5 {
            cache.get(&format!("k{i}"));
        }
    }
    cache
}

#[rstest]
#[case(1)]
#[case(2)]
#[case(5)]
#[case(10)]
#[case(32)]
fn test_one_over_capacity_keeps_capacity(#[case] capacity: usize) {
    let mut cache = warmed(capacity);

    let min_frequency = cache
        .keys()
        .filter_map(|k| cache.frequency(k))
        .min()
        .unwrap();
    let frequency_of: Vec<(String, u64)> = cache
        .keys()
        .map(|k| (k.clone(), cache.frequency(k).unwrap()))
        .collect();

    let evicted = cache.put("extra".to_string(), usize::MAX).unwrap();

    assert_eq!(cache.len(), capacity);
    assert!(cache.contains(&"extra".to_string()));
    assert!(!cache.contains(&evicted));
    let evicted_frequency = frequency_of
        .iter()
        .find(|(k, _)| *k == evicted)
        .map(|(_, f)| *f)
        .unwrap();
    assert_eq!(evicted_frequency, min_frequency);
}

#[test]
fn test_earliest_of_tied_minimum_is_evicted() {
    let mut cache = LfuCache::new(3);
    cache.put("a", 1);
    cache.put("b", 2);
    cache.put("c", 3);
    cache.get(&"a");

    assert_eq!(cache.put("d", 4), Some("b"));
    assert_eq!(cache.put("e", 5), Some("c"));
    assert_eq!(cache.put("f", 6), Some("d"));
    assert_eq!(cache.stats().evictions, 3);
}

#[test]
fn test_zero_capacity_stays_empty() {
    let mut cache = LfuCache::new(0);
    for i in 0..4 {
        assert_eq!(cache.put(i, i), None);
    }
    assert!(cache.is_empty());
    assert_eq!(cache.get(&1), None);
}
