//! Least-frequently-used cache.

use std::hash::Hash;

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use tracing::{debug, trace};

use super::stats::CacheStats;

struct Slot<V> {
    value: V,
    frequency: u64,
}

/// Bounded map evicting the entry with the smallest use count.
///
/// `get` and `put` on an existing key count as a use; `contains` does not.
/// Among entries tied at the minimum count, the earliest inserted goes first.
/// A capacity of zero turns `put` into a no-op.
pub struct LfuCache<K, V> {
    capacity: usize,
    entries: IndexMap<K, Slot<V>, FxBuildHasher>,
    stats: CacheStats,
}

impl<K, V> LfuCache<K, V>
where
    K: Hash + Eq + Clone + std::fmt::Debug,
{
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: IndexMap::with_capacity_and_hasher(capacity, FxBuildHasher),
            stats: CacheStats::default(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Look up `key`, counting it as a use.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        match self.entries.get_mut(key) {
            Some(slot) => {
                slot.frequency += 1;
                self.stats.record_hit();
                trace!("[LFU] hit {:?} (freq {})", key, slot.frequency);
                Some(&slot.value)
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    /// Membership check. Does not touch the use count.
    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Current use count of `key`.
    pub fn frequency(&self, key: &K) -> Option<u64> {
        self.entries.get(key).map(|slot| slot.frequency)
    }

    /// Insert or update. Returns the evicted key, if room had to be made.
    pub fn put(&mut self, key: K, value: V) -> Option<K> {
        if self.capacity == 0 {
            return None;
        }

        if let Some(slot) = self.entries.get_mut(&key) {
            slot.value = value;
            slot.frequency += 1;
            return None;
        }

        let evicted = if self.entries.len() >= self.capacity {
            self.evict_one()
        } else {
            None
        };

        self.entries.insert(key, Slot { value, frequency: 1 });
        self.stats.record_insertion();
        evicted
    }

    fn evict_one(&mut self) -> Option<K> {
        // `min_by_key` keeps the first of equal minima, i.e. the oldest insertion.
        let (index, _) = self
            .entries
            .values()
            .enumerate()
            .min_by_key(|(_, slot)| slot.frequency)?;
        let (key, slot) = self.entries.shift_remove_index(index)?;
        self.stats.record_eviction();
        debug!("[LFU] evicted {:?} (freq {})", key, slot.frequency);
        Some(key)
    }

    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.entries.shift_remove(key).map(|slot| slot.value)
    }

    /// Keep only the entries for which `keep` returns true.
    pub fn retain(&mut self, mut keep: impl FnMut(&K, &V) -> bool) {
        self.entries.retain(|key, slot| keep(key, &slot.value));
    }

    pub fn clear(&mut self) {
        if !self.entries.is_empty() {
            debug!("[LFU] clearing {} entries", self.entries.len());
        }
        self.entries.clear();
        self.stats.record_clear();
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.keys()
    }
}

impl<K, V> std::fmt::Debug for LfuCache<K, V>
where
    K: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LfuCache")
            .field("capacity", &self.capacity)
            .field("keys", &self.entries.keys().collect::<Vec<_>>())
            .field("stats", &self.stats)
            .finish()
    }
}
