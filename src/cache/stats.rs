//! Cache statistics.

/// Counters kept by an [`LfuCache`](super::LfuCache).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of `get` calls that found an entry
    pub hits: u64,
    /// Number of `get` calls that found nothing
    pub misses: u64,
    /// Number of fresh keys stored
    pub insertions: u64,
    /// Number of entries dropped to make room
    pub evictions: u64,
    /// Number of whole-cache invalidations
    pub clears: u64,
}

impl CacheStats {
    pub(super) fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub(super) fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub(super) fn record_insertion(&mut self) {
        self.insertions += 1;
    }

    pub(super) fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub(super) fn record_clear(&mut self) {
        self.clears += 1;
    }

    /// Fraction of lookups served from the cache; 0.0 before the first lookup.
    #[allow(clippy::cast_precision_loss)]
    pub fn hit_ratio(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
