//! Lookup caching.
//!
//! A small frequency-weighted cache sized for embedded targets: a handful of
//! entries, linear eviction scan, no background maintenance.

mod lfu;
mod stats;

pub use lfu::LfuCache;
pub use stats::CacheStats;
