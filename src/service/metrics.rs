//! Timing records and path instrumentation.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::Serialize;

/// Counters of the path lookup pipeline.
///
/// `walks` counts tree walks only; a cache hit resolves without one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PathStats {
    pub walks: u64,
    pub cache_hits: u64,
    pub cache_misses: u64,
}

/// Time taken to render the whole environment as structural JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SerializationMetric {
    pub metric: &'static str,
    /// Wall clock at measurement, microseconds since the Unix epoch.
    pub timestamp: u64,
    #[serde(rename = "result")]
    pub elapsed_micros: u64,
    pub json_size: usize,
}

/// Time taken by a single path lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LookupMetric {
    pub metric: &'static str,
    pub timestamp: u64,
    #[serde(rename = "result")]
    pub elapsed_micros: u64,
    #[serde(rename = "lookup_success")]
    pub found: bool,
}

impl SerializationMetric {
    pub(super) fn new(elapsed: Duration, json_size: usize) -> Self {
        Self {
            metric: "json serialization speed",
            timestamp: now_micros(),
            elapsed_micros: micros(elapsed),
            json_size,
        }
    }
}

impl LookupMetric {
    pub(super) fn new(elapsed: Duration, found: bool) -> Self {
        Self {
            metric: "idShortPath lookup speed in us",
            timestamp: now_micros(),
            elapsed_micros: micros(elapsed),
            found,
        }
    }
}

fn micros(duration: Duration) -> u64 {
    u64::try_from(duration.as_micros()).unwrap_or(u64::MAX)
}

fn now_micros() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(micros)
        .unwrap_or_default()
}
