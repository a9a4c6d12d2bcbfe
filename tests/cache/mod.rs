//! Lookup cache tests
//!
//! - Capacity bound and eviction choice over several sizes

pub mod tests_eviction;
