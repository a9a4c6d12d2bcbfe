//! Service tests
//!
//! - Submodel and element operations with every modifier
//! - Cache instrumentation and invalidation on writes
//! - Time-series ring buffer
//! - Configuration loading

pub mod tests_config;
pub mod tests_service;
