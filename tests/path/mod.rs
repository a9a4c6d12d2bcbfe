//! Path layer tests
//!
//! - Grammar edge cases against a real document
//! - Resolution scenarios on the chiller fixture
//! - Index bounds on lists

pub mod tests_resolution;
