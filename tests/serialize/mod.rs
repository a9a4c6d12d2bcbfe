//! Serialization tests
//!
//! - Structural JSON round trips through the decoder
//! - Value-only projection of the fixtures
//! - XML formatting rules on whole documents

pub mod tests_value_only;
pub mod tests_xml;
