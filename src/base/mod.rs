//! Foundation types shared by every other module.
//!
//! - [`Generation`] - document epoch stamped into cached node handles
//! - [`encode_identifier`], [`decode_identifier`] - URL-safe base64 form of
//!   globally unique identifiers, as presented by API callers
//!
//! This module has NO dependencies on other crate modules.

mod generation;
mod identifier;

pub use generation::Generation;
pub use identifier::{decode_identifier, encode_identifier};
