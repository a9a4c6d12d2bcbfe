//! # aas-embedded-base
//!
//! Core library for serving an Asset Administration Shell environment:
//! idShort path resolution, lookup caching, and JSON/XML serialization.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! service   → AasService: document + cache + generation, CRUD, modifiers, metrics
//!   ↓
//! serialize → Structural JSON (encode/decode), value-only projection, XML
//!   ↓
//! cache     → LfuCache, CacheStats
//!   ↓
//! path      → Path grammar, resolver, NodeHandle
//!   ↓
//! model     → Environment, Submodel, SubmodelElement, Reference, enums
//!   ↓
//! base      → Primitives (Generation, identifier encoding)
//! ```

// ============================================================================
// MODULES (dependency order: base → model → path → cache → serialize → service)
// ============================================================================

/// Foundation types: Generation, base64url identifiers
pub mod base;

/// Tree model of an environment
pub mod model;

/// Dotted idShort paths: grammar and resolver
pub mod path;

/// Least-frequently-used cache
pub mod cache;

/// Structural JSON, value-only and XML encoders
pub mod serialize;

/// Path-addressed service over one document
pub mod service;

// Re-export foundation types
pub use base::{Generation, decode_identifier, encode_identifier};

// Re-export the entry points most callers need
pub use model::{Environment, NodeRef, Submodel, SubmodelElement};
pub use path::{IdShortPath, Lookup, NodeHandle, PathError};
pub use serialize::{SerializeError, TypedValue, to_structural, to_value_only};
pub use service::{AasError, AasService, SerializationModifier, ServiceConfig, SharedService};
