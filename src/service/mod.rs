//! The serving layer: one document, its path cache, and typed operations.
//!
//! ```text
//! caller ──▶ AasService ──▶ IdShortPath::parse
//!                 │               │
//!                 │          LfuCache<path, Result<NodeHandle, Miss>>
//!                 │               │ miss
//!                 │          path::locate ──▶ NodeHandle (generation-stamped)
//!                 ▼
//!            Document { environment, generation } ──▶ serialize::*
//! ```
//!
//! Writes go through [`Document`], which bumps the generation; the service
//! clears the cache on every write.

mod config;
mod document;
mod error;
mod host;
mod metrics;
mod modifier;
mod shared;

pub use config::{ConfigError, ServiceConfig};
pub use document::Document;
pub use error::AasError;
pub use host::AasService;
pub use metrics::{LookupMetric, PathStats, SerializationMetric};
pub use modifier::{SerializationModifier, SubmodelKey, SubmodelReference};
pub use shared::SharedService;
