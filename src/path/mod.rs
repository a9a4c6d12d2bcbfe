//! Path grammar and resolution.
//!
//! ```text
//! "TechnicalData.TechnicalProperties.Weight_Kg"
//!        │ parse
//!        ▼
//! IdShortPath [Segment { name, index }]
//!        │ locate
//!        ▼
//! NodeHandle { generation, submodel, route } ──follow──▶ NodeRef
//! ```

mod error;
mod grammar;
mod resolve;

pub use error::PathError;
pub use grammar::{IdShortPath, Segment};
pub use resolve::{Lookup, Miss, NodeHandle, follow, follow_mut, locate, resolve, resolve_submodel};

pub(crate) use resolve::submodel_matches;
