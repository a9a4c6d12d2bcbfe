//! Serialization of the tree model.
//!
//! Two independent encoders walk the same [`NodeRef`](crate::model::NodeRef):
//!
//! ```text
//! NodeRef ──┬── jsonization::to_structural ──▶ serde_json::Value (round-trips)
//!           ├── value_only::to_value_only   ──▶ serde_json::Value (values only)
//!           └── xmlization::XmlSerializer   ──▶ io::Write
//! ```

mod error;
pub mod jsonization;
pub mod lexical;
pub mod value_only;
pub mod xmlization;

pub use error::SerializeError;
pub use jsonization::to_structural;
pub use lexical::TypedValue;
pub use value_only::to_value_only;
pub use xmlization::XmlSerializer;
