//! Error type for service operations.

use thiserror::Error;

use crate::path::{Miss, PathError};
use crate::serialize::SerializeError;

/// Errors returned by [`AasService`](super::AasService).
///
/// `NotFound` and `InvalidIndex` are expected outcomes of a lookup; the
/// caller turns them into its own "not found" response.
#[derive(Debug, Error)]
pub enum AasError {
    /// The path grammar rejected the input.
    #[error(transparent)]
    MalformedPath(#[from] PathError),

    /// The addressed submodel or element does not exist.
    #[error("Not found: {what}")]
    NotFound { what: String },

    /// A list index was required but missing, out of range, or applied to
    /// something that is not a list.
    #[error("Invalid index at '{segment}'{}", describe_index(.index, .len))]
    InvalidIndex {
        segment: String,
        index: Option<usize>,
        len: Option<usize>,
    },

    /// The XML header discipline was broken. Aborts the operation.
    #[error("Serialization contract violation: {0}")]
    SerializationContractViolation(String),

    /// Encoding or decoding failed.
    #[error(transparent)]
    Serialize(SerializeError),

    /// Operation or modifier combination that is not offered.
    #[error("Unsupported: {0}")]
    Unsupported(String),

    /// The request carried a value the target cannot take.
    #[error("Invalid value: {0}")]
    InvalidValue(String),
}

fn describe_index(index: &Option<usize>, len: &Option<usize>) -> String {
    match (*index, *len) {
        (Some(i), Some(n)) => format!(": index {i} out of range for {n} item(s)"),
        (None, Some(n)) => format!(": list of {n} item(s) needs an index"),
        (Some(i), None) => format!(": index {i} on a node that is not a list"),
        (None, None) => String::new(),
    }
}

impl AasError {
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::Unsupported(message.into())
    }

    pub fn invalid_value(message: impl Into<String>) -> Self {
        Self::InvalidValue(message.into())
    }

    /// Both absence outcomes.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::InvalidIndex { .. })
    }

    /// Caller mistakes, as opposed to absence or internal faults.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::MalformedPath(_) | Self::Unsupported(_) | Self::InvalidValue(_)
        ) || matches!(self, Self::Serialize(SerializeError::Json { .. }))
    }
}

impl From<SerializeError> for AasError {
    fn from(error: SerializeError) -> Self {
        match error {
            SerializeError::ContractViolation(message) => Self::SerializationContractViolation(message),
            other => Self::Serialize(other),
        }
    }
}

impl From<Miss> for AasError {
    fn from(miss: Miss) -> Self {
        match miss {
            Miss::NotFound { segment } => Self::NotFound { what: segment },
            Miss::InvalidIndex {
                segment,
                index,
                len,
            } => Self::InvalidIndex {
                segment,
                index,
                len,
            },
        }
    }
}
