//! Error types for the encoders and the structural decoder.

use thiserror::Error;

/// Errors raised while encoding or decoding a tree.
#[derive(Debug, Error)]
pub enum SerializeError {
    /// XML serialization error.
    #[error("XML error: {0}")]
    Xml(String),

    /// Structural decoding error at a JSON location.
    #[error("JSON error at {path}: {message}")]
    Json { path: String, message: String },

    /// The one-time namespace header was written already and the document was
    /// sealed; the caller broke the write discipline.
    #[error("Serialization contract violation: {0}")]
    ContractViolation(String),

    /// IO error while writing to the sink.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SerializeError {
    pub fn xml(message: impl Into<String>) -> Self {
        Self::Xml(message.into())
    }

    pub fn json(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Json {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn contract_violation(message: impl Into<String>) -> Self {
        Self::ContractViolation(message.into())
    }

    pub fn is_contract_violation(&self) -> bool {
        matches!(self, Self::ContractViolation(_))
    }
}
