//! Error types for path parsing.

use thiserror::Error;

/// A path the grammar rejects. Caller usage error, never a lookup miss.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("Malformed path '{path}': {reason}")]
    Malformed { path: String, reason: &'static str },
}

impl PathError {
    pub fn malformed(path: impl Into<String>, reason: &'static str) -> Self {
        Self::Malformed {
            path: path.into(),
            reason,
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Self::Malformed { path, .. } => path,
        }
    }
}
