//! Service configuration.
//!
//! ```yaml
//! cache_enabled: true
//! cache_capacity: 10
//! debug: false
//! max_time_series_records: 10
//! ```
//!
//! Every key is optional; missing keys take their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Knobs of an [`AasService`](super::AasService).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Memoize path resolutions.
    pub cache_enabled: bool,
    /// Entries kept by the lookup cache. Zero disables insertion.
    pub cache_capacity: usize,
    /// Raise per-request logging from `trace` to `debug`.
    pub debug: bool,
    /// Ring-buffer length used by [`append_record`](super::AasService::append_record).
    pub max_time_series_records: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            cache_enabled: true,
            cache_capacity: 10,
            debug: false,
            max_time_series_records: 10,
        }
    }
}

impl ServiceConfig {
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load from a file; the format follows the extension.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();
        let text = std::fs::read_to_string(path)?;
        match ext.as_str() {
            "yaml" | "yml" => Self::from_yaml_str(&text),
            "json" => Self::from_json_str(&text),
            _ => Err(ConfigError::UnsupportedFormat(ext)),
        }
    }
}

/// Errors while loading a [`ServiceConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported config format: .{0}")]
    UnsupportedFormat(String),
}
