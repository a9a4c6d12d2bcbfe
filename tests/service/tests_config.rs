//! Loading `ServiceConfig` from files.

use std::io::Write;

use aas::service::{AasService, ConfigError, ServiceConfig};
use tempfile::Builder;

use crate::helpers::fixtures::chiller_environment;

fn config_file(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
    let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_yaml() {
    let file = config_file(".yaml", "cache_capacity: 2\nmax_time_series_records: 50\n");
    let config = ServiceConfig::load(file.path()).unwrap();
    assert_eq!(config.cache_capacity, 2);
    assert_eq!(config.max_time_series_records, 50);
    assert!(config.cache_enabled);
}

#[test]
fn test_load_json() {
    let file = config_file(".json", r#"{"cache_enabled": false, "debug": true}"#);
    let config = ServiceConfig::load(file.path()).unwrap();
    assert!(!config.cache_enabled);
    assert!(config.debug);
    assert_eq!(config.cache_capacity, 10);
}

#[test]
fn test_unknown_extension() {
    let file = config_file(".toml", "cache_capacity = 2");
    let err = ServiceConfig::load(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::UnsupportedFormat(ref ext) if ext == "toml"));
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = ServiceConfig::load(&dir.path().join("absent.yaml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn test_loaded_config_drives_service() {
    let file = config_file(".yml", "cache_enabled: false\n");
    let config = ServiceConfig::load(file.path()).unwrap();
    let mut svc = AasService::with_config(chiller_environment(), config);
    svc.resolve_path("TechnicalData.Reset").unwrap();
    svc.resolve_path("TechnicalData.Reset").unwrap();
    assert_eq!(svc.stats().walks, 2);
    assert_eq!(svc.cached_paths(), 0);
}
