//! Integration tests for configuration validation

#![allow(clippy::expect_used, clippy::unwrap_used)]

use floodgate_bridge::config::{BridgeConfig, KeyConfig, LoggingConfig, DEFAULT_KEY_FILE};
use floodgate_bridge::error::BridgeError;
use floodgate_bridge::utils::crypto::AesCipher;
use std::path::PathBuf;
use tracing::Level;

#[test]
fn test_default_config_validates() {
    let config = BridgeConfig::default();
    let errors = config.validate();
    assert!(
        errors.is_empty(),
        "Default config should be valid, but got errors: {:?}",
        errors
    );
    assert_eq!(config.key.key_file, PathBuf::from(DEFAULT_KEY_FILE));
}

#[test]
fn test_empty_key_file() {
    let config = BridgeConfig::default_with_overrides(|c| c.key.key_file = PathBuf::new());
    let errors = config.validate();
    assert!(errors.iter().any(|e| e.contains("Key file path cannot be empty")));
}

#[test]
fn test_missing_data_folder() {
    let config = BridgeConfig::default_with_overrides(|c| {
        c.key.data_folder = Some(PathBuf::from("/definitely/not/here"));
    });
    let errors = config.validate();
    assert!(errors.iter().any(|e| e.contains("Data folder does not exist")));
    assert!(config.validate_strict().is_err());
}

#[test]
fn test_resolved_key_path() {
    let key = KeyConfig {
        key_file: PathBuf::from("key.pem"),
        data_folder: Some(PathBuf::from("plugins/floodgate")),
    };
    assert_eq!(
        key.resolved_key_path(),
        PathBuf::from("plugins/floodgate/key.pem")
    );

    let absolute = KeyConfig {
        key_file: PathBuf::from("/etc/floodgate/key.pem"),
        data_folder: Some(PathBuf::from("plugins/floodgate")),
    };
    assert_eq!(
        absolute.resolved_key_path(),
        PathBuf::from("/etc/floodgate/key.pem")
    );
}

#[test]
fn test_logging_requires_output() {
    let logging = LoggingConfig {
        log_to_console: false,
        log_to_file: false,
        ..LoggingConfig::default()
    };
    let errors = logging.validate();
    assert!(errors
        .iter()
        .any(|e| e.contains("At least one logging output")));
}

#[test]
fn test_log_file_path_required() {
    let logging = LoggingConfig {
        log_to_file: true,
        log_file_path: None,
        ..LoggingConfig::default()
    };
    assert!(logging
        .validate()
        .iter()
        .any(|e| e.contains("log_file_path must be specified")));
}

#[test]
fn test_toml_roundtrip() {
    let toml = r#"
        [key]
        key_file = "secret.pem"

        [logging]
        app_name = "limbo"
        log_level = "debug"
        log_to_console = true
        log_to_file = false
        json_format = true
    "#;
    let config = BridgeConfig::from_toml(toml).unwrap();
    assert_eq!(config.key.key_file, PathBuf::from("secret.pem"));
    assert_eq!(config.logging.log_level, Level::DEBUG);
    assert!(config.logging.json_format);

    let example = BridgeConfig::example_config();
    let reparsed = BridgeConfig::from_toml(&example).unwrap();
    assert_eq!(reparsed.key.key_file, PathBuf::from(DEFAULT_KEY_FILE));
}

#[test]
fn test_invalid_log_level_rejected() {
    let toml = r#"
        [logging]
        app_name = "limbo"
        log_level = "loud"
        log_to_console = true
        log_to_file = false
        json_format = false
    "#;
    assert!(matches!(
        BridgeConfig::from_toml(toml),
        Err(BridgeError::ConfigError(_))
    ));
}

#[test]
fn test_save_and_load_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bridge.toml");
    let config = BridgeConfig::default_with_overrides(|c| c.logging.app_name = "saved".into());
    config.save_to_file(&path).unwrap();

    let loaded = BridgeConfig::from_file(&path).unwrap();
    assert_eq!(loaded.logging.app_name, "saved");
}

#[test]
fn test_build_filter_from_key_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("key.pem"), AesCipher::generate_key()).unwrap();

    let config = BridgeConfig::default_with_overrides(|c| {
        c.key.data_folder = Some(dir.path().to_path_buf());
    });
    let filter = config.build_filter().unwrap();
    assert_eq!(filter.resolve_hostname("play.example.com"), "play.example.com");
}

#[test]
fn test_build_filter_bad_key() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("key.pem"), b"too short").unwrap();

    let config = BridgeConfig::default_with_overrides(|c| {
        c.key.data_folder = Some(dir.path().to_path_buf());
    });
    assert!(matches!(
        config.build_filter(),
        Err(BridgeError::KeyMaterial(_))
    ));
}
