//! Config environment variable tests
//!
//! These tests verify that Config::from_env() correctly reads and applies
//! environment variable overrides. Note that Config::from_env() also loads
//! from .env file via dotenvy, so these tests focus on override behavior.
//!
//! Tests use #[serial] to prevent race conditions with shared env vars.

use loopbook::config::{Config, LogFormat};
use serial_test::serial;
use std::env;

#[test]
#[serial]
fn test_config_from_env_loads_successfully() {
    let result = Config::from_env();
    assert!(result.is_ok(), "Config::from_env() should always succeed");
}

#[test]
#[serial]
fn test_config_from_env_custom_database() {
    env::set_var("DATABASE_PATH", "/custom/path.db");
    env::set_var("DATABASE_MAX_CONNECTIONS", "10");

    let config = Config::from_env().unwrap();
    assert_eq!(config.database.path.to_str().unwrap(), "/custom/path.db");
    assert_eq!(config.database.max_connections, 10);

    // Restore defaults
    env::set_var("DATABASE_PATH", "./data/loopbook.db");
    env::set_var("DATABASE_MAX_CONNECTIONS", "5");
}

#[test]
#[serial]
fn test_config_from_env_json_log_format() {
    env::set_var("LOG_FORMAT", "json");

    let config = Config::from_env().unwrap();
    assert_eq!(config.logging.format, LogFormat::Json);

    // Restore default
    env::set_var("LOG_FORMAT", "pretty");
}

#[test]
#[serial]
fn test_config_from_env_custom_export_dir() {
    env::set_var("EXPORT_DIR", "/tmp/reports");

    let config = Config::from_env().unwrap();
    assert_eq!(config.export.output_dir.to_str().unwrap(), "/tmp/reports");

    // Restore default
    env::set_var("EXPORT_DIR", "./exports");
}

#[test]
#[serial]
fn test_config_from_env_custom_debounce() {
    env::set_var("AUTOSAVE_DEBOUNCE_MS", "250");

    let config = Config::from_env().unwrap();
    assert_eq!(config.autosave.debounce_ms, 250);

    // Restore default
    env::set_var("AUTOSAVE_DEBOUNCE_MS", "600");
}

#[test]
#[serial]
fn test_config_invalid_numbers_fall_back_to_defaults() {
    env::set_var("DATABASE_MAX_CONNECTIONS", "not-a-number");
    env::set_var("AUTOSAVE_DEBOUNCE_MS", "soon");

    let config = Config::from_env().unwrap();
    assert_eq!(config.database.max_connections, 5);
    assert_eq!(config.autosave.debounce_ms, 600);

    env::set_var("DATABASE_MAX_CONNECTIONS", "5");
    env::set_var("AUTOSAVE_DEBOUNCE_MS", "600");
}
