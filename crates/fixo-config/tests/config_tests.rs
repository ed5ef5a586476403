// SPDX-FileCopyrightText: 2026 Fixo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Fixo configuration system.

use fixo_config::{load_config_from_path, load_config_from_str, validate_config};
use serial_test::serial;

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_fixo_config() {
    let toml = r#"
[api]
base_url = "https://backend.test"
timeout_secs = 10

[realtime]
ws_url = "wss://backend.test/ws"
reconnect_delay_secs = 2
channel_capacity = 16

[storage]
database_path = "/tmp/fixo-test.db"
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.api.base_url, "https://backend.test");
    assert_eq!(config.api.timeout_secs, 10);
    assert_eq!(config.realtime.ws_url, "wss://backend.test/ws");
    assert_eq!(config.realtime.reconnect_delay_secs, 2);
    assert_eq!(config.realtime.channel_capacity, 16);
    assert_eq!(config.storage.database_path, "/tmp/fixo-test.db");
    assert!(validate_config(&config).is_ok());
}

/// Unknown field produces a deserialization error mentioning the bad key.
#[test]
fn unknown_field_produces_error() {
    let toml = r#"
[api]
base_uri = "https://backend.test"
"#;

    let err = load_config_from_str(toml).expect_err("should reject unknown field");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("base_uri"),
        "error should mention unknown field or the bad key, got: {err_str}"
    );
}

/// Missing optional sections use defaults without error.
#[test]
fn missing_optional_sections_use_defaults() {
    let config = load_config_from_str("").expect("empty TOML should use defaults");

    assert_eq!(config.api.base_url, "https://api.fixo.example");
    assert_eq!(config.api.timeout_secs, 30);
    assert_eq!(config.realtime.ws_url, "wss://api.fixo.example/ws");
    assert_eq!(config.realtime.reconnect_delay_secs, 5);
    assert_eq!(config.realtime.channel_capacity, 64);
}

/// Environment variable FIXO_API_BASE_URL overrides api.base_url from a file.
#[test]
#[serial]
fn env_var_overrides_toml_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("fixo.toml");
    std::fs::write(
        &path,
        r#"
[api]
base_url = "https://from-file.test"
"#,
    )
    .expect("write config file");

    // SAFETY: serialized by #[serial]; no other thread touches the env here.
    unsafe { std::env::set_var("FIXO_API_BASE_URL", "https://from-env.test") };
    let config = load_config_from_path(&path).expect("config should load");
    unsafe { std::env::remove_var("FIXO_API_BASE_URL") };

    assert_eq!(config.api.base_url, "https://from-env.test");
}

/// Underscore-containing keys map through the env provider unambiguously.
#[test]
#[serial]
fn env_var_maps_underscore_keys() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("fixo.toml");
    std::fs::write(&path, "").expect("write config file");

    unsafe { std::env::set_var("FIXO_REALTIME_RECONNECT_DELAY_SECS", "9") };
    let config = load_config_from_path(&path).expect("config should load");
    unsafe { std::env::remove_var("FIXO_REALTIME_RECONNECT_DELAY_SECS") };

    assert_eq!(config.realtime.reconnect_delay_secs, 9);
}

/// Semantic validation rejects a config that deserialized cleanly.
#[test]
fn validation_rejects_bad_schemes() {
    let toml = r#"
[api]
base_url = "not-a-url"

[realtime]
ws_url = "http://wrong-scheme.test"
"#;
    let config = load_config_from_str(toml).expect("shape is fine");
    let errors = validate_config(&config).expect_err("semantics are not");
    assert_eq!(errors.len(), 2);
}
