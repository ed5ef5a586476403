// SPDX-FileCopyrightText: 2026 Fixo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as URL schemes and positive delays.

use thiserror::Error;

use crate::model::FixoConfig;

/// A configuration validation error.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A semantic constraint on a config value failed.
    #[error("invalid configuration: {message}")]
    Validation { message: String },
}

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &FixoConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let base_url = config.api.base_url.trim();
    if base_url.is_empty() {
        errors.push(ConfigError::Validation {
            message: "api.base_url must not be empty".to_string(),
        });
    } else if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
        errors.push(ConfigError::Validation {
            message: format!("api.base_url `{base_url}` must start with http:// or https://"),
        });
    }

    if config.api.timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "api.timeout_secs must be positive".to_string(),
        });
    }

    let ws_url = config.realtime.ws_url.trim();
    if ws_url.is_empty() {
        errors.push(ConfigError::Validation {
            message: "realtime.ws_url must not be empty".to_string(),
        });
    } else if !ws_url.starts_with("ws://") && !ws_url.starts_with("wss://") {
        errors.push(ConfigError::Validation {
            message: format!("realtime.ws_url `{ws_url}` must start with ws:// or wss://"),
        });
    }

    if config.realtime.reconnect_delay_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "realtime.reconnect_delay_secs must be positive".to_string(),
        });
    }

    if config.realtime.channel_capacity == 0 {
        errors.push(ConfigError::Validation {
            message: "realtime.channel_capacity must be positive".to_string(),
        });
    }

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
