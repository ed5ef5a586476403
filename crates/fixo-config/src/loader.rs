// SPDX-FileCopyrightText: 2026 Fixo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./fixo.toml` > `~/.config/fixo/fixo.toml` >
//! `/etc/fixo/fixo.toml` with environment variable overrides via the
//! `FIXO_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::FixoConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/fixo/fixo.toml` (system-wide)
/// 3. `~/.config/fixo/fixo.toml` (user XDG config)
/// 4. `./fixo.toml` (local directory)
/// 5. `FIXO_*` environment variables
pub fn load_config() -> Result<FixoConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from TOML content only (no XDG lookup, no env vars).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<FixoConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(FixoConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<FixoConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(FixoConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading.
fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(FixoConfig::default()))
        .merge(Toml::file("/etc/fixo/fixo.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("fixo/fixo.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("fixo.toml"))
        .merge(env_provider())
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `FIXO_API_BASE_URL` must map to
/// `api.base_url`, not `api.base.url`.
fn env_provider() -> Env {
    Env::prefixed("FIXO_").map(|key| {
        // The key arrives in its original case (e.g. "API_BASE_URL").
        let key_str = key.as_str().to_ascii_lowercase();
        let mapped = key_str
            .replacen("api_", "api.", 1)
            .replacen("realtime_", "realtime.", 1)
            .replacen("storage_", "storage.", 1);
        mapped.into()
    })
}
