// SPDX-FileCopyrightText: 2026 Fixo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layered configuration for the Fixo client toolkit.
//!
//! TOML files (XDG hierarchy) merged with `FIXO_*` environment variables,
//! deserialized into [`model::FixoConfig`] and semantically validated.

pub mod loader;
pub mod model;
pub mod validation;

pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::{ApiConfig, FixoConfig, RealtimeConfig, StorageConfig};
pub use validation::{ConfigError, validate_config};
