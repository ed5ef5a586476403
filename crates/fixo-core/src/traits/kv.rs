// SPDX-FileCopyrightText: 2026 Fixo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Key-value storage trait for local persistence backends.

use async_trait::async_trait;

use crate::error::FixoError;

/// Async key-value persistence.
///
/// Values are JSON-serialized strings; callers own the encoding. Writes are
/// wholesale overwrites -- there is no partial update or versioning.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the stored value for `key`, or `None` if absent.
    async fn get(&self, key: &str) -> Result<Option<String>, FixoError>;

    /// Stores `value` under `key`, overwriting any previous value.
    async fn put(&self, key: &str, value: &str) -> Result<(), FixoError>;

    /// Removes `key` if present. Removing an absent key is not an error.
    async fn delete(&self, key: &str) -> Result<(), FixoError>;
}

/// Well-known storage keys used by the session and booking layers.
pub mod keys {
    /// Serialized [`crate::types::UserProfile`].
    pub const USER: &str = "user";
    /// Raw access token string.
    pub const ACCESS_TOKEN: &str = "access_token";
    /// Raw refresh token string.
    pub const REFRESH_TOKEN: &str = "refresh_token";
    /// Serialized [`crate::types::Role`].
    pub const ROLE: &str = "role";
    /// JSON array of job codes awaiting a price-confirmation event.
    pub const PLACED_JOB_CODES: &str = "placed_job_codes";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_constants() {
        assert_eq!(keys::USER, "user");
        assert_eq!(keys::ACCESS_TOKEN, "access_token");
        assert_eq!(keys::REFRESH_TOKEN, "refresh_token");
        assert_eq!(keys::ROLE, "role");
        assert_eq!(keys::PLACED_JOB_CODES, "placed_job_codes");
    }
}
