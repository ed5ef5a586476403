// SPDX-FileCopyrightText: 2026 Fixo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Fixo client toolkit.

use thiserror::Error;

/// The primary error type used across all Fixo crates.
#[derive(Debug, Error)]
pub enum FixoError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (database open, query failure, serialization).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The backend rejected a request with a business error (`result == false`)
    /// or a non-success HTTP status.
    #[error("api error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Realtime transport errors (connection failure, frame format, send while
    /// disconnected).
    #[error("transport error: {message}")]
    Transport {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Session could not be established or refreshed; stored credentials were
    /// cleared and the caller must re-authenticate.
    #[error("unauthorized: session expired or invalid")]
    Unauthorized,

    /// Client-side input validation failed.
    #[error("validation error: {0}")]
    Validation(String),

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl FixoError {
    /// Wraps an arbitrary error as a storage error.
    pub fn storage<E>(source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        FixoError::Storage {
            source: Box::new(source),
        }
    }

    /// Builds a transport error from a message only.
    pub fn transport(message: impl Into<String>) -> Self {
        FixoError::Transport {
            message: message.into(),
            source: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_includes_context() {
        let api = FixoError::Api {
            status: 400,
            message: "invalid job request".into(),
        };
        assert_eq!(api.to_string(), "api error (400): invalid job request");

        let transport = FixoError::transport("socket closed");
        assert_eq!(transport.to_string(), "transport error: socket closed");
    }

    #[test]
    fn storage_helper_preserves_source() {
        let err = FixoError::storage(std::io::Error::other("disk full"));
        assert!(err.to_string().contains("disk full"));
    }

    #[test]
    fn unauthorized_is_stable_text() {
        // Callers match on this to redirect to login.
        assert_eq!(
            FixoError::Unauthorized.to_string(),
            "unauthorized: session expired or invalid"
        );
    }
}
