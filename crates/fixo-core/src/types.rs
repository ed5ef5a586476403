// SPDX-FileCopyrightText: 2026 Fixo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared across the Fixo workspace.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Backend-issued code identifying a job request (e.g. `JR-20260811-0042`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobCode(pub String);

/// Identifier of a chat room between a customer and a worker.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoomCode(pub String);

/// Identifier of a service category (cleaning, plumbing, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ServiceId(pub String);

macro_rules! string_id_from {
    ($ty:ident) => {
        impl From<String> for $ty {
            fn from(s: String) -> Self {
                Self(s)
            }
        }
        impl From<&str> for $ty {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }
        impl $ty {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id_from!(JobCode);
string_id_from!(RoomCode);
string_id_from!(ServiceId);

impl std::fmt::Display for JobCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::fmt::Display for RoomCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::fmt::Display for ServiceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Client-local UI mode switch. Affects which navigation tree and theme the
/// caller renders; carries no business logic.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Customer,
    Worker,
}

impl Role {
    /// The opposite role, used by the explicit role toggle.
    pub fn toggled(self) -> Role {
        match self {
            Role::Customer => Role::Worker,
            Role::Worker => Role::Customer,
        }
    }
}

/// Access/refresh token pair issued at login and overwritten wholesale on
/// every refresh. At most one valid set exists at a time.
#[derive(Clone)]
pub struct TokenPair {
    access: SecretString,
    refresh: SecretString,
}

impl TokenPair {
    pub fn new(access: impl Into<String>, refresh: impl Into<String>) -> Self {
        Self {
            access: SecretString::from(access.into()),
            refresh: SecretString::from(refresh.into()),
        }
    }

    /// Bearer token attached to authenticated requests.
    pub fn access(&self) -> &str {
        self.access.expose_secret()
    }

    /// Refresh token sent to the refresh endpoint.
    pub fn refresh(&self) -> &str {
        self.refresh.expose_secret()
    }
}

impl std::fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never leak token material through Debug output or logs.
        f.debug_struct("TokenPair")
            .field("access", &"[REDACTED]")
            .field("refresh", &"[REDACTED]")
            .finish()
    }
}

/// The authenticated user, persisted as an opaque record at login and read
/// back on launch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub phone: String,
    pub full_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn role_display_round_trips() {
        for role in [Role::Customer, Role::Worker] {
            let s = role.to_string();
            assert_eq!(Role::from_str(&s).unwrap(), role);
        }
    }

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Customer).unwrap(), "\"customer\"");
        assert_eq!(serde_json::to_string(&Role::Worker).unwrap(), "\"worker\"");
    }

    #[test]
    fn role_toggle_is_involution() {
        assert_eq!(Role::Customer.toggled(), Role::Worker);
        assert_eq!(Role::Worker.toggled().toggled(), Role::Worker);
    }

    #[test]
    fn token_pair_debug_redacts() {
        let tokens = TokenPair::new("acc-123", "ref-456");
        let debug = format!("{tokens:?}");
        assert!(!debug.contains("acc-123"));
        assert!(!debug.contains("ref-456"));
        assert!(debug.contains("REDACTED"));
    }

    #[test]
    fn token_pair_exposes_values() {
        let tokens = TokenPair::new("acc-123", "ref-456");
        assert_eq!(tokens.access(), "acc-123");
        assert_eq!(tokens.refresh(), "ref-456");
    }

    #[test]
    fn user_profile_omits_missing_avatar() {
        let user = UserProfile {
            id: "u1".into(),
            phone: "0912345678".into(),
            full_name: "Nguyen Van A".into(),
            avatar_url: None,
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("avatarUrl"));
        assert!(json.contains("fullName"));
        let parsed: UserProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, user);
    }
}
