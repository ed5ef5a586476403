// SPDX-FileCopyrightText: 2026 Fixo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed persistence for session state: tokens, user, and role.
//!
//! Written at login, read on launch, deleted at logout. Tokens are
//! overwritten wholesale on every refresh -- at most one valid set exists at
//! a time.

use std::sync::Arc;

use tracing::{debug, warn};

use fixo_core::traits::kv::keys;
use fixo_core::{FixoError, KeyValueStore, Role, TokenPair, UserProfile};

/// Typed wrapper over a [`KeyValueStore`] for the session keys.
#[derive(Clone)]
pub struct SessionStore {
    store: Arc<dyn KeyValueStore>,
}

impl SessionStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Persists both tokens, replacing any previous pair.
    pub async fn save_tokens(&self, tokens: &TokenPair) -> Result<(), FixoError> {
        self.store.put(keys::ACCESS_TOKEN, tokens.access()).await?;
        self.store.put(keys::REFRESH_TOKEN, tokens.refresh()).await?;
        debug!("session tokens persisted");
        Ok(())
    }

    /// Loads the stored token pair, or `None` if either half is missing.
    pub async fn load_tokens(&self) -> Result<Option<TokenPair>, FixoError> {
        let access = self.store.get(keys::ACCESS_TOKEN).await?;
        let refresh = self.store.get(keys::REFRESH_TOKEN).await?;
        Ok(match (access, refresh) {
            (Some(a), Some(r)) => Some(TokenPair::new(a, r)),
            _ => None,
        })
    }

    /// Persists the authenticated user record.
    pub async fn save_user(&self, user: &UserProfile) -> Result<(), FixoError> {
        let json = serde_json::to_string(user)
            .map_err(|e| FixoError::Internal(format!("user serialization failed: {e}")))?;
        self.store.put(keys::USER, &json).await
    }

    /// Loads the stored user record. A corrupt record is dropped and treated
    /// as absent rather than failing launch.
    pub async fn load_user(&self) -> Result<Option<UserProfile>, FixoError> {
        let Some(json) = self.store.get(keys::USER).await? else {
            return Ok(None);
        };
        match serde_json::from_str(&json) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                warn!(error = %e, "stored user record is corrupt, discarding");
                self.store.delete(keys::USER).await?;
                Ok(None)
            }
        }
    }

    /// Persists the role toggle.
    pub async fn save_role(&self, role: Role) -> Result<(), FixoError> {
        self.store.put(keys::ROLE, &role.to_string()).await
    }

    /// Loads the persisted role, or `None` on first launch.
    pub async fn load_role(&self) -> Result<Option<Role>, FixoError> {
        let Some(raw) = self.store.get(keys::ROLE).await? else {
            return Ok(None);
        };
        match raw.parse() {
            Ok(role) => Ok(Some(role)),
            Err(_) => {
                warn!(raw = %raw, "stored role is not recognized, discarding");
                self.store.delete(keys::ROLE).await?;
                Ok(None)
            }
        }
    }

    /// Clears tokens and user. The role survives logout: it is toggled only
    /// by explicit user action.
    pub async fn clear_session(&self) -> Result<(), FixoError> {
        self.store.delete(keys::ACCESS_TOKEN).await?;
        self.store.delete(keys::REFRESH_TOKEN).await?;
        self.store.delete(keys::USER).await?;
        debug!("session cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::Database;
    use crate::kv::SqliteStore;

    async fn session_store() -> SessionStore {
        let db = Database::open_in_memory().await.unwrap();
        SessionStore::new(Arc::new(SqliteStore::new(Arc::new(db))))
    }

    fn user() -> UserProfile {
        UserProfile {
            id: "u1".into(),
            phone: "0912345678".into(),
            full_name: "Tran Thi B".into(),
            avatar_url: None,
        }
    }

    #[tokio::test]
    async fn tokens_round_trip() {
        let store = session_store().await;
        store
            .save_tokens(&TokenPair::new("acc", "ref"))
            .await
            .unwrap();
        let loaded = store.load_tokens().await.unwrap().unwrap();
        assert_eq!(loaded.access(), "acc");
        assert_eq!(loaded.refresh(), "ref");
    }

    #[tokio::test]
    async fn missing_half_of_token_pair_yields_none() {
        let store = session_store().await;
        assert!(store.load_tokens().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn user_round_trips_and_corrupt_record_discarded() {
        let store = session_store().await;
        store.save_user(&user()).await.unwrap();
        assert_eq!(store.load_user().await.unwrap().unwrap(), user());

        // Sabotage the stored record.
        let db = Database::open_in_memory().await.unwrap();
        let kv = SqliteStore::new(Arc::new(db));
        kv.put(keys::USER, "not json").await.unwrap();
        let broken = SessionStore::new(Arc::new(kv.clone()));
        assert!(broken.load_user().await.unwrap().is_none());
        // Corrupt entry was deleted.
        assert!(kv.get(keys::USER).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn role_persists_across_store_instances() {
        let db = Arc::new(Database::open_in_memory().await.unwrap());
        let first = SessionStore::new(Arc::new(SqliteStore::new(db.clone())));
        first.save_role(Role::Worker).await.unwrap();

        // Fresh wrapper over the same database simulates a relaunch.
        let second = SessionStore::new(Arc::new(SqliteStore::new(db)));
        assert_eq!(second.load_role().await.unwrap(), Some(Role::Worker));
    }

    #[tokio::test]
    async fn clear_session_keeps_role() {
        let store = session_store().await;
        store.save_tokens(&TokenPair::new("a", "r")).await.unwrap();
        store.save_user(&user()).await.unwrap();
        store.save_role(Role::Customer).await.unwrap();

        store.clear_session().await.unwrap();

        assert!(store.load_tokens().await.unwrap().is_none());
        assert!(store.load_user().await.unwrap().is_none());
        assert_eq!(store.load_role().await.unwrap(), Some(Role::Customer));
    }
}
