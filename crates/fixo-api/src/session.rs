// SPDX-FileCopyrightText: 2026 Fixo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session manager owning the token pair and the refresh coordination.
//!
//! One `AuthSession` exists per client. A 401 anywhere funnels into
//! [`AuthSession::refresh_after_401`], which holds a single refresh mutex:
//! however many requests fail at once, exactly one refresh call is issued,
//! and every waiter either reuses the refreshed pair or fails together when
//! the refresh fails. A failed refresh clears the persisted session.

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use fixo_core::{FixoError, TokenPair};
use fixo_storage::SessionStore;

/// Performs the actual refresh request against the backend.
///
/// Implemented by [`crate::client::ApiClient`]; a mock implementation is
/// enough to test the coordination in isolation.
#[async_trait]
pub trait TokenRefresher: Send + Sync {
    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, FixoError>;
}

/// Owns the current token pair and serializes refresh attempts.
pub struct AuthSession {
    /// Hot path: every request reads the current pair lock-free.
    tokens: ArcSwapOption<TokenPair>,
    /// Cold path: at most one refresh in flight.
    refresh_lock: Mutex<()>,
    store: SessionStore,
}

impl AuthSession {
    pub fn new(store: SessionStore) -> Self {
        Self {
            tokens: ArcSwapOption::const_empty(),
            refresh_lock: Mutex::new(()),
            store,
        }
    }

    /// The typed persistence layer behind this session.
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Loads previously persisted tokens, if any. Called once at launch.
    pub async fn restore(&self) -> Result<bool, FixoError> {
        match self.store.load_tokens().await? {
            Some(tokens) => {
                self.tokens.store(Some(Arc::new(tokens)));
                debug!("session restored from storage");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// The current token pair, or `None` when logged out.
    pub fn current(&self) -> Option<Arc<TokenPair>> {
        self.tokens.load_full()
    }

    /// Installs and persists a fresh pair (login or refresh).
    pub async fn install(&self, tokens: TokenPair) -> Result<(), FixoError> {
        self.store.save_tokens(&tokens).await?;
        self.tokens.store(Some(Arc::new(tokens)));
        Ok(())
    }

    /// Drops the in-memory pair and clears persisted session state.
    pub async fn clear(&self) -> Result<(), FixoError> {
        self.tokens.store(None);
        self.store.clear_session().await
    }

    /// Coordinated reaction to a 401.
    ///
    /// `stale_access` is the access token the failing request used. The first
    /// caller through the mutex performs the refresh; later callers observe
    /// that the current token already differs from their stale one and reuse
    /// it without another refresh call. If the refresh fails, the session is
    /// cleared and every waiter gets [`FixoError::Unauthorized`].
    pub async fn refresh_after_401(
        &self,
        stale_access: &str,
        refresher: &dyn TokenRefresher,
    ) -> Result<Arc<TokenPair>, FixoError> {
        let _guard = self.refresh_lock.lock().await;

        let current = match self.tokens.load_full() {
            Some(t) => t,
            // A concurrent failed refresh already tore the session down.
            None => return Err(FixoError::Unauthorized),
        };
        if current.access() != stale_access {
            debug!("token already refreshed by concurrent request");
            return Ok(current);
        }

        info!("access token rejected, refreshing session");
        match refresher.refresh(current.refresh()).await {
            Ok(fresh) => {
                self.install(fresh).await?;
                // install() just stored Some.
                self.tokens
                    .load_full()
                    .ok_or_else(|| FixoError::Internal("token pair vanished after install".into()))
            }
            Err(e) => {
                warn!(error = %e, "token refresh failed, clearing session");
                self.clear().await?;
                Err(FixoError::Unauthorized)
            }
        }
    }
}
