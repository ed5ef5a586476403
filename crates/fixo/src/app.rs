// SPDX-FileCopyrightText: 2026 Fixo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The assembled marketplace client.
//!
//! [`MarketplaceClient::launch`] wires configuration, local storage, the
//! authenticated REST client, and the realtime connection into one object,
//! restores any persisted session, and resumes the booking watches that
//! were pending when the process last exited. Host applications hold one
//! instance for the process lifetime.

use std::sync::Arc;

use tracing::info;

use fixo_api::{ApiClient, AuthSession};
use fixo_config::{FixoConfig, validate_config};
use fixo_core::{FixoError, KeyValueStore, Role, UserProfile};
use fixo_realtime::RealtimeClient;
use fixo_storage::{Database, PendingConfirmationStore, SessionStore, SqliteStore};

use crate::bookings::{BookingWatch, Bookings};

/// Top-level client handle: session, REST, realtime, bookings.
pub struct MarketplaceClient {
    session: Arc<AuthSession>,
    api: ApiClient,
    realtime: Arc<RealtimeClient>,
    bookings: Bookings,
}

impl MarketplaceClient {
    /// Validates the configuration, opens local storage, restores any
    /// persisted session, starts the realtime connection task, and
    /// re-subscribes every booking still awaiting price confirmation.
    pub async fn launch(config: FixoConfig) -> Result<(Self, Vec<BookingWatch>), FixoError> {
        if let Err(errors) = validate_config(&config) {
            let joined = errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(FixoError::Config(joined));
        }

        let db = if config.storage.database_path == ":memory:" {
            Database::open_in_memory().await?
        } else {
            Database::open(&config.storage.database_path).await?
        };
        let kv: Arc<dyn KeyValueStore> = Arc::new(SqliteStore::new(Arc::new(db)));

        let session = Arc::new(AuthSession::new(SessionStore::new(Arc::clone(&kv))));
        let restored = session.restore().await?;
        info!(restored, "session state loaded");

        let api = ApiClient::new(&config.api, Arc::clone(&session))?;
        let realtime = Arc::new(RealtimeClient::start(config.realtime.clone()));
        let bookings = Bookings::new(
            api.clone(),
            Arc::clone(&realtime),
            PendingConfirmationStore::new(kv),
        );

        let watches = bookings.resume().await?;
        if !watches.is_empty() {
            info!(count = watches.len(), "resumed pending booking watches");
        }

        let client = Self {
            session,
            api,
            realtime,
            bookings,
        };
        Ok((client, watches))
    }

    /// The authenticated REST client.
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// The realtime connection handle.
    pub fn realtime(&self) -> &Arc<RealtimeClient> {
        &self.realtime
    }

    /// The booking pipeline.
    pub fn bookings(&self) -> &Bookings {
        &self.bookings
    }

    /// True when a session (restored or logged in) is present.
    pub fn is_authenticated(&self) -> bool {
        self.session.current().is_some()
    }

    /// The persisted user record, if a session was established.
    pub async fn current_user(&self) -> Result<Option<UserProfile>, FixoError> {
        self.session.store().load_user().await
    }

    /// The persisted role. First launch defaults to customer.
    pub async fn role(&self) -> Result<Role, FixoError> {
        Ok(self
            .session
            .store()
            .load_role()
            .await?
            .unwrap_or(Role::Customer))
    }

    /// Flips between customer and worker mode and persists the choice.
    /// Purely a client-side toggle; the backend is not involved.
    pub async fn toggle_role(&self) -> Result<Role, FixoError> {
        let next = self.role().await?.toggled();
        self.session.store().save_role(next).await?;
        info!(role = %next, "role switched");
        Ok(next)
    }

    /// Shuts down the realtime connection task. Storage closes when the
    /// last store reference drops; every write is awaited at its call
    /// site, so nothing is left pending here.
    pub fn close(self) {
        self.realtime.shutdown();
    }
}
