// SPDX-FileCopyrightText: 2026 Fixo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persisted list of job codes awaiting a price-confirmation event.
//!
//! Appended to when a booking is placed, removed from when the confirmation
//! event is handled or acted upon. The invariant: every code in this list
//! should have an active topic subscription whenever the socket is
//! connected, re-established by replaying the list on every reconnect.
//!
//! All read-modify-write cycles are serialized behind one async mutex, so
//! two call sites registering codes concurrently cannot lose an entry.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, warn};

use fixo_core::traits::kv::keys;
use fixo_core::{FixoError, JobCode, KeyValueStore};

/// De-duplicated, persisted list of pending confirmation job codes.
#[derive(Clone)]
pub struct PendingConfirmationStore {
    store: Arc<dyn KeyValueStore>,
    /// Serializes load-modify-store cycles across clones.
    lock: Arc<Mutex<()>>,
}

impl PendingConfirmationStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            lock: Arc::new(Mutex::new(())),
        }
    }

    /// Registers a job code. Idempotent: registering a code already present
    /// leaves exactly one stored entry.
    ///
    /// Returns `true` if the code was newly added.
    pub async fn register(&self, code: &JobCode) -> Result<bool, FixoError> {
        let _guard = self.lock.lock().await;
        let mut codes = self.load_unlocked().await?;
        if codes.iter().any(|c| c == code) {
            debug!(code = %code, "job code already registered");
            return Ok(false);
        }
        codes.push(code.clone());
        self.store_unlocked(&codes).await?;
        debug!(code = %code, total = codes.len(), "job code registered");
        Ok(true)
    }

    /// Removes a job code after its confirmation event was handled.
    ///
    /// Returns `true` if the code was present.
    pub async fn remove(&self, code: &JobCode) -> Result<bool, FixoError> {
        let _guard = self.lock.lock().await;
        let mut codes = self.load_unlocked().await?;
        let before = codes.len();
        codes.retain(|c| c != code);
        if codes.len() == before {
            return Ok(false);
        }
        self.store_unlocked(&codes).await?;
        debug!(code = %code, remaining = codes.len(), "job code removed");
        Ok(true)
    }

    /// All currently pending codes, in registration order.
    pub async fn all(&self) -> Result<Vec<JobCode>, FixoError> {
        let _guard = self.lock.lock().await;
        self.load_unlocked().await
    }

    async fn load_unlocked(&self) -> Result<Vec<JobCode>, FixoError> {
        let Some(json) = self.store.get(keys::PLACED_JOB_CODES).await? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str(&json) {
            Ok(codes) => Ok(codes),
            Err(e) => {
                // Best effort: a corrupt list is replaced, not fatal.
                warn!(error = %e, "stored job code list is corrupt, resetting");
                Ok(Vec::new())
            }
        }
    }

    async fn store_unlocked(&self, codes: &[JobCode]) -> Result<(), FixoError> {
        let json = serde_json::to_string(codes)
            .map_err(|e| FixoError::Internal(format!("job code serialization failed: {e}")))?;
        self.store.put(keys::PLACED_JOB_CODES, &json).await
    }
}
