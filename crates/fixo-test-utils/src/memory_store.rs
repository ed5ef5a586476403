// SPDX-FileCopyrightText: 2026 Fixo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory [`KeyValueStore`] for tests that do not need SQLite.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use fixo_core::{FixoError, KeyValueStore};

/// HashMap-backed store. Clones share the same map.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    inner: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current contents, for assertions.
    pub fn dump(&self) -> HashMap<String, String> {
        self.inner.lock().expect("memory store poisoned").clone()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, FixoError> {
        Ok(self
            .inner
            .lock()
            .expect("memory store poisoned")
            .get(key)
            .cloned())
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), FixoError> {
        self.inner
            .lock()
            .expect("memory store poisoned")
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), FixoError> {
        self.inner
            .lock()
            .expect("memory store poisoned")
            .remove(key);
        Ok(())
    }
}
