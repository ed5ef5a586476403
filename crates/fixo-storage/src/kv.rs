// SPDX-FileCopyrightText: 2026 Fixo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! [`KeyValueStore`] implementation over the single-writer SQLite connection.

use std::sync::Arc;

use async_trait::async_trait;
use rusqlite::OptionalExtension;

use fixo_core::{FixoError, KeyValueStore};

use crate::database::Database;

/// SQLite-backed key-value store.
///
/// Cheap to clone; all clones share the one [`Database`] and therefore the
/// one background write thread.
#[derive(Clone)]
pub struct SqliteStore {
    db: Arc<Database>,
}

impl SqliteStore {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl KeyValueStore for SqliteStore {
    async fn get(&self, key: &str) -> Result<Option<String>, FixoError> {
        let key = key.to_owned();
        self.db
            .conn()
            .call(move |conn| -> Result<_, rusqlite::Error> {
                let value = conn
                    .query_row("SELECT value FROM kv WHERE key = ?1", [&key], |row| {
                        row.get(0)
                    })
                    .optional()?;
                Ok(value)
            })
            .await
            .map_err(FixoError::storage)
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), FixoError> {
        let key = key.to_owned();
        let value = value.to_owned();
        self.db
            .conn()
            .call(move |conn| -> Result<_, rusqlite::Error> {
                conn.execute(
                    "INSERT INTO kv (key, value) VALUES (?1, ?2)
                     ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                    [&key, &value],
                )?;
                Ok(())
            })
            .await
            .map_err(FixoError::storage)
    }

    async fn delete(&self, key: &str) -> Result<(), FixoError> {
        let key = key.to_owned();
        self.db
            .conn()
            .call(move |conn| -> Result<_, rusqlite::Error> {
                conn.execute("DELETE FROM kv WHERE key = ?1", [&key])?;
                Ok(())
            })
            .await
            .map_err(FixoError::storage)
    }
}
