// SPDX-FileCopyrightText: 2026 Fixo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! All writes are serialized through tokio-rusqlite's single background
//! thread. Do NOT create additional Connection instances for writes.

use std::path::Path;

use tokio_rusqlite::Connection;
use tracing::debug;

use fixo_core::FixoError;

/// The single SQLite connection owned by the process.
///
/// Wraps one `tokio_rusqlite::Connection`; all store modules accept
/// `&Database` and go through [`Database::conn`], so every write lands on the
/// same background thread.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens (or creates) the database at `path` and applies PRAGMAs and the
    /// key-value schema.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, FixoError> {
        let conn = Connection::open(path.as_ref())
            .await
            .map_err(FixoError::storage)?;
        let db = Self { conn };
        db.initialize().await?;
        debug!(path = %path.as_ref().display(), "database opened");
        Ok(db)
    }

    /// Opens an in-memory database. Used by tests.
    pub async fn open_in_memory() -> Result<Self, FixoError> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(FixoError::storage)?;
        let db = Self { conn };
        db.initialize().await?;
        Ok(db)
    }

    async fn initialize(&self) -> Result<(), FixoError> {
        self.conn
            .call(|conn| -> Result<_, rusqlite::Error> {
                conn.execute_batch(
                    "PRAGMA journal_mode = WAL;
                     PRAGMA synchronous = NORMAL;
                     PRAGMA busy_timeout = 5000;
                     CREATE TABLE IF NOT EXISTS kv (
                         key   TEXT PRIMARY KEY,
                         value TEXT NOT NULL
                     );",
                )?;
                Ok(())
            })
            .await
            .map_err(FixoError::storage)
    }

    /// The underlying connection. Store modules call through this; nothing
    /// else should.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Closes the database, flushing pending writes.
    pub async fn close(self) -> Result<(), FixoError> {
        self.conn
            .close()
            .await
            .map_err(FixoError::storage)
    }
}
