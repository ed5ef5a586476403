// SPDX-FileCopyrightText: 2026 Fixo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite-backed local persistence for the Fixo client toolkit.
//!
//! One [`database::Database`] per process owns the single write thread;
//! [`kv::SqliteStore`] exposes it as a [`fixo_core::KeyValueStore`], and the
//! typed stores ([`session::SessionStore`], [`pending::PendingConfirmationStore`])
//! layer the session and booking keys on top.

pub mod database;
pub mod kv;
pub mod pending;
pub mod session;

pub use database::Database;
pub use kv::SqliteStore;
pub use pending::PendingConfirmationStore;
pub use session::SessionStore;
