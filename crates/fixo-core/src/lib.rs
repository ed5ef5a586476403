// SPDX-FileCopyrightText: 2026 Fixo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Fixo client toolkit.
//!
//! This crate provides the shared error type, domain types, input
//! validation, and the storage trait implemented by persistence backends.
//! The higher-level crates (`fixo-api`, `fixo-realtime`, `fixo-storage`)
//! all build on the definitions here.

pub mod error;
pub mod traits;
pub mod types;
pub mod validate;

// Re-export key items at crate root for ergonomic imports.
pub use error::FixoError;
pub use traits::KeyValueStore;
pub use types::{JobCode, Role, RoomCode, ServiceId, TokenPair, UserProfile};
