// SPDX-FileCopyrightText: 2026 Fixo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Authenticated REST client for the Fixo marketplace backend.
//!
//! One [`client::ApiClient`] per process, sharing one
//! [`session::AuthSession`]. Every authenticated call goes through the same
//! refresh-aware path: bearer token attached, a 401 triggers exactly one
//! coordinated refresh however many requests fail concurrently, and the
//! request is retried once with the fresh token.

pub mod client;
pub mod endpoints;
pub mod envelope;
pub mod session;

pub use client::ApiClient;
pub use envelope::ApiEnvelope;
pub use session::{AuthSession, TokenRefresher};
