// SPDX-FileCopyrightText: 2026 Fixo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed endpoint groups over [`crate::client::ApiClient`].
//!
//! Thin calls: request models in, response models out, no client-side
//! caching or merging. Everything authenticated funnels through the shared
//! refresh-aware request path.

pub mod auth;
pub mod chat;
pub mod jobs;
pub mod notifications;
pub mod quotes;
pub mod services;
pub mod verification;
pub mod wallet;
