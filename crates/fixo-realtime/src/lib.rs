// SPDX-FileCopyrightText: 2026 Fixo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! STOMP-over-WebSocket realtime client for the Fixo marketplace broker.
//!
//! One [`RealtimeClient`] per process. Subscriptions survive reconnects:
//! the registry holds the wanted topics and the connection task re-sends
//! SUBSCRIBE frames after every handshake.

pub mod client;
pub mod frame;
pub mod registry;
pub mod topic;

pub use client::{RealtimeClient, Subscription};
pub use frame::{Command, Frame};
pub use registry::SubscriptionRegistry;
