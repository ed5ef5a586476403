// SPDX-FileCopyrightText: 2026 Fixo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared test doubles for the Fixo workspace.

pub mod memory_store;
pub mod stomp_broker;

pub use memory_store::MemoryStore;
pub use stomp_broker::{StompBroker, StompSession};
