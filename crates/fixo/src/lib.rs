// SPDX-FileCopyrightText: 2026 Fixo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fixo marketplace client kernel.
//!
//! Assembles the workspace crates into one [`MarketplaceClient`]: layered
//! configuration, SQLite-backed session state, the refresh-aware REST
//! client, the STOMP realtime connection, and the booking pipeline that
//! follows a placed booking to its confirmed price.

pub mod app;
pub mod bookings;
pub mod telemetry;

pub use app::MarketplaceClient;
pub use bookings::{BookingWatch, Bookings, PriceConfirmation};

pub use fixo_api as api;
pub use fixo_config as config;
pub use fixo_realtime as realtime;
pub use fixo_storage as storage;
