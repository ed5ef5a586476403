// SPDX-FileCopyrightText: 2026 Fixo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tracing subscriber setup for host applications.

use tracing_subscriber::EnvFilter;

/// Initializes the global tracing subscriber with the given log level.
///
/// `RUST_LOG` takes precedence when set. Call once from the host
/// application; embedding hosts with their own subscriber skip this.
pub fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("fixo={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
