// SPDX-FileCopyrightText: 2026 Fixo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait seams implemented by pluggable backends.

pub mod kv;

pub use kv::KeyValueStore;
