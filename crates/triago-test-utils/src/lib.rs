// SPDX-FileCopyrightText: 2026 Triago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities shared across Triago crates.

pub mod scripted_provider;

pub use scripted_provider::{sample_result, ScriptedProvider};
