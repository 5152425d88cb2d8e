// SPDX-FileCopyrightText: 2026 Triago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cost tracking for Triago: per-model price tables and USD cost
//! computation for provider calls.

pub mod pricing;

pub use pricing::{calculate_cost, usage_record, ModelPrice};
