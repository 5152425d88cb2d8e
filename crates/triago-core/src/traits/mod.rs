// SPDX-FileCopyrightText: 2026 Triago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait definitions implemented by adapter crates.

pub mod provider;

pub use provider::TicketProvider;
