// SPDX-FileCopyrightText: 2026 Triago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Triago ticket-triage service.
//!
//! This crate provides the error taxonomy, common types, and the
//! [`TicketProvider`] trait that all provider adapters implement.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::TriagoError;
pub use traits::TicketProvider;
pub use types::{ProviderId, TriageResult, TriageTicket, UsageRecord};
