// SPDX-FileCopyrightText: 2026 Triago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for the Triago triage service.
//!
//! Exposes POST /triage-ticket over axum. The handler validates the ticket,
//! hands it to the fallback orchestrator, and maps the outcome (success,
//! non-retryable abort, exhaustion) to HTTP responses. Handler panics are
//! converted to a generic 500 by a catch-panic layer so the service stays
//! available.

pub mod handlers;
pub mod server;

pub use handlers::{ErrorResponse, HealthResponse, TriageResponse};
pub use server::{build_router, start_server, AppState, ServerConfig};
