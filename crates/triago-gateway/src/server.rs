// SPDX-FileCopyrightText: 2026 Triago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Triage HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state.

use std::any::Any;
use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;

use triago_core::{ProviderId, TriagoError};
use triago_fallback::{codes, FallbackOrchestrator};

use crate::handlers::{self, ErrorResponse};

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Provider fallback orchestrator.
    pub orchestrator: Arc<FallbackOrchestrator>,
    /// Configured provider order for every triage request.
    pub fallback_order: Arc<Vec<ProviderId>>,
    /// Process start time for uptime reporting.
    pub start_time: std::time::Instant,
}

impl AppState {
    pub fn new(orchestrator: FallbackOrchestrator, fallback_order: Vec<ProviderId>) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
            fallback_order: Arc::new(fallback_order),
            start_time: std::time::Instant::now(),
        }
    }
}

/// Builds the service router.
///
/// The panic layer turns handler panics into a generic JSON 500 rather
/// than a dropped connection, so the service stays available and callers
/// still receive a machine `code`.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/triage-ticket", post(handlers::post_triage_ticket))
        .route("/health", get(handlers::get_health))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(CatchPanicLayer::custom(handle_panic))
}

/// Maps a handler panic to the standard error response shape.
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let details = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic".to_string()
    };
    tracing::error!(error = %details, "unexpected panic in request handler");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: "LLM provider failed or returned invalid response".to_string(),
            code: codes::LLM_PROVIDER_FAILED,
            details: Some(details),
        }),
    )
        .into_response()
}

/// Server bind configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

/// Binds to the configured host:port and serves the triage API until the
/// process is stopped.
pub async fn start_server(config: &ServerConfig, state: AppState) -> Result<(), TriagoError> {
    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| TriagoError::Internal(format!("failed to bind to {addr}: {e}")))?;

    tracing::info!("Triage server listening on {addr}");

    axum::serve(listener, app)
        .await
        .map_err(|e| TriagoError::Internal(format!("server error: {e}")))?;

    Ok(())
}
