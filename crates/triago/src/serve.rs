// SPDX-FileCopyrightText: 2026 Triago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `triago serve` command implementation.
//!
//! Builds the provider registry from configuration, wires up the fallback
//! orchestrator, and serves the triage HTTP API until the process stops.

use tracing::info;

use triago_config::{fallback_order, TriagoConfig};
use triago_core::TriagoError;
use triago_fallback::FallbackOrchestrator;
use triago_gateway::{start_server, AppState, ServerConfig};
use triago_providers::build_registry;

/// Runs the `triago serve` command.
pub async fn run_serve(config: TriagoConfig) -> Result<(), TriagoError> {
    init_tracing(&config.agent.log_level);

    info!("starting triago serve");

    let registry = build_registry(&config)?;
    let order = fallback_order(&config);
    info!(
        providers = registry.len(),
        fallback_order = ?order,
        "provider registry initialized"
    );

    let state = AppState::new(FallbackOrchestrator::new(registry), order);
    let server_config = ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
    };

    start_server(&server_config, state).await
}

/// Initializes the tracing subscriber with the given log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("triago={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
