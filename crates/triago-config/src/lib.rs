// SPDX-FileCopyrightText: 2026 Triago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the Triago triage service.
//!
//! Provides TOML configuration parsing with strict validation
//! (`deny_unknown_fields`), XDG file hierarchy lookup, and environment
//! variable overrides via the `TRIAGO_` prefix.

pub mod loader;
pub mod model;
pub mod validation;

pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::{FallbackConfig, ProviderConfig, ServerConfig, TriagoConfig};
pub use validation::{fallback_order, validate_config};

/// Load configuration from the XDG hierarchy and validate it.
///
/// Returns either a valid `TriagoConfig` or the list of human-readable
/// validation errors.
pub fn load_and_validate() -> Result<TriagoConfig, Vec<String>> {
    match loader::load_config() {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(e) => Err(vec![e.to_string()]),
    }
}
