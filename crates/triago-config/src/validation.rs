// SPDX-FileCopyrightText: 2026 Triago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as known provider names in the fallback order.

use std::collections::HashSet;
use std::str::FromStr;

use triago_core::ProviderId;

use crate::model::TriagoConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Collects all validation errors rather than failing fast.
pub fn validate_config(config: &TriagoConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if config.server.host.trim().is_empty() {
        errors.push("server.host must not be empty".to_string());
    }

    if !LOG_LEVELS.contains(&config.agent.log_level.as_str()) {
        errors.push(format!(
            "agent.log_level `{}` is not one of: {}",
            config.agent.log_level,
            LOG_LEVELS.join(", ")
        ));
    }

    if config.fallback.order.is_empty() {
        errors.push("fallback.order must list at least one provider".to_string());
    }

    let mut seen = HashSet::new();
    for name in &config.fallback.order {
        if ProviderId::from_str(name).is_err() {
            errors.push(format!(
                "fallback.order entry `{name}` is not a known provider (openai, gemini, grok)"
            ));
        }
        if !seen.insert(name.as_str()) {
            errors.push(format!("fallback.order lists `{name}` more than once"));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Parses the configured fallback order into provider identifiers.
///
/// Call after [`validate_config`]; unparseable entries are skipped here.
pub fn fallback_order(config: &TriagoConfig) -> Vec<ProviderId> {
    config
        .fallback
        .order
        .iter()
        .filter_map(|name| ProviderId::from_str(name).ok())
        .collect()
}
