// SPDX-FileCopyrightText: 2026 Triago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports the XDG hierarchy: `./triago.toml` > `~/.config/triago/triago.toml`
//! > `/etc/triago/triago.toml`, with environment variable overrides via the
//! `TRIAGO_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::TriagoConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/triago/triago.toml` (system-wide)
/// 3. `~/.config/triago/triago.toml` (user XDG config)
/// 4. `./triago.toml` (local directory)
/// 5. `TRIAGO_*` environment variables
pub fn load_config() -> Result<TriagoConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TriagoConfig::default()))
        .merge(Toml::file("/etc/triago/triago.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("triago/triago.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("triago.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from an inline TOML string (testing and tooling).
pub fn load_config_from_str(toml_content: &str) -> Result<TriagoConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TriagoConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<TriagoConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TriagoConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `TRIAGO_OPENAI_API_KEY` must map to
/// `openai.api_key`, not `openai.api.key`.
fn env_provider() -> Env {
    Env::prefixed("TRIAGO_").map(|key| {
        // `key` is the lowercased env var name with the prefix stripped.
        // Example: TRIAGO_OPENAI_API_KEY -> "openai_api_key"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("agent_", "agent.", 1)
            .replacen("server_", "server.", 1)
            .replacen("openai_", "openai.", 1)
            .replacen("gemini_", "gemini.", 1)
            .replacen("grok_", "grok.", 1)
            .replacen("fallback_", "fallback.", 1);
        mapped.into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_toml_overrides_defaults() {
        let config = load_config_from_str(
            r#"
            [server]
            port = 8080

            [openai]
            api_key = "sk-test"
            "#,
        )
        .unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.openai.api_key.as_deref(), Some("sk-test"));
        // Untouched sections keep defaults.
        assert_eq!(config.agent.log_level, "info");
    }

    #[test]
    fn fallback_order_configurable() {
        let config = load_config_from_str(
            r#"
            [fallback]
            order = ["grok", "openai"]
            "#,
        )
        .unwrap();
        assert_eq!(config.fallback.order, vec!["grok", "openai"]);
    }
}
