// SPDX-FileCopyrightText: 2026 Triago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Triago service.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup.

use serde::{Deserialize, Serialize};

/// Top-level Triago configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides. All sections are optional and default to sensible
/// values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TriagoConfig {
    /// Service identity and logging settings.
    #[serde(default)]
    pub agent: AgentConfig,

    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// OpenAI provider settings.
    #[serde(default)]
    pub openai: ProviderConfig,

    /// Gemini provider settings.
    #[serde(default)]
    pub gemini: ProviderConfig,

    /// Grok provider settings.
    #[serde(default)]
    pub grok: ProviderConfig,

    /// Provider fallback settings.
    #[serde(default)]
    pub fallback: FallbackConfig,
}

/// Service identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name of the service.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_agent_name() -> String {
    "triago".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

/// Per-provider API configuration.
///
/// `model` and `base_url` of `None` mean "use the provider's built-in
/// default". A missing API key is not a startup error; the resulting
/// authentication failure surfaces (and classifies) at call time.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderConfig {
    /// API key for the provider.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model override; must be in the provider's catalog.
    #[serde(default)]
    pub model: Option<String>,

    /// API base URL override (primarily for tests).
    #[serde(default)]
    pub base_url: Option<String>,
}

/// Provider fallback configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FallbackConfig {
    /// Providers to try, in order.
    #[serde(default = "default_fallback_order")]
    pub order: Vec<String>,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            order: default_fallback_order(),
        }
    }
}

fn default_fallback_order() -> Vec<String> {
    vec![
        "openai".to_string(),
        "gemini".to_string(),
        "grok".to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_expected_values() {
        let config = TriagoConfig::default();
        assert_eq!(config.agent.name, "triago");
        assert_eq!(config.agent.log_level, "info");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.fallback.order, vec!["openai", "gemini", "grok"]);
        assert!(config.openai.api_key.is_none());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result: Result<TriagoConfig, _> =
            toml::from_str("[agent]\nname = \"x\"\nbogus_key = 1\n");
        assert!(result.is_err());
    }
}
