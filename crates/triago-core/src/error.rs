// SPDX-FileCopyrightText: 2026 Triago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Triago triage service.

use thiserror::Error;

/// The primary error type used across the Triago workspace.
///
/// Provider errors carry their upstream diagnostic text verbatim so the
/// fallback classifier can keyword-match on it. Adapters must not wrap
/// upstream faults in a way that destroys those keywords.
#[derive(Debug, Error)]
pub enum TriagoError {
    /// Request validation errors (missing or empty fields). Caught at the
    /// HTTP boundary, never reach the orchestrator.
    #[error("{0}")]
    Validation(String),

    /// A provider reply that could not be parsed as JSON.
    #[error("{0}")]
    Parse(String),

    /// Configuration errors (unknown model or provider name, invalid TOML).
    #[error("configuration error: {0}")]
    Config(String),

    /// LLM provider errors (transport faults, API errors, malformed replies).
    #[error("{message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl TriagoError {
    /// Shorthand for a provider error with no underlying source.
    pub fn provider(message: impl Into<String>) -> Self {
        TriagoError::Provider {
            message: message.into(),
            source: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_error_displays_message_verbatim() {
        let err = TriagoError::provider("OpenAI API returned 429: too many requests");
        assert_eq!(
            err.to_string(),
            "OpenAI API returned 429: too many requests"
        );
    }

    #[test]
    fn config_error_is_prefixed() {
        let err = TriagoError::Config("Unknown OpenAI model: gpt-9".into());
        assert!(err.to_string().starts_with("configuration error:"));
    }
}
