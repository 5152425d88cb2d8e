// SPDX-FileCopyrightText: 2026 Triago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Keyword-based provider error classification.
//!
//! Classification is ordered substring matching over the lower-cased error
//! text: the first matching rule in [`ERROR_RULES`] wins, so the table
//! order is the precedence order. Keeping the rules declarative makes the
//! precedence auditable rule-by-rule.
//!
//! [`is_retryable`] is a separate, independently maintained check.
//! Classification determines the *reported* error kind; retryability
//! determines *orchestration* behavior. The two keyword lists overlap
//! (e.g. "model" appears in both) and are intentionally not unified.

use serde::Serialize;

use triago_core::TriagoError;

/// Stable machine codes returned in API error responses.
pub mod codes {
    pub const MISSING_SUBJECT_OR_BODY: &str = "MISSING_SUBJECT_OR_BODY";
    pub const LLM_PROVIDER_FAILED: &str = "LLM_PROVIDER_FAILED";
    pub const NETWORK_ERROR: &str = "NETWORK_ERROR";
    pub const AUTHENTICATION_ERROR: &str = "AUTHENTICATION_ERROR";
    pub const RATE_LIMIT_ERROR: &str = "RATE_LIMIT_ERROR";
    pub const INVALID_MODEL_ERROR: &str = "INVALID_MODEL_ERROR";
    pub const INVALID_RESPONSE_ERROR: &str = "INVALID_RESPONSE_ERROR";
    pub const MISSING_USAGE_DATA_ERROR: &str = "MISSING_USAGE_DATA_ERROR";
    pub const QUOTA_ERROR: &str = "QUOTA_ERROR";
}

/// Structured description of a classified provider failure.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorDescriptor {
    /// HTTP status to surface.
    pub status: u16,
    /// Stable machine token for programmatic branching.
    pub code: &'static str,
    /// Human summary.
    pub message: &'static str,
    /// Free-text diagnostics; may embed upstream error text.
    pub details: String,
}

/// One classification rule: any keyword hit selects this descriptor.
struct ErrorRule {
    keywords: &'static [&'static str],
    code: &'static str,
    message: &'static str,
    details: fn(provider_label: &str, error_text: &str) -> String,
}

/// Classification rules in priority order; the first match wins.
static ERROR_RULES: &[ErrorRule] = &[
    ErrorRule {
        keywords: &["network", "connection", "timeout", "econnrefused", "enotfound"],
        code: codes::NETWORK_ERROR,
        message: "Network error occurred while connecting to the LLM provider",
        details: |provider, _| {
            format!("Failed to connect to {provider} API. Please check your network connection.")
        },
    },
    ErrorRule {
        keywords: &["api key", "authentication", "unauthorized", "401", "invalid api key"],
        code: codes::AUTHENTICATION_ERROR,
        message: "API authentication failed",
        details: |provider, _| {
            format!("{provider} API authentication failed. Please check your API key.")
        },
    },
    ErrorRule {
        keywords: &["rate limit", "429", "too many requests"],
        code: codes::RATE_LIMIT_ERROR,
        message: "API rate limit exceeded",
        details: |provider, _| {
            format!("{provider} API rate limit exceeded. Please try again later.")
        },
    },
    ErrorRule {
        keywords: &["model", "not found", "404", "unknown"],
        code: codes::INVALID_MODEL_ERROR,
        message: "Invalid or unsupported model",
        details: |_, error_text| error_text.to_string(),
    },
    ErrorRule {
        keywords: &["json", "parse", "invalid response", "syntaxerror"],
        code: codes::INVALID_RESPONSE_ERROR,
        message: "LLM provider returned an invalid response format",
        details: |provider, _| format!("{provider} returned an invalid response format."),
    },
    ErrorRule {
        keywords: &["usage", "metadata"],
        code: codes::MISSING_USAGE_DATA_ERROR,
        message: "LLM provider did not return usage/token information",
        details: |provider, _| {
            format!("{provider} did not return usage/token information.")
        },
    },
    ErrorRule {
        keywords: &["quota", "billing", "insufficient", "payment"],
        code: codes::QUOTA_ERROR,
        message: "API quota exceeded or billing issue",
        details: |provider, _| format!("{provider} API quota exceeded or billing issue."),
    },
];

/// Error text fragments that make a failure non-retryable on their own.
const NON_RETRYABLE_KEYWORDS: &[&str] =
    &["api key", "authentication", "unauthorized", "401", "invalid api key"];

/// Fragments that, combined with "model", indicate a bad model name.
const MODEL_UNKNOWN_KEYWORDS: &[&str] = &["not found", "404", "unknown"];

/// Maps an arbitrary provider failure to a structured [`ErrorDescriptor`].
///
/// Falls through to a generic `LLM_PROVIDER_FAILED` descriptor embedding
/// the provider label and raw error text when no rule matches.
pub fn classify(error: &TriagoError, provider_label: &str) -> ErrorDescriptor {
    let raw = error.to_string();
    let lowered = raw.to_lowercase();

    for rule in ERROR_RULES {
        if rule.keywords.iter().any(|k| lowered.contains(k)) {
            return ErrorDescriptor {
                status: 500,
                code: rule.code,
                message: rule.message,
                details: (rule.details)(provider_label, &raw),
            };
        }
    }

    ErrorDescriptor {
        status: 500,
        code: codes::LLM_PROVIDER_FAILED,
        message: "LLM provider failed or returned invalid response",
        details: format!("{provider_label} error: {raw}"),
    }
}

/// Decides whether a failure is worth retrying with a different provider.
///
/// Only authentication failures and bad-model failures are non-retryable:
/// they would fail identically against every provider. Everything else,
/// including response-shape and usage-metadata faults, might succeed with
/// another backend.
pub fn is_retryable(error: &TriagoError) -> bool {
    let lowered = error.to_string().to_lowercase();

    if NON_RETRYABLE_KEYWORDS.iter().any(|k| lowered.contains(k)) {
        return false;
    }
    if lowered.contains("model") && MODEL_UNKNOWN_KEYWORDS.iter().any(|k| lowered.contains(k)) {
        return false;
    }
    true
}
