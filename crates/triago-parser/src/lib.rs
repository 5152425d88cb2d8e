// SPDX-FileCopyrightText: 2026 Triago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Extracts a JSON value from a raw model reply.
//!
//! Model replies frequently arrive wrapped in markdown code fences
//! (```` ```json ... ``` ```` or bare ```` ``` ... ``` ````). This module
//! strips a full-string fence when present and then performs a strict
//! JSON parse. Malformed JSON is always a hard failure; there is no
//! lenient or partial recovery.

use std::sync::LazyLock;

use regex::Regex;
use triago_core::TriagoError;

/// Matches a reply whose entire content is one fenced code block, with an
/// optional `json` language tag and an optional single trailing newline
/// before the closing fence.
static CODE_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^```(?:json)?\s*\n?(.*?)\n?```$").expect("static fence regex is valid")
});

/// Parses a model reply into a JSON value, stripping surrounding markdown
/// code fences if present.
pub fn parse_json_reply(raw: &str) -> Result<serde_json::Value, TriagoError> {
    if raw.is_empty() {
        return Err(TriagoError::Parse(
            "Invalid message: expected a non-empty string".to_string(),
        ));
    }

    let mut cleaned = raw.trim();
    if let Some(captures) = CODE_FENCE.captures(cleaned) {
        cleaned = captures
            .get(1)
            .map(|m| m.as_str())
            .unwrap_or_default()
            .trim();
    }

    serde_json::from_str(cleaned).map_err(|_| {
        let prefix: String = raw.chars().take(200).collect();
        TriagoError::Parse(format!(
            "Failed to parse JSON response. Raw message: {prefix}..."
        ))
    })
}
