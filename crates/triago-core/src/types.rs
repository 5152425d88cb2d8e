// SPDX-FileCopyrightText: 2026 Triago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared across the Triago workspace.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::TriagoError;

/// Identifier for an upstream LLM provider.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    Openai,
    Gemini,
    Grok,
}

impl ProviderId {
    /// Human-facing label used in error details ("OpenAI API authentication
    /// failed", etc.).
    pub fn label(&self) -> &'static str {
        match self {
            ProviderId::Openai => "OpenAI",
            ProviderId::Gemini => "Gemini",
            ProviderId::Grok => "Grok",
        }
    }
}

/// A support ticket submitted for triage.
///
/// Immutable; created per request and discarded after the request completes.
/// Only constructible through [`TriageTicket::new`], which enforces the
/// non-empty field checks.
#[derive(Debug, Clone)]
pub struct TriageTicket {
    subject: String,
    body: String,
}

impl TriageTicket {
    /// Creates a ticket, rejecting empty or whitespace-only fields.
    pub fn new(subject: impl Into<String>, body: impl Into<String>) -> Result<Self, TriagoError> {
        let subject = subject.into();
        let body = body.into();
        if subject.trim().is_empty() {
            return Err(TriagoError::Validation(
                "Missing or invalid subject".to_string(),
            ));
        }
        if body.trim().is_empty() {
            return Err(TriagoError::Validation("Missing or invalid body".to_string()));
        }
        Ok(Self { subject, body })
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

/// Token counts and derived cost for one successful provider call.
///
/// Field names serialize in camelCase for wire compatibility with the
/// public triage response shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageRecord {
    pub input_tokens: u64,
    pub output_tokens: u64,
    /// Cost in USD, rounded to 6 fractional digits.
    #[serde(rename = "costUSD")]
    pub cost_usd: f64,
}

/// Normalized triage classification produced by a provider adapter.
///
/// `category` and `priority` are provider-supplied free text; the core
/// deliberately performs no enum validation on them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriageResult {
    pub category: String,
    pub priority: String,
    pub flags: BTreeMap<String, bool>,
    pub usage: UsageRecord,
}
