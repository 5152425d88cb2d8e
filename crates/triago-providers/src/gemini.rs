// SPDX-FileCopyrightText: 2026 Triago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Google Gemini provider adapter.
//!
//! Gemini does not speak the chat-completions dialect; it uses the
//! `generateContent` REST endpoint with `x-goog-api-key` auth and reports
//! token counts under `usageMetadata` instead of `usage`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use tracing::debug;

use triago_core::{ProviderId, TicketProvider, TriageResult, TriageTicket, TriagoError};
use triago_cost::ModelPrice;
use triago_parser::parse_json_reply;

use crate::catalog::{build_result, lookup_model};
use crate::prompt::build_triage_prompt;

pub const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Models accepted by the Gemini adapter, with pricing per 1M tokens.
pub const GEMINI_MODELS: &[ModelPrice] = &[ModelPrice {
    name: "gemini-2.5-pro",
    input_cost_per_1m: 1.25,
    output_cost_per_1m: 10.00,
}];

#[derive(Debug)]
pub struct GeminiProvider {
    client: reqwest::Client,
    base_url: String,
    model: &'static ModelPrice,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(rename = "usageMetadata")]
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct UsageMetadata {
    #[serde(rename = "promptTokenCount", default)]
    prompt_token_count: u64,
    #[serde(rename = "candidatesTokenCount", default)]
    candidates_token_count: u64,
}

impl GeminiProvider {
    pub fn new(api_key: &str) -> Result<Self, TriagoError> {
        Self::with_base_url(api_key, GEMINI_API_URL.to_string())
    }

    pub fn with_base_url(api_key: &str, base_url: String) -> Result<Self, TriagoError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-goog-api-key",
            HeaderValue::from_str(api_key).map_err(|e| {
                TriagoError::Config(format!("invalid API key header value: {e}"))
            })?,
        );
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(300))
            .build()
            .map_err(|e| TriagoError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url,
            model: &GEMINI_MODELS[0],
        })
    }

    async fn generate(&self, prompt: &str) -> Result<GenerateResponse, TriagoError> {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let url = format!(
            "{}/models/{}:generateContent",
            self.base_url, self.model.name
        );
        let response = self
            .client
            .post(url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                let message = if e.is_timeout() {
                    format!("Gemini API request timeout: {e}")
                } else if e.is_connect() {
                    format!("Gemini API connection error: {e}")
                } else {
                    format!("Gemini API network error: {e}")
                };
                TriagoError::Provider {
                    message,
                    source: Some(Box::new(e)),
                }
            })?;

        let status = response.status();
        debug!(provider = "Gemini", status = %status, "generateContent response received");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TriagoError::provider(format!(
                "Gemini API returned {status}: {body}"
            )));
        }

        let body = response.text().await.map_err(|e| TriagoError::Provider {
            message: format!("Gemini API network error reading body: {e}"),
            source: Some(Box::new(e)),
        })?;
        serde_json::from_str(&body).map_err(|e| {
            TriagoError::provider(format!("Gemini returned an invalid response format: {e}"))
        })
    }
}

#[async_trait]
impl TicketProvider for GeminiProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Gemini
    }

    fn set_model(&mut self, model: &str) -> Result<(), TriagoError> {
        self.model = lookup_model(GEMINI_MODELS, model, "Gemini")?;
        Ok(())
    }

    async fn triage(&self, ticket: &TriageTicket) -> Result<TriageResult, TriagoError> {
        let prompt = build_triage_prompt(ticket);
        let response = self.generate(&prompt).await?;

        let candidate = response.candidates.into_iter().next().ok_or_else(|| {
            TriagoError::provider("Gemini API returned no candidates".to_string())
        })?;
        let text: String = candidate
            .content
            .map(|c| c.parts.into_iter().map(|p| p.text).collect())
            .unwrap_or_default();
        if text.is_empty() {
            return Err(TriagoError::provider(
                "Gemini API returned empty message content".to_string(),
            ));
        }

        let parsed = parse_json_reply(&text)?;

        let usage = response.usage_metadata.ok_or_else(|| {
            TriagoError::provider(
                "Gemini API did not return usage metadata".to_string(),
            )
        })?;

        build_result(
            parsed,
            usage.prompt_token_count,
            usage.candidates_token_count,
            self.model,
            "Gemini",
        )
    }
}
