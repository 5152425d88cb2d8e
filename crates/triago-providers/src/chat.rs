// SPDX-FileCopyrightText: 2026 Triago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for OpenAI-compatible chat-completions APIs.
//!
//! OpenAI and Grok expose the same wire shape, so both adapters share this
//! client and differ only in base URL, credentials, and model catalog.
//!
//! Error messages deliberately keep upstream diagnostic text and status
//! codes intact: the fallback classifier keyword-matches on them.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use tracing::debug;

use triago_core::{TriageResult, TriagoError};
use triago_cost::ModelPrice;
use triago_parser::parse_json_reply;

use crate::catalog::build_result;

/// Client for one OpenAI-compatible chat-completions endpoint.
#[derive(Debug, Clone)]
pub struct ChatClient {
    client: reqwest::Client,
    base_url: String,
    provider_label: &'static str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletion {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    #[serde(default)]
    prompt_tokens: u64,
    #[serde(default)]
    completion_tokens: u64,
}

impl ChatClient {
    /// Creates a client with bearer authentication against `base_url`.
    pub fn new(
        api_key: &str,
        base_url: String,
        provider_label: &'static str,
    ) -> Result<Self, TriagoError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "authorization",
            HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(|e| {
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
            provider_label,
        })
    }

    /// Sends one zero-temperature completion request and returns the raw
    /// completion.
    pub async fn complete(&self, model: &str, prompt: &str) -> Result<ChatCompletion, TriagoError> {
        let label = self.provider_label;
        let request = ChatRequest {
            model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: 0.0,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                // Keep transport faults keyword-classifiable.
                let message = if e.is_timeout() {
                    format!("{label} API request timeout: {e}")
                } else if e.is_connect() {
                    format!("{label} API connection error: {e}")
                } else {
                    format!("{label} API network error: {e}")
                };
                TriagoError::Provider {
                    message,
                    source: Some(Box::new(e)),
                }
            })?;

        let status = response.status();
        debug!(provider = label, status = %status, "chat completion response received");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TriagoError::provider(format!(
                "{label} API returned {status}: {body}"
            )));
        }

        let body = response.text().await.map_err(|e| TriagoError::Provider {
            message: format!("{label} API network error reading body: {e}"),
            source: Some(Box::new(e)),
        })?;
        serde_json::from_str(&body).map_err(|e| {
            TriagoError::provider(format!(
                "{label} returned an invalid response format: {e}"
            ))
        })
    }

    /// Runs the shared chat-completion post-processing: first choice,
    /// non-empty content, fenced-JSON parse, usage presence, cost.
    pub fn into_triage_result(
        &self,
        completion: ChatCompletion,
        price: &ModelPrice,
    ) -> Result<TriageResult, TriagoError> {
        let label = self.provider_label;

        let choice = completion.choices.into_iter().next().ok_or_else(|| {
            TriagoError::provider(format!("{label} API returned no completion choices"))
        })?;
        let content = match choice.message.content {
            Some(text) if !text.is_empty() => text,
            _ => {
                return Err(TriagoError::provider(format!(
                    "{label} API returned empty message content"
                )))
            }
        };

        let parsed = parse_json_reply(&content)?;

        let usage = completion.usage.ok_or_else(|| {
            TriagoError::provider(format!(
                "{label} API did not return usage information"
            ))
        })?;

        build_result(
            parsed,
            usage.prompt_tokens,
            usage.completion_tokens,
            price,
            label,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const PRICE: ModelPrice = ModelPrice {
        name: "test-model",
        input_cost_per_1m: 1.0,
        output_cost_per_1m: 2.0,
    };

    fn client(base_url: &str) -> ChatClient {
        ChatClient::new("test-key", base_url.to_string(), "OpenAI").unwrap()
    }

    fn reply_body(content: &str) -> serde_json::Value {
        serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": content}}],
            "usage": {"prompt_tokens": 120, "completion_tokens": 30}
        })
    }

    #[tokio::test]
    async fn complete_parses_successful_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer test-key"))
            .and(body_partial_json(serde_json::json!({
                "model": "test-model",
                "temperature": 0.0
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(reply_body(r#"{"category":"billing","priority":"high"}"#)),
            )
            .mount(&server)
            .await;

        let completion = client(&server.uri())
            .complete("test-model", "triage this")
            .await
            .unwrap();
        let result = client(&server.uri())
            .into_triage_result(completion, &PRICE)
            .unwrap();
        assert_eq!(result.category, "billing");
        assert_eq!(result.usage.input_tokens, 120);
        assert_eq!(result.usage.output_tokens, 30);
    }

    #[tokio::test]
    async fn fenced_reply_is_unwrapped() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(reply_body(
                "```json\n{\"category\":\"technical\",\"priority\":\"low\",\"flags\":{}}\n```",
            )))
            .mount(&server)
            .await;

        let c = client(&server.uri());
        let completion = c.complete("test-model", "triage this").await.unwrap();
        let result = c.into_triage_result(completion, &PRICE).unwrap();
        assert_eq!(result.category, "technical");
    }

    #[tokio::test]
    async fn non_success_status_surfaces_code_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(429).set_body_string("rate limit exceeded"),
            )
            .mount(&server)
            .await;

        let err = client(&server.uri())
            .complete("test-model", "triage this")
            .await
            .unwrap_err();
        let text = err.to_string();
        assert!(text.contains("429"), "got: {text}");
        assert!(text.contains("rate limit exceeded"), "got: {text}");
    }

    #[tokio::test]
    async fn unauthorized_status_is_visible_in_error_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
            .mount(&server)
            .await;

        let err = client(&server.uri())
            .complete("test-model", "triage this")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("401"));
    }

    #[tokio::test]
    async fn empty_choices_fail() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [],
                "usage": {"prompt_tokens": 1, "completion_tokens": 1}
            })))
            .mount(&server)
            .await;

        let c = client(&server.uri());
        let completion = c.complete("test-model", "triage this").await.unwrap();
        let err = c.into_triage_result(completion, &PRICE).unwrap_err();
        assert!(err.to_string().contains("no completion choices"));
    }

    #[tokio::test]
    async fn missing_usage_fails() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{"message": {"role": "assistant",
                    "content": "{\"category\":\"other\",\"priority\":\"low\"}"}}]
            })))
            .mount(&server)
            .await;

        let c = client(&server.uri());
        let completion = c.complete("test-model", "triage this").await.unwrap();
        let err = c.into_triage_result(completion, &PRICE).unwrap_err();
        assert!(err.to_string().contains("did not return usage information"));
    }

    #[tokio::test]
    async fn non_json_reply_fails_with_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(reply_body("I could not classify this ticket, sorry.")),
            )
            .mount(&server)
            .await;

        let c = client(&server.uri());
        let completion = c.complete("test-model", "triage this").await.unwrap();
        let err = c.into_triage_result(completion, &PRICE).unwrap_err();
        assert!(err.to_string().contains("Failed to parse JSON response"));
    }
}
