// SPDX-FileCopyrightText: 2026 Triago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the triage REST API.
//!
//! Handles POST /triage-ticket and GET /health.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use triago_core::{ProviderId, TriageResult, TriageTicket};
use triago_fallback::{classify, codes, ErrorDescriptor, FallbackOutcome, ProviderAttempt};

use crate::server::AppState;

/// Response body for successful triage.
#[derive(Debug, Serialize)]
pub struct TriageResponse {
    #[serde(flatten)]
    pub result: TriageResult,
    /// Provider whose attempt produced the result.
    pub used_provider: ProviderId,
}

/// Error response body.
///
/// `code` is a stable machine token; `details` is free-text diagnostics and
/// is omitted for validation errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

fn attempted_providers(attempts: &[ProviderAttempt]) -> String {
    attempts
        .iter()
        .map(|a| a.provider.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn descriptor_response(descriptor: &ErrorDescriptor) -> Response {
    let status =
        StatusCode::from_u16(descriptor.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        Json(ErrorResponse {
            error: descriptor.message.to_string(),
            code: descriptor.code,
            details: Some(descriptor.details.clone()),
        }),
    )
        .into_response()
}

/// POST /triage-ticket
///
/// Validates the ticket, runs the provider fallback chain, and maps the
/// outcome to an HTTP response.
pub async fn post_triage_ticket(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> Response {
    let request_id = uuid::Uuid::new_v4().to_string();

    let subject = body.get("subject").and_then(|v| v.as_str()).unwrap_or("");
    let body_text = body.get("body").and_then(|v| v.as_str()).unwrap_or("");

    tracing::info!(
        request_id,
        subject_length = subject.len(),
        body_length = body_text.len(),
        "processing triage ticket request"
    );

    let ticket = match TriageTicket::new(subject, body_text) {
        Ok(ticket) => ticket,
        Err(e) => {
            tracing::warn!(request_id, error = %e, "validation failed");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: e.to_string(),
                    code: codes::MISSING_SUBJECT_OR_BODY,
                    details: None,
                }),
            )
                .into_response();
        }
    };

    match state
        .orchestrator
        .run(&state.fallback_order, &ticket, &request_id)
        .await
    {
        Ok(FallbackOutcome::Success {
            result,
            provider,
            attempts,
            provider_elapsed,
            total_elapsed,
        }) => {
            tracing::info!(
                request_id,
                provider = %provider,
                had_fallback = !attempts.is_empty(),
                attempted_providers = %attempted_providers(&attempts),
                provider_elapsed_ms = provider_elapsed.as_millis() as u64,
                total_elapsed_ms = total_elapsed.as_millis() as u64,
                input_tokens = result.usage.input_tokens,
                output_tokens = result.usage.output_tokens,
                cost_usd = result.usage.cost_usd,
                category = %result.category,
                priority = %result.priority,
                "triage ticket processed successfully"
            );
            (
                StatusCode::OK,
                Json(TriageResponse {
                    result,
                    used_provider: provider,
                }),
            )
                .into_response()
        }
        Ok(FallbackOutcome::Exhausted {
            attempts,
            last_error,
            total_elapsed,
        }) => {
            let attempted = attempted_providers(&attempts);
            let descriptor = classify(&last_error, &attempted);
            tracing::error!(
                request_id,
                attempted_providers = %attempted,
                total_elapsed_ms = total_elapsed.as_millis() as u64,
                error_code = descriptor.code,
                error = %last_error,
                "all providers failed"
            );
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "All LLM providers failed".to_string(),
                    code: codes::LLM_PROVIDER_FAILED,
                    details: Some(format!(
                        "Attempted providers: {attempted}. Last error: {}",
                        descriptor.details
                    )),
                }),
            )
                .into_response()
        }
        Err(abort) => descriptor_response(&abort.descriptor),
    }
}

/// GET /health
pub async fn get_health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use async_trait::async_trait;

    use triago_core::{TicketProvider, TriageTicket, TriagoError};
    use triago_fallback::FallbackOrchestrator;
    use triago_test_utils::{sample_result, ScriptedProvider};

    use crate::server::build_router;

    #[derive(Debug)]
    struct PanickingProvider;

    #[async_trait]
    impl TicketProvider for PanickingProvider {
        fn id(&self) -> ProviderId {
            ProviderId::Openai
        }

        fn set_model(&mut self, _model: &str) -> Result<(), TriagoError> {
            Ok(())
        }

        async fn triage(&self, _ticket: &TriageTicket) -> Result<TriageResult, TriagoError> {
            panic!("orchestration defect")
        }
    }

    fn router(providers: Vec<ScriptedProvider>) -> axum::Router {
        let map: HashMap<ProviderId, Arc<dyn TicketProvider>> = providers
            .into_iter()
            .map(|p| (p.id(), Arc::new(p) as Arc<dyn TicketProvider>))
            .collect();
        let state = AppState::new(
            FallbackOrchestrator::new(map),
            vec![ProviderId::Openai, ProviderId::Gemini, ProviderId::Grok],
        );
        build_router(state)
    }

    async fn post_ticket(app: axum::Router, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/triage-ticket")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    fn valid_body() -> serde_json::Value {
        serde_json::json!({"subject": "Login broken", "body": "I cannot sign in"})
    }

    #[tokio::test]
    async fn missing_subject_returns_400() {
        let app = router(vec![ScriptedProvider::new(ProviderId::Openai)]);
        let (status, json) = post_ticket(app, serde_json::json!({"body": "text"})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], "MISSING_SUBJECT_OR_BODY");
        assert_eq!(json["error"], "Missing or invalid subject");
    }

    #[tokio::test]
    async fn whitespace_body_returns_400() {
        let app = router(vec![ScriptedProvider::new(ProviderId::Openai)]);
        let (status, json) =
            post_ticket(app, serde_json::json!({"subject": "Hi", "body": "   "})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], "MISSING_SUBJECT_OR_BODY");
        assert_eq!(json["error"], "Missing or invalid body");
    }

    #[tokio::test]
    async fn non_string_subject_returns_400() {
        let app = router(vec![ScriptedProvider::new(ProviderId::Openai)]);
        let (status, json) =
            post_ticket(app, serde_json::json!({"subject": 42, "body": "text"})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], "MISSING_SUBJECT_OR_BODY");
    }

    #[tokio::test]
    async fn first_provider_success_returns_200() {
        let app = router(vec![
            ScriptedProvider::new(ProviderId::Openai).push_ok(sample_result()),
            ScriptedProvider::new(ProviderId::Gemini),
            ScriptedProvider::new(ProviderId::Grok),
        ]);
        let (status, json) = post_ticket(app, valid_body()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["used_provider"], "openai");
        assert_eq!(json["category"], "technical");
        assert_eq!(json["usage"]["inputTokens"], 120);
        assert_eq!(json["usage"]["outputTokens"], 40);
        assert!(json["usage"]["costUSD"].is_number());
    }

    #[tokio::test]
    async fn fallback_success_reports_second_provider() {
        let app = router(vec![
            ScriptedProvider::new(ProviderId::Openai).push_err("Network error: ECONNREFUSED"),
            ScriptedProvider::new(ProviderId::Gemini).push_ok(sample_result()),
            ScriptedProvider::new(ProviderId::Grok),
        ]);
        let (status, json) = post_ticket(app, valid_body()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["used_provider"], "gemini");
    }

    #[tokio::test]
    async fn non_retryable_failure_returns_classified_500() {
        let gemini = ScriptedProvider::new(ProviderId::Gemini).push_ok(sample_result());
        let app = router(vec![
            ScriptedProvider::new(ProviderId::Openai).push_err("invalid API key"),
            gemini,
            ScriptedProvider::new(ProviderId::Grok),
        ]);
        let (status, json) = post_ticket(app, valid_body()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["code"], "AUTHENTICATION_ERROR");
        assert_eq!(json["error"], "API authentication failed");
        assert!(json["details"]
            .as_str()
            .unwrap()
            .contains("OpenAI API authentication failed"));
    }

    #[tokio::test]
    async fn exhaustion_returns_500_listing_all_providers() {
        let app = router(vec![
            ScriptedProvider::new(ProviderId::Openai).push_err("Network error"),
            ScriptedProvider::new(ProviderId::Gemini).push_err("Rate limit exceeded"),
            ScriptedProvider::new(ProviderId::Grok).push_err("Quota exceeded"),
        ]);
        let (status, json) = post_ticket(app, valid_body()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["code"], "LLM_PROVIDER_FAILED");
        assert_eq!(json["error"], "All LLM providers failed");
        let details = json["details"].as_str().unwrap();
        assert!(
            details.contains("Attempted providers: openai, gemini, grok"),
            "got: {details}"
        );
        assert!(details.contains("Last error:"), "got: {details}");
    }

    #[tokio::test]
    async fn handler_panic_returns_json_500_with_code() {
        let map: HashMap<ProviderId, Arc<dyn TicketProvider>> = [(
            ProviderId::Openai,
            Arc::new(PanickingProvider) as Arc<dyn TicketProvider>,
        )]
        .into_iter()
        .collect();
        let state = AppState::new(
            FallbackOrchestrator::new(map),
            vec![ProviderId::Openai],
        );
        let app = build_router(state);

        let (status, json) = post_ticket(app, valid_body()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["code"], "LLM_PROVIDER_FAILED");
        assert_eq!(json["details"], "orchestration defect");
    }

    #[tokio::test]
    async fn health_endpoint_reports_ok() {
        let app = router(vec![]);
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["status"], "ok");
    }
}
