// SPDX-FileCopyrightText: 2026 Triago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider fallback orchestration.
//!
//! One orchestration run tries providers strictly sequentially in the
//! caller-supplied order: a later provider is never started until the
//! earlier one has definitively failed retryably. Parallel speculative
//! calls would multiply LLM spend, so the sequential loop must stay.
//!
//! Non-retryable failures abort the run immediately without trying the
//! remaining providers: a bad credential or model name would fail the same
//! way everywhere, and a fallback "success" would only mask the
//! configuration bug.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{error, warn};

use triago_core::{ProviderId, TicketProvider, TriageResult, TriageTicket, TriagoError};

use crate::classifier::{self, ErrorDescriptor};

/// All known providers in fixed relative order.
pub const ALL_PROVIDERS: [ProviderId; 3] =
    [ProviderId::Openai, ProviderId::Gemini, ProviderId::Grok];

/// Returns the fallback chain for a provider: the other known providers
/// in fixed relative order, excluding `primary`.
pub fn fallback_providers(primary: ProviderId) -> Vec<ProviderId> {
    ALL_PROVIDERS
        .into_iter()
        .filter(|p| *p != primary)
        .collect()
}

/// One failed, retryable provider call within an orchestration run.
///
/// The attempt list never includes the provider that ultimately succeeded
/// or the provider that aborted non-retryably.
#[derive(Debug)]
pub struct ProviderAttempt {
    pub provider: ProviderId,
    pub error: TriagoError,
}

/// Terminal state of an orchestration run that was not aborted.
#[derive(Debug)]
pub enum FallbackOutcome {
    /// A provider produced a triage result.
    Success {
        result: TriageResult,
        provider: ProviderId,
        attempts: Vec<ProviderAttempt>,
        provider_elapsed: Duration,
        total_elapsed: Duration,
    },
    /// Every provider in the order failed retryably.
    Exhausted {
        attempts: Vec<ProviderAttempt>,
        last_error: TriagoError,
        total_elapsed: Duration,
    },
}

/// Immediate-abort signal raised on a non-retryable provider failure.
#[derive(Debug)]
pub struct FallbackAbort {
    pub descriptor: ErrorDescriptor,
    pub provider: ProviderId,
    pub total_elapsed: Duration,
}

/// Runs tickets through providers in fallback order.
///
/// Holds the provider registry; adapters are read-only and shared across
/// concurrent in-flight requests, so no locking is needed.
pub struct FallbackOrchestrator {
    providers: HashMap<ProviderId, Arc<dyn TicketProvider>>,
}

impl FallbackOrchestrator {
    pub fn new(providers: HashMap<ProviderId, Arc<dyn TicketProvider>>) -> Self {
        Self { providers }
    }

    /// Tries each provider in `order` until one succeeds.
    ///
    /// Retryable failures are recorded and the loop continues; a
    /// non-retryable failure returns [`FallbackAbort`] immediately, with
    /// no further providers tried. The order is never reordered,
    /// deduplicated, or retried within one run.
    pub async fn run(
        &self,
        order: &[ProviderId],
        ticket: &TriageTicket,
        request_id: &str,
    ) -> Result<FallbackOutcome, FallbackAbort> {
        let run_start = Instant::now();
        let mut attempts: Vec<ProviderAttempt> = Vec::new();

        for &provider_id in order {
            let attempt_start = Instant::now();
            let result = match self.providers.get(&provider_id) {
                Some(provider) => provider.triage(ticket).await,
                None => Err(TriagoError::provider(format!(
                    "Unknown provider: {provider_id}"
                ))),
            };

            match result {
                Ok(result) => {
                    return Ok(FallbackOutcome::Success {
                        result,
                        provider: provider_id,
                        attempts,
                        provider_elapsed: attempt_start.elapsed(),
                        total_elapsed: run_start.elapsed(),
                    });
                }
                Err(provider_error) => {
                    let provider_elapsed_ms = attempt_start.elapsed().as_millis() as u64;

                    if classifier::is_retryable(&provider_error) {
                        warn!(
                            request_id,
                            provider = %provider_id,
                            provider_elapsed_ms,
                            error = %provider_error,
                            "provider failed (retryable), trying next"
                        );
                        attempts.push(ProviderAttempt {
                            provider: provider_id,
                            error: provider_error,
                        });
                        continue;
                    }

                    let descriptor =
                        classifier::classify(&provider_error, provider_id.label());
                    let total_elapsed = run_start.elapsed();
                    error!(
                        request_id,
                        provider = %provider_id,
                        provider_elapsed_ms,
                        total_elapsed_ms = total_elapsed.as_millis() as u64,
                        error_code = descriptor.code,
                        error = %provider_error,
                        details = %descriptor.details,
                        "provider failed (non-retryable), aborting run"
                    );
                    return Err(FallbackAbort {
                        descriptor,
                        provider: provider_id,
                        total_elapsed,
                    });
                }
            }
        }

        let last_error = match attempts.last() {
            Some(attempt) => TriagoError::provider(attempt.error.to_string()),
            None => TriagoError::provider("All providers failed"),
        };
        Ok(FallbackOutcome::Exhausted {
            attempts,
            last_error,
            total_elapsed: run_start.elapsed(),
        })
    }
}
