// SPDX-FileCopyrightText: 2026 Triago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scripted ticket provider for deterministic orchestration tests.
//!
//! `ScriptedProvider` implements `TicketProvider` with a FIFO queue of
//! pre-configured outcomes, enabling fast, CI-runnable tests of the
//! fallback orchestrator and the HTTP gateway without external API calls.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use triago_core::{ProviderId, TicketProvider, TriageResult, TriageTicket, TriagoError, UsageRecord};

/// A triage result with plausible fields, for tests that only care about
/// success/failure routing.
pub fn sample_result() -> TriageResult {
    TriageResult {
        category: "technical".to_string(),
        priority: "high".to_string(),
        flags: [
            ("requires_human".to_string(), false),
            ("is_abusive".to_string(), false),
            ("missing_info".to_string(), false),
            ("is_vip_customer".to_string(), false),
        ]
        .into_iter()
        .collect(),
        usage: UsageRecord {
            input_tokens: 120,
            output_tokens: 40,
            cost_usd: 0.000042,
        },
    }
}

/// A provider whose triage outcomes are scripted in advance.
///
/// Outcomes are popped from a FIFO queue; an empty queue yields
/// [`sample_result`]. Every `triage` call is counted so tests can assert
/// a provider was never invoked.
#[derive(Debug)]
pub struct ScriptedProvider {
    id: ProviderId,
    outcomes: Mutex<VecDeque<Result<TriageResult, TriagoError>>>,
    calls: AtomicUsize,
    model: String,
}

impl ScriptedProvider {
    /// Creates a scripted provider with an empty outcome queue.
    pub fn new(id: ProviderId) -> Self {
        Self {
            id,
            outcomes: Mutex::new(VecDeque::new()),
            calls: AtomicUsize::new(0),
            model: "scripted-model".to_string(),
        }
    }

    /// Queues a successful outcome.
    pub fn push_ok(self, result: TriageResult) -> Self {
        self.outcomes
            .lock()
            .expect("outcome queue lock poisoned")
            .push_back(Ok(result));
        self
    }

    /// Queues a failure outcome built from the given provider error text.
    pub fn push_err(self, message: impl Into<String>) -> Self {
        self.outcomes
            .lock()
            .expect("outcome queue lock poisoned")
            .push_back(Err(TriagoError::provider(message)));
        self
    }

    /// Number of times `triage` has been called.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TicketProvider for ScriptedProvider {
    fn id(&self) -> ProviderId {
        self.id
    }

    fn set_model(&mut self, model: &str) -> Result<(), TriagoError> {
        self.model = model.to_string();
        Ok(())
    }

    async fn triage(&self, _ticket: &TriageTicket) -> Result<TriageResult, TriagoError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcomes
            .lock()
            .expect("outcome queue lock poisoned")
            .pop_front()
            .unwrap_or_else(|| Ok(sample_result()))
    }
}
