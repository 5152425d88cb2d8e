// SPDX-FileCopyrightText: 2026 Triago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider adapter trait for upstream LLM integrations (OpenAI, Gemini, Grok).

use async_trait::async_trait;

use crate::error::TriagoError;
use crate::types::{ProviderId, TriageResult, TriageTicket};

/// A single upstream LLM service capable of triaging a support ticket.
///
/// Implementations translate provider-specific response shapes into the
/// common [`TriageResult`] and surface upstream faults as
/// [`TriagoError::Provider`] values whose message text preserves the
/// upstream diagnostic keywords. The fallback classifier depends on that
/// text to decide whether a different provider is worth trying.
#[async_trait]
pub trait TicketProvider: Send + Sync + std::fmt::Debug {
    /// The identifier this adapter is registered under.
    fn id(&self) -> ProviderId;

    /// Selects the model to use for subsequent triage calls.
    ///
    /// Fails with [`TriagoError::Config`] (listing the available models)
    /// when `model` is not in this provider's catalog.
    fn set_model(&mut self, model: &str) -> Result<(), TriagoError>;

    /// Classifies one ticket, returning the normalized triage result.
    async fn triage(&self, ticket: &TriageTicket) -> Result<TriageResult, TriagoError>;
}
