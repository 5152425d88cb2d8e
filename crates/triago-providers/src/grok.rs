// SPDX-FileCopyrightText: 2026 Triago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Grok (xAI) provider adapter.
//!
//! xAI serves an OpenAI-compatible chat-completions API, so this adapter
//! is [`ChatClient`] pointed at the xAI endpoint with its own catalog.

use async_trait::async_trait;

use triago_core::{ProviderId, TicketProvider, TriageResult, TriageTicket, TriagoError};
use triago_cost::ModelPrice;

use crate::catalog::lookup_model;
use crate::chat::ChatClient;
use crate::prompt::build_triage_prompt;

pub const GROK_API_URL: &str = "https://api.x.ai/v1";

/// Models accepted by the Grok adapter, with pricing per 1M tokens.
pub const GROK_MODELS: &[ModelPrice] = &[ModelPrice {
    name: "grok-4-1-fast-reasoning",
    input_cost_per_1m: 0.20,
    output_cost_per_1m: 0.50,
}];

#[derive(Debug)]
pub struct GrokProvider {
    client: ChatClient,
    model: &'static ModelPrice,
}

impl GrokProvider {
    pub fn new(api_key: &str) -> Result<Self, TriagoError> {
        Self::with_base_url(api_key, GROK_API_URL.to_string())
    }

    pub fn with_base_url(api_key: &str, base_url: String) -> Result<Self, TriagoError> {
        Ok(Self {
            client: ChatClient::new(api_key, base_url, "Grok")?,
            model: &GROK_MODELS[0],
        })
    }
}

#[async_trait]
impl TicketProvider for GrokProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Grok
    }

    fn set_model(&mut self, model: &str) -> Result<(), TriagoError> {
        self.model = lookup_model(GROK_MODELS, model, "Grok")?;
        Ok(())
    }

    async fn triage(&self, ticket: &TriageTicket) -> Result<TriageResult, TriagoError> {
        let prompt = build_triage_prompt(ticket);
        let completion = self.client.complete(self.model.name, &prompt).await?;
        self.client.into_triage_result(completion, self.model)
    }
}
