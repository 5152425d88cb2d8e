// SPDX-FileCopyrightText: 2026 Triago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenAI chat-completions provider adapter.

use async_trait::async_trait;

use triago_core::{ProviderId, TicketProvider, TriageResult, TriageTicket, TriagoError};
use triago_cost::ModelPrice;

use crate::catalog::lookup_model;
use crate::chat::ChatClient;
use crate::prompt::build_triage_prompt;

pub const OPENAI_API_URL: &str = "https://api.openai.com/v1";

/// Models accepted by the OpenAI adapter, with pricing per 1M tokens.
pub const OPENAI_MODELS: &[ModelPrice] = &[ModelPrice {
    name: "gpt-4o-mini",
    input_cost_per_1m: 0.15,
    output_cost_per_1m: 0.60,
}];

#[derive(Debug)]
pub struct OpenAiProvider {
    client: ChatClient,
    model: &'static ModelPrice,
}

impl OpenAiProvider {
    /// Creates an adapter against the public OpenAI API with the default
    /// model.
    pub fn new(api_key: &str) -> Result<Self, TriagoError> {
        Self::with_base_url(api_key, OPENAI_API_URL.to_string())
    }

    /// Creates an adapter against a custom base URL (used in tests).
    pub fn with_base_url(api_key: &str, base_url: String) -> Result<Self, TriagoError> {
        Ok(Self {
            client: ChatClient::new(api_key, base_url, "OpenAI")?,
            model: &OPENAI_MODELS[0],
        })
    }
}

#[async_trait]
impl TicketProvider for OpenAiProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Openai
    }

    fn set_model(&mut self, model: &str) -> Result<(), TriagoError> {
        self.model = lookup_model(OPENAI_MODELS, model, "OpenAI")?;
        Ok(())
    }

    async fn triage(&self, ticket: &TriageTicket) -> Result<TriageResult, TriagoError> {
        let prompt = build_triage_prompt(ticket);
        let completion = self.client.complete(self.model.name, &prompt).await?;
        self.client.into_triage_result(completion, self.model)
    }
}
