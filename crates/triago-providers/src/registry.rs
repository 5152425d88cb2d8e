// SPDX-FileCopyrightText: 2026 Triago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Builds the provider registry from configuration.

use std::collections::HashMap;
use std::sync::Arc;

use triago_config::{ProviderConfig, TriagoConfig};
use triago_core::{ProviderId, TicketProvider, TriagoError};

use crate::gemini::GeminiProvider;
use crate::grok::GrokProvider;
use crate::openai::OpenAiProvider;

fn configure<P: TicketProvider>(
    mut provider: P,
    config: &ProviderConfig,
) -> Result<P, TriagoError> {
    if let Some(model) = &config.model {
        provider.set_model(model)?;
    }
    Ok(provider)
}

/// Instantiates all three provider adapters from configuration.
///
/// A missing API key is not an error here: the adapter is built with an
/// empty credential and the upstream authentication failure surfaces at
/// call time, where the fallback layer classifies it. A model override
/// outside the provider's catalog IS an error, since it can never succeed.
pub fn build_registry(
    config: &TriagoConfig,
) -> Result<HashMap<ProviderId, Arc<dyn TicketProvider>>, TriagoError> {
    let key = |c: &ProviderConfig| c.api_key.clone().unwrap_or_default();

    let openai = match &config.openai.base_url {
        Some(base) => OpenAiProvider::with_base_url(&key(&config.openai), base.clone())?,
        None => OpenAiProvider::new(&key(&config.openai))?,
    };
    let openai = configure(openai, &config.openai)?;

    let gemini = match &config.gemini.base_url {
        Some(base) => GeminiProvider::with_base_url(&key(&config.gemini), base.clone())?,
        None => GeminiProvider::new(&key(&config.gemini))?,
    };
    let gemini = configure(gemini, &config.gemini)?;

    let grok = match &config.grok.base_url {
        Some(base) => GrokProvider::with_base_url(&key(&config.grok), base.clone())?,
        None => GrokProvider::new(&key(&config.grok))?,
    };
    let grok = configure(grok, &config.grok)?;

    let mut registry: HashMap<ProviderId, Arc<dyn TicketProvider>> = HashMap::new();
    registry.insert(ProviderId::Openai, Arc::new(openai));
    registry.insert(ProviderId::Gemini, Arc::new(gemini));
    registry.insert(ProviderId::Grok, Arc::new(grok));
    Ok(registry)
}
