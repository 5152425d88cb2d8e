// SPDX-FileCopyrightText: 2026 Triago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Model catalog lookup shared by all provider adapters.

use triago_core::TriagoError;
use triago_cost::ModelPrice;

/// Finds a model in a provider's catalog, with a consistent error message
/// listing the available models when the name is unknown.
pub fn lookup_model<'a>(
    models: &'a [ModelPrice],
    name: &str,
    provider_label: &str,
) -> Result<&'a ModelPrice, TriagoError> {
    models.iter().find(|m| m.name == name).ok_or_else(|| {
        let available: Vec<&str> = models.iter().map(|m| m.name).collect();
        TriagoError::Config(format!(
            "Unknown {provider_label} model: {name}. Available: {}",
            available.join(", ")
        ))
    })
}

/// Shared post-parse shape of a model's triage reply.
///
/// `category` and `priority` are free text by design; the service performs
/// no enum validation on provider-supplied values.
#[derive(Debug, serde::Deserialize)]
pub(crate) struct ParsedTriage {
    pub category: String,
    pub priority: String,
    #[serde(default)]
    pub flags: std::collections::BTreeMap<String, bool>,
}

/// Converts a parsed JSON reply plus token counts into a [`TriageResult`],
/// computing the call cost from the model price.
pub(crate) fn build_result(
    value: serde_json::Value,
    input_tokens: u64,
    output_tokens: u64,
    price: &ModelPrice,
    provider_label: &str,
) -> Result<triago_core::TriageResult, TriagoError> {
    let parsed: ParsedTriage = serde_json::from_value(value).map_err(|e| {
        TriagoError::provider(format!(
            "{provider_label} returned an invalid response shape: {e}"
        ))
    })?;
    Ok(triago_core::TriageResult {
        category: parsed.category,
        priority: parsed.priority,
        flags: parsed.flags,
        usage: triago_cost::usage_record(input_tokens, output_tokens, price),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const MODELS: &[ModelPrice] = &[ModelPrice {
        name: "test-model",
        input_cost_per_1m: 1.0,
        output_cost_per_1m: 2.0,
    }];

    #[test]
    fn lookup_finds_known_model() {
        let price = lookup_model(MODELS, "test-model", "Test").unwrap();
        assert_eq!(price.name, "test-model");
    }

    #[test]
    fn lookup_lists_available_models_on_miss() {
        let err = lookup_model(MODELS, "other-model", "Test").unwrap_err();
        let text = err.to_string();
        assert!(text.contains("Unknown Test model: other-model"), "got: {text}");
        assert!(text.contains("Available: test-model"), "got: {text}");
    }

    #[test]
    fn build_result_computes_cost() {
        let value = json!({
            "category": "billing",
            "priority": "urgent",
            "flags": {"requires_human": true}
        });
        let result = build_result(value, 1_000_000, 0, &MODELS[0], "Test").unwrap();
        assert_eq!(result.category, "billing");
        assert!((result.usage.cost_usd - 1.0).abs() < 1e-12);
    }

    #[test]
    fn build_result_rejects_missing_fields_as_invalid_shape() {
        let err = build_result(json!({"category": "billing"}), 1, 1, &MODELS[0], "Test")
            .unwrap_err();
        assert!(err.to_string().contains("invalid response shape"));
    }

    #[test]
    fn build_result_defaults_missing_flags() {
        let value = json!({"category": "other", "priority": "low"});
        let result = build_result(value, 1, 1, &MODELS[0], "Test").unwrap();
        assert!(result.flags.is_empty());
    }
}
