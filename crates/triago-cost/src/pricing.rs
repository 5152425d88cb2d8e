// SPDX-FileCopyrightText: 2026 Triago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Model pricing entries and cost calculation.
//!
//! Each provider carries a static catalog of [`ModelPrice`] entries keyed
//! by model name. Prices are USD per million tokens and never change at
//! runtime.

use triago_core::UsageRecord;

/// Per-model pricing in USD per million tokens.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelPrice {
    /// Model identifier as accepted by the provider API.
    pub name: &'static str,
    /// Cost per million input tokens.
    pub input_cost_per_1m: f64,
    /// Cost per million output tokens.
    pub output_cost_per_1m: f64,
}

/// Calculates the USD cost of one call, rounded half-up to 6 decimal places.
///
/// Formula: `(input/1M) * input_price + (output/1M) * output_price`.
/// Token counts are unsigned, so the non-negative precondition holds by
/// construction.
pub fn calculate_cost(input_tokens: u64, output_tokens: u64, price: &ModelPrice) -> f64 {
    let input = (input_tokens as f64 / 1_000_000.0) * price.input_cost_per_1m;
    let output = (output_tokens as f64 / 1_000_000.0) * price.output_cost_per_1m;
    round6(input + output)
}

/// Builds a [`UsageRecord`] from raw token counts and the model price.
pub fn usage_record(input_tokens: u64, output_tokens: u64, price: &ModelPrice) -> UsageRecord {
    UsageRecord {
        input_tokens,
        output_tokens,
        cost_usd: calculate_cost(input_tokens, output_tokens, price),
    }
}

/// Rounds half-up to 6 fractional digits. `f64::round` rounds half away
/// from zero, which is half-up for the non-negative values used here.
fn round6(value: f64) -> f64 {
    (value * 1_000_000.0).round() / 1_000_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRICE: ModelPrice = ModelPrice {
        name: "test-model",
        input_cost_per_1m: 1.0,
        output_cost_per_1m: 2.0,
    };

    fn assert_cost(input: u64, output: u64, expected: f64) {
        let cost = calculate_cost(input, output, &PRICE);
        assert!(
            (cost - expected).abs() < 1e-12,
            "cost({input}, {output}) = {cost}, expected {expected}"
        );
    }

    #[test]
    fn one_million_input_tokens_costs_input_price() {
        assert_cost(1_000_000, 0, 1.0);
    }

    #[test]
    fn one_million_output_tokens_costs_output_price() {
        assert_cost(0, 1_000_000, 2.0);
    }

    #[test]
    fn mixed_token_counts_sum_both_terms() {
        assert_cost(500_000, 250_000, 1.0);
    }

    #[test]
    fn small_counts_round_to_six_decimals() {
        // 123/1M * 1.0 + 456/1M * 2.0 = 0.000123 + 0.000912 = 0.001035
        assert_cost(123, 456, 0.001035);
    }

    #[test]
    fn zero_tokens_zero_cost() {
        assert_cost(0, 0, 0.0);
    }

    #[test]
    fn rounding_is_half_up() {
        // 1.5e-6 rounds up to 2e-6, not down.
        assert!((round6(0.0000015) - 0.000002).abs() < 1e-12);
    }

    #[test]
    fn usage_record_carries_rounded_cost() {
        let usage = usage_record(123, 456, &PRICE);
        assert_eq!(usage.input_tokens, 123);
        assert_eq!(usage.output_tokens, 456);
        assert!((usage.cost_usd - 0.001035).abs() < 1e-12);
    }
}
