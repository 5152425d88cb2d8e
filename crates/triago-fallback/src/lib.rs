// SPDX-FileCopyrightText: 2026 Triago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider fallback engine for Triago.
//!
//! Two halves: [`classifier`] maps arbitrary provider failures to
//! structured error descriptors and answers the retryable/non-retryable
//! question; [`orchestrator`] walks the provider order, absorbing
//! retryable failures and aborting on non-retryable ones.

pub mod classifier;
pub mod orchestrator;

pub use classifier::{classify, codes, is_retryable, ErrorDescriptor};
pub use orchestrator::{
    fallback_providers, FallbackAbort, FallbackOrchestrator, FallbackOutcome, ProviderAttempt,
    ALL_PROVIDERS,
};
