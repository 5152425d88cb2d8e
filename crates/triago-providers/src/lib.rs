// SPDX-FileCopyrightText: 2026 Triago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! LLM provider adapters for the Triago triage service.
//!
//! Each adapter implements [`triago_core::TicketProvider`]: it sends the
//! shared triage prompt to its upstream API, parses the (possibly fenced)
//! JSON reply, and prices the reported token usage. OpenAI and Grok share
//! an OpenAI-compatible chat client; Gemini has its own `generateContent`
//! transport.

pub mod catalog;
pub mod chat;
pub mod gemini;
pub mod grok;
pub mod openai;
pub mod prompt;
pub mod registry;

pub use catalog::lookup_model;
pub use chat::ChatClient;
pub use gemini::{GeminiProvider, GEMINI_MODELS};
pub use grok::{GrokProvider, GROK_MODELS};
pub use openai::{OpenAiProvider, OPENAI_MODELS};
pub use prompt::build_triage_prompt;
pub use registry::build_registry;
