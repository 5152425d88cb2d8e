// SPDX-FileCopyrightText: 2026 Triago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The triage prompt sent to every provider.

use triago_core::TriageTicket;

/// Builds the ticket-triage prompt. All providers receive the same text;
/// only the transport differs.
pub fn build_triage_prompt(ticket: &TriageTicket) -> String {
    format!(
        "\
You are a support ticket triage system.

Analyze the ticket and return STRICT JSON ONLY with:
- category (billing | technical | account | sales | other)
- priority (low | normal | high | urgent)
- flags:
  - requires_human
  - is_abusive
  - missing_info
  - is_vip_customer

Ticket:
Subject: {}
Body: {}
",
        ticket.subject(),
        ticket.body()
    )
}
