//! Bank SMS notification parsing (Zelle side).
//!
//! One notification per line, e.g. `BofA: Jane Doe sent you $10.00 for party`.
//! Lines that do not fit the template are skipped; the log is expected to
//! carry unrelated messages.

use regex::{Regex, RegexBuilder};
use serde::Deserialize;

use crate::amount::parse_decimal_cents;
use crate::error::ReconError;
use crate::model::{Provider, Transaction};
use crate::names::normalize_name;

/// Literal tokens of the notification template.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NotificationTemplate {
    /// Provider tag that opens every notification.
    pub tag: String,
    /// Phrase between the sender name and the amount.
    pub phrase: String,
}

impl Default for NotificationTemplate {
    fn default() -> Self {
        Self {
            tag: "BofA".into(),
            phrase: "sent you".into(),
        }
    }
}

/// Compiled template.
#[derive(Debug, Clone)]
pub struct NotificationParser {
    pattern: Regex,
}

impl NotificationParser {
    pub fn new(template: &NotificationTemplate) -> Result<Self, ReconError> {
        let source = format!(
            r"{}: (.*?) {} \$([0-9]+\.\d{{2}})(?: for.*)?",
            regex::escape(&template.tag),
            regex::escape(&template.phrase),
        );
        let pattern = RegexBuilder::new(&source)
            .case_insensitive(true)
            .build()
            .map_err(|e| ReconError::InvalidTemplate(e.to_string()))?;
        Ok(Self { pattern })
    }

    /// Extract one transaction from a line, if it fits the template.
    pub fn parse_line(&self, line: &str) -> Option<Transaction> {
        let caps = self.pattern.captures(line.trim())?;
        let name = caps.get(1)?.as_str();
        let amount_cents = parse_decimal_cents(caps.get(2)?.as_str())?;
        Some(Transaction {
            provider: Provider::Zelle,
            sender_name: normalize_name(name),
            amount_cents,
        })
    }

    /// Parse a whole log. Duplicates are kept in source order.
    pub fn parse(&self, text: &str) -> Vec<Transaction> {
        let mut transactions = Vec::new();
        let mut skipped = 0usize;
        for (idx, line) in text.lines().enumerate() {
            match self.parse_line(line) {
                Some(txn) => transactions.push(txn),
                None => {
                    skipped += 1;
                    tracing::trace!(line = idx + 1, "not a payment notification");
                }
            }
        }
        tracing::debug!(parsed = transactions.len(), skipped, "parsed notification log");
        transactions
    }
}
