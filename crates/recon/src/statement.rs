//! Venmo statement export -> transactions.

use serde::Deserialize;

use crate::amount::parse_money_cents;
use crate::error::ReconError;
use crate::model::{Provider, Transaction};
use crate::names::normalize_name;

/// Layout of the statement export.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StatementColumns {
    /// Preamble lines before the header row.
    pub skip_rows: usize,
    pub sender_column: String,
    pub amount_column: String,
}

impl Default for StatementColumns {
    fn default() -> Self {
        Self {
            skip_rows: 2,
            sender_column: "From".into(),
            amount_column: "Amount (total)".into(),
        }
    }
}

/// Byte offset just past the first `n` newlines.
fn skip_lines(text: &str, n: usize) -> &str {
    let mut rest = text;
    for _ in 0..n {
        match rest.find('\n') {
            Some(pos) => rest = &rest[pos + 1..],
            None => return "",
        }
    }
    rest
}

/// Load transactions from statement CSV text.
///
/// Rows whose amount does not parse (disclaimers, out-of-range values) and
/// rows without a sender (balance footers) are skipped.
pub fn load_statement(csv_data: &str, columns: &StatementColumns) -> Result<Vec<Transaction>, ReconError> {
    let body = skip_lines(csv_data, columns.skip_rows);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(body.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| ReconError::Statement(e.to_string()))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let idx = |name: &str| -> Result<usize, ReconError> {
        headers.iter().position(|h| h == name).ok_or_else(|| ReconError::MissingColumn {
            sheet: "statement".into(),
            column: name.into(),
        })
    };

    let sender_idx = idx(&columns.sender_column)?;
    let amount_idx = idx(&columns.amount_column)?;

    let mut transactions = Vec::new();
    let mut skipped = 0usize;

    for record in reader.records() {
        let record = record.map_err(|e| ReconError::Statement(e.to_string()))?;

        let sender_name = normalize_name(record.get(sender_idx).unwrap_or(""));
        let amount_cents = parse_money_cents(record.get(amount_idx).unwrap_or(""));
        let Some(amount_cents) = amount_cents.filter(|_| !sender_name.is_empty()) else {
            skipped += 1;
            continue;
        };

        transactions.push(Transaction {
            provider: Provider::Venmo,
            sender_name,
            amount_cents,
        });
    }

    tracing::debug!(parsed = transactions.len(), skipped, "loaded statement export");
    Ok(transactions)
}
