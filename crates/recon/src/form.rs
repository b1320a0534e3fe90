//! Registration form sheets -> annotated registrations.
//!
//! Every sheet of the form workbook is one tier; the sheet name is the tier
//! label. Column positions are discovered from the header row.

use serde::Deserialize;

use crate::error::ReconError;
use crate::method::MethodClassifier;
use crate::model::Registration;
use crate::names::normalize_optional;
use crate::pricing::PricingTable;

/// One worksheet as plain strings. Empty cells are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormSheet {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Header names used to locate form columns.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FormColumns {
    pub name_column: String,
    pub email_column: String,
    /// The payment-method column is the single header starting with this.
    pub payment_column_prefix: String,
}

impl Default for FormColumns {
    fn default() -> Self {
        Self {
            name_column: "Full name (First + Last as shown on ID)".into(),
            email_column: "Email Address".into(),
            payment_column_prefix: "You are purchasing ONE ˗ˏˋTier".into(),
        }
    }
}

/// Resolved column indices for one sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetColumns {
    pub name: usize,
    pub email: Option<usize>,
    pub payment: usize,
}

/// Locate the form columns in a header row.
///
/// The payment column must be unique: zero or several headers carrying the
/// prefix both fail.
pub fn locate_columns(
    sheet: &str,
    headers: &[String],
    columns: &FormColumns,
) -> Result<SheetColumns, ReconError> {
    let exact = |wanted: &str| headers.iter().position(|h| h.trim() == wanted);

    let name = exact(&columns.name_column).ok_or_else(|| ReconError::MissingColumn {
        sheet: sheet.into(),
        column: columns.name_column.clone(),
    })?;
    let email = exact(&columns.email_column);

    let payment_matches: Vec<usize> = headers
        .iter()
        .enumerate()
        .filter(|(_, h)| h.starts_with(&columns.payment_column_prefix))
        .map(|(i, _)| i)
        .collect();

    let payment = match payment_matches.as_slice() {
        [only] => *only,
        [] => {
            return Err(ReconError::MissingPaymentColumn {
                sheet: sheet.into(),
                prefix: columns.payment_column_prefix.clone(),
            })
        }
        many => {
            return Err(ReconError::AmbiguousPaymentColumn {
                sheet: sheet.into(),
                columns: many.iter().map(|&i| headers[i].clone()).collect(),
            })
        }
    };

    Ok(SheetColumns { name, email, payment })
}

/// Build registrations from all tier sheets, in sheet then row order.
///
/// Fully blank rows are skipped. A sheet without a payment column or a tier
/// without a price aborts the whole load.
pub fn registrations_from_sheets(
    sheets: &[FormSheet],
    columns: &FormColumns,
    pricing: &PricingTable,
    classifier: &MethodClassifier,
) -> Result<Vec<Registration>, ReconError> {
    let mut registrations = Vec::new();

    for sheet in sheets {
        let cols = locate_columns(&sheet.name, &sheet.headers, columns)?;
        let expected_cents = pricing.resolve(&sheet.name).map_err(|_| ReconError::UnpricedTier {
            sheet: sheet.name.clone(),
            tier: sheet.name.clone(),
        })?;

        let before = registrations.len();
        for row in &sheet.rows {
            if row.iter().all(|cell| cell.trim().is_empty()) {
                continue;
            }
            let cell = |idx: usize| row.get(idx).map(String::as_str).unwrap_or("");

            let email = cols
                .email
                .map(|i| cell(i).trim())
                .filter(|e| !e.is_empty())
                .map(str::to_string);
            let raw_method = cell(cols.payment).to_string();

            registrations.push(Registration {
                name: normalize_optional(row.get(cols.name).map(String::as_str)),
                email,
                tier: sheet.name.clone(),
                expected_cents,
                method: classifier.classify(Some(&raw_method)),
                raw_method,
            });
        }

        tracing::debug!(
            sheet = %sheet.name,
            registrations = registrations.len() - before,
            expected_cents,
            "loaded tier sheet"
        );
    }

    Ok(registrations)
}
