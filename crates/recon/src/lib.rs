//! `payverify-recon`: registration payment reconciliation engine.
//!
//! Pure engine crate: receives pre-loaded text and rows, returns verdicts.
//! No CLI or file IO dependencies.

pub mod amount;
pub mod config;
pub mod engine;
pub mod error;
pub mod form;
pub mod method;
pub mod model;
pub mod names;
pub mod notifications;
pub mod pricing;
pub mod statement;
pub mod summary;

pub use config::VerifyConfig;
pub use engine::run;
pub use error::ReconError;
pub use model::{ReconInput, ReconResult, Registration, Transaction, Verdict};

/// Build the engine input from loaded sources.
///
/// Any configuration error (bad template, missing payment column, unpriced
/// tier) aborts before reconciliation starts.
pub fn prepare_input(
    config: &VerifyConfig,
    notification_log: &str,
    sheets: &[form::FormSheet],
    statement_csv: &str,
) -> Result<ReconInput, ReconError> {
    let parser = notifications::NotificationParser::new(&config.notifications)?;
    let registrations =
        form::registrations_from_sheets(sheets, &config.form, &config.pricing, &config.methods)?;
    let zelle = parser.parse(notification_log);
    let venmo = statement::load_statement(statement_csv, &config.statement)?;

    Ok(ReconInput {
        registrations,
        zelle,
        venmo,
    })
}
