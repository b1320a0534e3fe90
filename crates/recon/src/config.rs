use serde::Deserialize;

use crate::error::ReconError;
use crate::form::FormColumns;
use crate::method::MethodClassifier;
use crate::notifications::NotificationTemplate;
use crate::pricing::PricingTable;
use crate::statement::StatementColumns;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Run configuration. Every section has defaults, so an empty file (or no
/// file at all) describes the stock event setup.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VerifyConfig {
    pub name: String,
    pub inputs: InputFiles,
    pub outputs: OutputFiles,
    pub pricing: PricingTable,
    pub form: FormColumns,
    pub methods: MethodClassifier,
    pub notifications: NotificationTemplate,
    pub statement: StatementColumns,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            name: "payment verification".into(),
            inputs: InputFiles::default(),
            outputs: OutputFiles::default(),
            pricing: PricingTable::default(),
            form: FormColumns::default(),
            methods: MethodClassifier::default(),
            notifications: NotificationTemplate::default(),
            statement: StatementColumns::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Files
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InputFiles {
    /// Bank SMS log (Zelle side).
    pub notifications: String,
    /// Registration form workbook, one sheet per tier.
    pub workbook: String,
    /// Statement export (Venmo side).
    pub statement: String,
}

impl Default for InputFiles {
    fn default() -> Self {
        Self {
            notifications: "zelle_sms.txt".into(),
            workbook: "Seoul Drift Party Responses.xlsx".into(),
            statement: "VenmoStatement_May_2025.csv".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputFiles {
    pub venmo: String,
    pub zelle: String,
    /// Registrations matching neither provider. Empty skips the file.
    pub unresolved: String,
}

impl OutputFiles {
    pub fn unresolved_path(&self) -> Option<&str> {
        Some(self.unresolved.as_str()).filter(|p| !p.trim().is_empty())
    }
}

impl Default for OutputFiles {
    fn default() -> Self {
        Self {
            venmo: "venmo_verification.xlsx".into(),
            zelle: "zelle_verification.xlsx".into(),
            unresolved: "unresolved_verification.xlsx".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl VerifyConfig {
    pub fn from_toml(input: &str) -> Result<Self, ReconError> {
        let config: VerifyConfig =
            toml::from_str(input).map_err(|e| ReconError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ReconError> {
        if self.pricing.is_empty() {
            return Err(ReconError::ConfigValidation(
                "pricing table must have at least one tier".into(),
            ));
        }

        let zelle = self.methods.zelle_token.trim().to_lowercase();
        let venmo = self.methods.venmo_token.trim().to_lowercase();
        if zelle.is_empty() || venmo.is_empty() {
            return Err(ReconError::ConfigValidation(
                "method tokens must not be empty".into(),
            ));
        }
        if zelle == venmo {
            return Err(ReconError::ConfigValidation(format!(
                "method tokens must differ, both are '{zelle}'"
            )));
        }

        if self.form.payment_column_prefix.is_empty() {
            return Err(ReconError::ConfigValidation(
                "form.payment_column_prefix must not be empty".into(),
            ));
        }
        if self.form.name_column.trim().is_empty() {
            return Err(ReconError::ConfigValidation(
                "form.name_column must not be empty".into(),
            ));
        }

        if self.notifications.tag.trim().is_empty() || self.notifications.phrase.trim().is_empty() {
            return Err(ReconError::ConfigValidation(
                "notification tag and phrase must not be empty".into(),
            ));
        }

        let outputs: Vec<&str> = [
            Some(self.outputs.venmo.as_str()),
            Some(self.outputs.zelle.as_str()),
            self.outputs.unresolved_path(),
        ]
        .into_iter()
        .flatten()
        .collect();
        for (i, a) in outputs.iter().enumerate() {
            if outputs[i + 1..].contains(a) {
                return Err(ReconError::ConfigValidation(format!(
                    "output file '{a}' is used more than once"
                )));
            }
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
