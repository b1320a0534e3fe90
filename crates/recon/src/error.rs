use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReconError {
    /// TOML parse / deserialization error.
    #[error("config parse error: {0}")]
    ConfigParse(String),
    /// Config validation error (empty pricing table, clashing tokens, etc.).
    #[error("config validation error: {0}")]
    ConfigValidation(String),
    /// Notification template does not compile.
    #[error("invalid notification template: {0}")]
    InvalidTemplate(String),
    /// Required column missing from a form sheet or statement header.
    #[error("sheet '{sheet}': missing column '{column}'")]
    MissingColumn { sheet: String, column: String },
    /// No header starts with the payment-method prefix.
    #[error("sheet '{sheet}': could not find payment column (header starting with '{prefix}')")]
    MissingPaymentColumn { sheet: String, prefix: String },
    /// More than one header starts with the payment-method prefix.
    #[error("sheet '{sheet}': ambiguous payment column, {} headers match: {}", columns.len(), columns.join(", "))]
    AmbiguousPaymentColumn { sheet: String, columns: Vec<String> },
    /// Tier label with no pricing entry.
    #[error("sheet '{sheet}': tier '{tier}' has no pricing entry")]
    UnpricedTier { sheet: String, tier: String },
    /// Malformed statement export.
    #[error("statement error: {0}")]
    Statement(String),
}

impl ReconError {
    /// Configuration errors abort the run before any output is written.
    pub fn is_configuration(&self) -> bool {
        !matches!(self, Self::Statement(_))
    }
}
