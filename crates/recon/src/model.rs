use serde::Serialize;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// Payment rail a transaction came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Provider {
    /// Bank SMS notifications.
    Zelle,
    /// Exported transaction statement.
    Venmo,
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Zelle => write!(f, "zelle"),
            Self::Venmo => write!(f, "venmo"),
        }
    }
}

/// A single received payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transaction {
    pub provider: Provider,
    /// Normalized sender name.
    pub sender_name: String,
    pub amount_cents: i64,
}

/// How a registrant said they paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Zelle,
    Venmo,
    Unknown,
}

impl PaymentMethod {
    pub fn provider(self) -> Option<Provider> {
        match self {
            Self::Zelle => Some(Provider::Zelle),
            Self::Venmo => Some(Provider::Venmo),
            Self::Unknown => None,
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Zelle => write!(f, "zelle"),
            Self::Venmo => write!(f, "venmo"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// One form submission, annotated with its expected amount and method.
#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    /// Normalized full name, the join key against transactions.
    pub name: String,
    pub email: Option<String>,
    pub tier: String,
    pub expected_cents: i64,
    pub raw_method: String,
    pub method: PaymentMethod,
}

/// Everything the engine needs, already loaded.
#[derive(Debug, Default)]
pub struct ReconInput {
    pub registrations: Vec<Registration>,
    pub zelle: Vec<Transaction>,
    pub venmo: Vec<Transaction>,
}

// ---------------------------------------------------------------------------
// Verdicts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictStatus {
    Paid,
    NotPaid,
}

impl std::fmt::Display for VerdictStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Paid => write!(f, "✅ Paid"),
            Self::NotPaid => write!(f, "❌ Not Paid"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictNote {
    None,
    IncorrectAmount,
    NoPaymentFound,
}

impl std::fmt::Display for VerdictNote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => Ok(()),
            Self::IncorrectAmount => write!(f, "Incorrect Amount"),
            Self::NoPaymentFound => write!(f, "No Payment Found"),
        }
    }
}

/// Per-registration outcome against one provider's transactions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    /// Title-cased name for reports.
    pub name: String,
    pub email: Option<String>,
    pub tier: String,
    pub expected_cents: i64,
    pub status: VerdictStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received_cents: Option<i64>,
    /// `expected - received`; positive means underpaid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difference_cents: Option<i64>,
    pub note: VerdictNote,
}

impl Verdict {
    pub fn is_paid(&self) -> bool {
        self.status == VerdictStatus::Paid
    }

    pub fn is_underpaid(&self) -> bool {
        self.difference_cents.is_some_and(|d| d > 0)
    }

    pub fn is_overpaid(&self) -> bool {
        self.difference_cents.is_some_and(|d| d < 0)
    }
}

/// A registration whose payment method matched neither provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnresolvedRegistration {
    pub name: String,
    pub email: Option<String>,
    pub tier: String,
    pub expected_cents: i64,
    pub raw_method: String,
}

// ---------------------------------------------------------------------------
// Summary + Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProviderSummary {
    pub total: usize,
    pub paid: usize,
    pub underpaid: usize,
    pub overpaid: usize,
    pub missing: usize,
}

impl ProviderSummary {
    pub fn not_paid(&self) -> usize {
        self.total - self.paid
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconSummary {
    pub zelle: ProviderSummary,
    pub venmo: ProviderSummary,
    pub unresolved: usize,
}

impl ReconSummary {
    /// True when every registrant is accounted for and paid in full.
    pub fn all_clear(&self) -> bool {
        self.zelle.not_paid() == 0 && self.venmo.not_paid() == 0 && self.unresolved == 0
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconMeta {
    pub engine_version: String,
    pub run_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconResult {
    pub meta: ReconMeta,
    pub summary: ReconSummary,
    pub venmo: Vec<Verdict>,
    pub zelle: Vec<Verdict>,
    pub unresolved: Vec<UnresolvedRegistration>,
}
