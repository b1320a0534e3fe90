use std::collections::BTreeMap;

use serde::Deserialize;

use crate::amount::{format_cents, to_cents, MAX_AMOUNT_CENTS};
use crate::error::ReconError;

/// Tier label -> expected amount in cents.
///
/// Deserializes from a TOML table of `label = amount`, amounts in whole
/// currency units (`"Tier 1" = 5`, `"Tier 2" = 7.5`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "BTreeMap<String, f64>")]
pub struct PricingTable {
    tiers: BTreeMap<String, i64>,
}

impl Default for PricingTable {
    fn default() -> Self {
        Self::from_cents([
            ("Tier 1", 500),
            ("Tier 2", 700),
            ("Tier 3", 1000),
            ("Tier 4", 1500),
        ])
    }
}

impl TryFrom<BTreeMap<String, f64>> for PricingTable {
    type Error = String;

    fn try_from(raw: BTreeMap<String, f64>) -> Result<Self, Self::Error> {
        let mut tiers = BTreeMap::new();
        for (label, amount) in raw {
            if !amount.is_finite() || amount < 0.0 {
                return Err(format!("tier '{label}': price must be a non-negative number, got {amount}"));
            }
            let cents = to_cents(amount).ok_or_else(|| {
                format!("tier '{label}': price {amount} is out of range (max {})", format_cents(MAX_AMOUNT_CENTS))
            })?;
            tiers.insert(label, cents);
        }
        Ok(Self { tiers })
    }
}

impl PricingTable {
    pub fn from_cents<L: Into<String>>(entries: impl IntoIterator<Item = (L, i64)>) -> Self {
        Self {
            tiers: entries.into_iter().map(|(l, c)| (l.into(), c)).collect(),
        }
    }

    /// Expected amount for a tier. Unknown tiers are a fatal configuration error.
    pub fn resolve(&self, tier: &str) -> Result<i64, ReconError> {
        self.tiers
            .get(tier)
            .copied()
            .ok_or_else(|| ReconError::UnpricedTier {
                sheet: tier.into(),
                tier: tier.into(),
            })
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.tiers.iter().map(|(l, c)| (l.as_str(), *c))
    }
}
