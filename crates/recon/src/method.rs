use serde::Deserialize;

use crate::model::PaymentMethod;

/// Classifies free-text payment declarations by provider name tokens.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MethodClassifier {
    pub zelle_token: String,
    pub venmo_token: String,
}

impl Default for MethodClassifier {
    fn default() -> Self {
        Self {
            zelle_token: "zelle".into(),
            venmo_token: "venmo".into(),
        }
    }
}

impl MethodClassifier {
    /// First matching rule wins:
    /// 1. zelle token present and venmo token absent -> Zelle
    /// 2. venmo token present -> Venmo
    /// 3. otherwise -> Unknown
    ///
    /// When both tokens appear the declaration counts as Venmo.
    pub fn classify(&self, raw: Option<&str>) -> PaymentMethod {
        let text = raw.unwrap_or_default().to_lowercase();
        let zelle = text.contains(&self.zelle_token.to_lowercase());
        let venmo = text.contains(&self.venmo_token.to_lowercase());

        if zelle && !venmo {
            PaymentMethod::Zelle
        } else if venmo {
            PaymentMethod::Venmo
        } else {
            PaymentMethod::Unknown
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_declarations() {
        let c = MethodClassifier::default();
        assert_eq!(c.classify(Some("I paid via Venmo")), PaymentMethod::Venmo);
        assert_eq!(c.classify(Some("zelle and also venmo")), PaymentMethod::Venmo);
        assert_eq!(c.classify(Some("Zelle only")), PaymentMethod::Zelle);
        assert_eq!(c.classify(Some("cash")), PaymentMethod::Unknown);
        assert_eq!(c.classify(Some("")), PaymentMethod::Unknown);
        assert_eq!(c.classify(None), PaymentMethod::Unknown);
    }

    #[test]
    fn substring_match() {
        let c = MethodClassifier::default();
        assert_eq!(
            c.classify(Some("Tier 2 ($7) - ZELLE to 555-0100")),
            PaymentMethod::Zelle
        );
        assert_eq!(c.classify(Some("@venmo-handle")), PaymentMethod::Venmo);
    }

    #[test]
    fn custom_tokens() {
        let c = MethodClassifier {
            zelle_token: "BofA".into(),
            venmo_token: "CashApp".into(),
        };
        assert_eq!(c.classify(Some("sent via bofa")), PaymentMethod::Zelle);
        assert_eq!(c.classify(Some("cashapp")), PaymentMethod::Venmo);
        assert_eq!(c.classify(Some("zelle")), PaymentMethod::Unknown);
    }
}
