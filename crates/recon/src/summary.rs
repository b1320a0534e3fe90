use crate::model::{ProviderSummary, ReconSummary, UnresolvedRegistration, Verdict, VerdictNote};

/// Count outcomes for one provider's verdicts.
pub fn summarize_provider(verdicts: &[Verdict]) -> ProviderSummary {
    let mut summary = ProviderSummary {
        total: verdicts.len(),
        ..Default::default()
    };

    for v in verdicts {
        if v.is_paid() {
            summary.paid += 1;
        } else if v.note == VerdictNote::NoPaymentFound {
            summary.missing += 1;
        } else if v.is_underpaid() {
            summary.underpaid += 1;
        } else if v.is_overpaid() {
            summary.overpaid += 1;
        }
    }

    summary
}

pub fn compute_summary(
    zelle: &[Verdict],
    venmo: &[Verdict],
    unresolved: &[UnresolvedRegistration],
) -> ReconSummary {
    ReconSummary {
        zelle: summarize_provider(zelle),
        venmo: summarize_provider(venmo),
        unresolved: unresolved.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::VerdictStatus;

    fn verdict(status: VerdictStatus, diff: Option<i64>, note: VerdictNote) -> Verdict {
        Verdict {
            name: "Jane Doe".into(),
            email: None,
            tier: "Tier 1".into(),
            expected_cents: 500,
            status,
            received_cents: diff.map(|d| 500 - d),
            difference_cents: diff,
            note,
        }
    }

    #[test]
    fn summary_counts() {
        let verdicts = vec![
            verdict(VerdictStatus::Paid, None, VerdictNote::None),
            verdict(VerdictStatus::Paid, None, VerdictNote::None),
            verdict(VerdictStatus::NotPaid, Some(200), VerdictNote::IncorrectAmount),
            verdict(VerdictStatus::NotPaid, Some(-100), VerdictNote::IncorrectAmount),
            verdict(VerdictStatus::NotPaid, None, VerdictNote::NoPaymentFound),
        ];
        let s = summarize_provider(&verdicts);
        assert_eq!(s.total, 5);
        assert_eq!(s.paid, 2);
        assert_eq!(s.underpaid, 1);
        assert_eq!(s.overpaid, 1);
        assert_eq!(s.missing, 1);
        assert_eq!(s.not_paid(), 3);
    }

    #[test]
    fn empty_is_all_clear() {
        let s = compute_summary(&[], &[], &[]);
        assert!(s.all_clear());
        assert_eq!(s.zelle.total, 0);
    }
}
