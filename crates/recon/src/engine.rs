use std::collections::HashMap;

use crate::model::{
    Provider, ReconInput, ReconMeta, ReconResult, Registration, Transaction,
    UnresolvedRegistration, Verdict, VerdictNote, VerdictStatus,
};
use crate::names::display_name;
use crate::summary::compute_summary;

/// Run both provider passes. Registrations with an unknown method land in
/// `unresolved` instead of either verdict list.
pub fn run(input: &ReconInput) -> ReconResult {
    let mut zelle_regs = Vec::new();
    let mut venmo_regs = Vec::new();
    let mut unresolved = Vec::new();

    for reg in &input.registrations {
        match reg.method.provider() {
            Some(Provider::Zelle) => zelle_regs.push(reg),
            Some(Provider::Venmo) => venmo_regs.push(reg),
            None => {
                tracing::warn!(
                    name = %reg.name,
                    tier = %reg.tier,
                    method = %reg.raw_method,
                    "payment method matches neither provider"
                );
                unresolved.push(UnresolvedRegistration {
                    name: display_name(&reg.name),
                    email: reg.email.clone(),
                    tier: reg.tier.clone(),
                    expected_cents: reg.expected_cents,
                    raw_method: reg.raw_method.clone(),
                });
            }
        }
    }

    let zelle = reconcile_provider(zelle_regs, &input.zelle);
    let venmo = reconcile_provider(venmo_regs, &input.venmo);

    let summary = compute_summary(&zelle, &venmo, &unresolved);

    ReconResult {
        meta: ReconMeta {
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
        },
        summary,
        venmo,
        zelle,
        unresolved,
    }
}

/// Reconcile registrations against one provider's transactions.
///
/// Candidates are transactions whose sender equals the registrant's
/// normalized name. Any candidate of exactly the expected amount means paid;
/// otherwise the first candidate in source order is reported as received.
pub fn reconcile_provider<'a>(
    registrations: impl IntoIterator<Item = &'a Registration>,
    transactions: &[Transaction],
) -> Vec<Verdict> {
    let mut by_sender: HashMap<&str, Vec<&Transaction>> = HashMap::new();
    for txn in transactions {
        by_sender.entry(txn.sender_name.as_str()).or_default().push(txn);
    }

    registrations
        .into_iter()
        .map(|reg| {
            let candidates = by_sender.get(reg.name.as_str()).map(Vec::as_slice).unwrap_or(&[]);
            let verdict = judge(reg, candidates);
            tracing::debug!(
                name = %reg.name,
                candidates = candidates.len(),
                status = ?verdict.status,
                "reconciled registration"
            );
            verdict
        })
        .collect()
}

fn judge(reg: &Registration, candidates: &[&Transaction]) -> Verdict {
    let mut verdict = Verdict {
        name: display_name(&reg.name),
        email: reg.email.clone(),
        tier: reg.tier.clone(),
        expected_cents: reg.expected_cents,
        status: VerdictStatus::NotPaid,
        received_cents: None,
        difference_cents: None,
        note: VerdictNote::NoPaymentFound,
    };

    let Some(first) = candidates.first() else {
        return verdict;
    };

    if candidates.iter().any(|t| t.amount_cents == reg.expected_cents) {
        verdict.status = VerdictStatus::Paid;
        verdict.received_cents = Some(reg.expected_cents);
        verdict.note = VerdictNote::None;
    } else {
        verdict.received_cents = Some(first.amount_cents);
        verdict.difference_cents = Some(reg.expected_cents.saturating_sub(first.amount_cents));
        verdict.note = VerdictNote::IncorrectAmount;
    }

    verdict
}
