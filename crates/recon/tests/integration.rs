use std::path::PathBuf;

use payverify_recon::form::FormSheet;
use payverify_recon::model::{VerdictNote, VerdictStatus};
use payverify_recon::{prepare_input, run, ReconError, ReconResult, VerifyConfig};

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn fixture(name: &str) -> String {
    let path = fixtures_dir().join(name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("cannot read {}: {e}", path.display()))
}

const NAME: &str = "Full name (First + Last as shown on ID)";
const PAY: &str = "You are purchasing ONE ˗ˏˋTierˎˊ˗ ticket - how did you pay?";

fn sheet(tier: &str, rows: &[(&str, &str, &str)]) -> FormSheet {
    FormSheet {
        name: tier.into(),
        headers: vec!["Timestamp".into(), "Email Address".into(), NAME.into(), PAY.into()],
        rows: rows
            .iter()
            .map(|(name, email, method)| {
                vec!["5/1/2025".into(), email.to_string(), name.to_string(), method.to_string()]
            })
            .collect(),
    }
}

fn form_sheets() -> Vec<FormSheet> {
    vec![
        sheet(
            "Tier 1",
            &[
                ("Ana Ruiz", "ana@example.com", "Zelle"),
                ("Lee Soo", "", "zelle (BofA)"),
            ],
        ),
        sheet("Tier 2", &[("kim min", "kim@example.com", "Venmo @kimmin")]),
        sheet(
            "Tier 3",
            &[
                ("Jane Doe", "jane@example.com", "Zelle"),
                ("Grace Oh", "grace@example.com", "venmo"),
                ("Bo Kim", "bo@example.com", "PayPal"),
            ],
        ),
        sheet(
            "Tier 4",
            &[
                ("Min-Jun Park", "mj@example.com", "zelle"),
                ("Dan Cho", "dan@example.com", "zelle and also venmo"),
                ("Eve Lim", "eve@example.com", "Venmo"),
            ],
        ),
    ]
}

fn load_and_run(sheets: &[FormSheet]) -> Result<ReconResult, ReconError> {
    let config = VerifyConfig::from_toml(&fixture("verify.toml"))?;
    let input = prepare_input(&config, &fixture("zelle_sms.txt"), sheets, &fixture("statement.csv"))?;
    Ok(run(&input))
}

// -------------------------------------------------------------------------
// Full run
// -------------------------------------------------------------------------

#[test]
fn full_run_summary() {
    let result = load_and_run(&form_sheets()).unwrap();
    let s = &result.summary;

    assert_eq!(s.zelle.total, 4);
    assert_eq!(s.zelle.paid, 2);
    assert_eq!(s.zelle.underpaid, 1);
    assert_eq!(s.zelle.overpaid, 1);
    assert_eq!(s.zelle.missing, 0);

    assert_eq!(s.venmo.total, 4);
    assert_eq!(s.venmo.paid, 2);
    assert_eq!(s.venmo.overpaid, 1);
    assert_eq!(s.venmo.missing, 1);

    assert_eq!(s.unresolved, 1);
    assert!(!s.all_clear());
}

#[test]
fn zelle_verdicts() {
    let result = load_and_run(&form_sheets()).unwrap();
    let names: Vec<_> = result.zelle.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names, ["Ana Ruiz", "Lee Soo", "Jane Doe", "Min-Jun Park"]);

    // two notifications from Ana: $5 matches tier 1
    let ana = &result.zelle[0];
    assert_eq!(ana.status, VerdictStatus::Paid);
    assert_eq!(ana.received_cents, Some(500));
    assert_eq!(ana.difference_cents, None);

    let lee = &result.zelle[1];
    assert_eq!(lee.status, VerdictStatus::NotPaid);
    assert_eq!(lee.note, VerdictNote::IncorrectAmount);
    assert_eq!(lee.received_cents, Some(700));
    assert_eq!(lee.difference_cents, Some(-200));
    assert_eq!(lee.email, None);

    let jane = &result.zelle[2];
    assert_eq!(jane.tier, "Tier 3");
    assert_eq!(jane.expected_cents, 1000);
    assert_eq!(jane.status, VerdictStatus::Paid);

    let park = &result.zelle[3];
    assert_eq!(park.note, VerdictNote::IncorrectAmount);
    assert_eq!(park.difference_cents, Some(1));
}

#[test]
fn venmo_verdicts() {
    let result = load_and_run(&form_sheets()).unwrap();
    let names: Vec<_> = result.venmo.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names, ["Kim Min", "Grace Oh", "Dan Cho", "Eve Lim"]);

    assert!(result.venmo[0].is_paid());
    assert_eq!(result.venmo[1].received_cents, Some(1200));
    assert_eq!(result.venmo[1].difference_cents, Some(-200));
    // both providers named: counted as venmo
    assert!(result.venmo[2].is_paid());
    assert_eq!(result.venmo[3].note, VerdictNote::NoPaymentFound);
    assert_eq!(result.venmo[3].received_cents, None);
}

#[test]
fn unresolved_registrations_are_listed() {
    let result = load_and_run(&form_sheets()).unwrap();
    assert_eq!(result.unresolved.len(), 1);
    let bo = &result.unresolved[0];
    assert_eq!(bo.name, "Bo Kim");
    assert_eq!(bo.raw_method, "PayPal");
    assert_eq!(bo.expected_cents, 1000);
}

#[test]
fn result_serializes_to_json() {
    let result = load_and_run(&form_sheets()).unwrap();
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["summary"]["zelle"]["paid"], 2);
    assert_eq!(json["zelle"][1]["note"], "incorrect_amount");
    assert_eq!(json["zelle"][1]["difference_cents"], -200);
    assert!(json["zelle"][0].get("difference_cents").is_none());
    assert_eq!(json["unresolved"][0]["raw_method"], "PayPal");
}

#[test]
fn blank_name_does_not_match_statement_footer() {
    let mut sheets = form_sheets();
    sheets[1].rows.push(vec!["5/1/2025".into(), "anon@example.com".into(), "".into(), "Venmo".into()]);
    let result = load_and_run(&sheets).unwrap();

    let anon = result
        .venmo
        .iter()
        .find(|v| v.email.as_deref() == Some("anon@example.com"))
        .unwrap();
    assert_eq!(anon.note, VerdictNote::NoPaymentFound);
    assert_eq!(anon.received_cents, None);
}

// -------------------------------------------------------------------------
// Configuration errors
// -------------------------------------------------------------------------

#[test]
fn unpriced_tier_aborts_run() {
    let mut sheets = form_sheets();
    sheets.push(sheet("VIP", &[("Rich Person", "r@example.com", "zelle")]));
    let err = load_and_run(&sheets).unwrap_err();
    assert!(err.is_configuration());
    assert!(err.to_string().contains("VIP"));
}

#[test]
fn missing_payment_column_aborts_run() {
    let mut sheets = form_sheets();
    sheets[2].headers[3] = "How did you pay?".into();
    let err = load_and_run(&sheets).unwrap_err();
    assert!(matches!(err, ReconError::MissingPaymentColumn { ref sheet, .. } if sheet == "Tier 3"));
}
