//! Money helpers. Every amount in the engine is integer cents, rounded to two
//! decimal places (half away from zero) at the point it enters the engine.

/// Largest magnitude accepted at ingestion: one trillion in currency units.
/// Differences between any two accepted amounts stay well inside `i64`.
pub const MAX_AMOUNT_CENTS: i64 = 100_000_000_000_000;

/// Round a float amount to cents. Non-finite or out-of-range amounts give `None`.
pub fn to_cents(amount: f64) -> Option<i64> {
    let cents = (amount * 100.0).round();
    if !cents.is_finite() || cents.abs() > MAX_AMOUNT_CENTS as f64 {
        return None;
    }
    Some(cents as i64)
}

/// Parse a plain decimal string (`"10"`, `"-7.5"`, `"10.004999"`) into cents.
///
/// Rounding looks at the third fractional digit of the text itself, so the
/// result does not depend on binary float representation. Amounts beyond
/// [`MAX_AMOUNT_CENTS`] give `None`.
pub fn parse_decimal_cents(s: &str) -> Option<i64> {
    let s = s.trim();
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };

    let (whole, frac) = match digits.split_once('.') {
        Some((w, f)) => (w, f),
        None => (digits, ""),
    };

    if whole.is_empty() && frac.is_empty() {
        return None;
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let whole_val: i64 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
    let frac_bytes = frac.as_bytes();
    let digit = |i: usize| frac_bytes.get(i).map(|b| (b - b'0') as i64).unwrap_or(0);

    let mut cents = whole_val
        .checked_mul(100)?
        .checked_add(digit(0) * 10 + digit(1))?;
    if digit(2) >= 5 {
        cents = cents.checked_add(1)?;
    }
    if cents > MAX_AMOUNT_CENTS {
        return None;
    }

    Some(if negative { -cents } else { cents })
}

/// Parse a display amount such as `"+ $1,234.50"` or `"- $5.00"`.
///
/// Every character other than digits, `.` and `-` is dropped before parsing.
pub fn parse_money_cents(s: &str) -> Option<i64> {
    let cleaned: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    parse_decimal_cents(&cleaned)
}

/// Cents as a float, for spreadsheet cells.
pub fn cents_to_f64(cents: i64) -> f64 {
    cents as f64 / 100.0
}

/// Cents as a fixed two-decimal string.
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{sign}{}.{:02}", abs / 100, abs % 100)
}
