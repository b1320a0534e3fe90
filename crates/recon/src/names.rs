//! Person-name canonicalization. The normalized form is the only join key
//! between registrations and transactions.

/// Lower-case, trim, and collapse internal whitespace runs to one space.
pub fn normalize_name(raw: &str) -> String {
    raw.split_whitespace()
        .map(|part| part.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Absent input normalizes to the empty string.
pub fn normalize_optional(raw: Option<&str>) -> String {
    raw.map(normalize_name).unwrap_or_default()
}

/// Title-case a name for reports: the first letter of every alphabetic run
/// is upper-cased, the rest lower-cased (`o'brien-smith` -> `O'Brien-Smith`).
pub fn display_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut prev_alpha = false;
    for c in name.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}
