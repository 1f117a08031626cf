//! Equality keys for names, emails and phone numbers.
//!
//! None of these are ever written back into a record; the display value is
//! kept as entered. A byte-order mark left over from an imported file counts
//! as whitespace.

const BOM: char = '\u{feff}';

fn trim_key(s: &str) -> &str {
    s.trim_matches(|c: char| c.is_whitespace() || c == BOM)
}

/// Trims and lower-cases a company name.
#[must_use]
pub fn normalize_name(name: &str) -> String {
    trim_key(name).to_lowercase()
}

/// Trims and lower-cases an email address.
#[must_use]
pub fn normalize_email(email: &str) -> String {
    trim_key(email).to_lowercase()
}

/// Strips whitespace, hyphens and parentheses from a phone number.
///
/// `"(+244) 912-345 678"` and `"+244912345678"` share a key.
#[must_use]
pub fn normalize_phone(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(*c, BOM | '-' | '(' | ')'))
        .collect()
}
