//! Syntactic email check used at the ingestion boundary.

use std::sync::LazyLock;

use regex::Regex;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// Returns `true` for strings shaped like `local@domain.tld`.
///
/// No whitespace anywhere and exactly one `@`. This is a shape check only;
/// the domain is never resolved.
#[must_use]
pub fn is_valid_email(s: &str) -> bool {
    EMAIL_RE.is_match(s)
}
