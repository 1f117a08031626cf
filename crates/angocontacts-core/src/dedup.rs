//! Record-level dedup keyed on normalized name.

use std::collections::HashSet;

use crate::normalize::normalize_name;
use crate::sanitize::ContactRecord;

/// Keeps the first record for each normalized name, in input order.
///
/// Sub-fields are left alone; see [`crate::sanitize`] for emails and phones.
#[must_use]
pub fn dedup_by_name<R: ContactRecord>(records: Vec<R>) -> Vec<R> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|record| seen.insert(normalize_name(record.name())))
        .collect()
}
