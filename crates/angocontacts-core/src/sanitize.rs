//! Cross-record removal of duplicate emails and phone numbers.
//!
//! A single pass walks the list in order with two uniqueness sets scoped to
//! the whole call: one for emails and one shared by every phone slot, so a
//! landline that repeats another record's mobile is caught too. The first
//! occurrence in list order always wins. Callers wanting a canonical order
//! must sort first.

use std::collections::HashSet;

use crate::model::Company;
use crate::normalize::{normalize_email, normalize_phone};

/// Field access the sanitizer and the dedup engine need from a record.
pub trait ContactRecord: Clone {
    fn name(&self) -> &str;

    fn emails_mut(&mut self) -> &mut Vec<String>;

    /// Phone slots in the order they are checked. All slots share one
    /// uniqueness namespace.
    fn phone_slots_mut(&mut self) -> impl Iterator<Item = &mut Option<String>>;
}

impl ContactRecord for Company {
    fn name(&self) -> &str {
        &self.name
    }

    fn emails_mut(&mut self) -> &mut Vec<String> {
        &mut self.emails
    }

    fn phone_slots_mut(&mut self) -> impl Iterator<Item = &mut Option<String>> {
        [&mut self.mobile_phone, &mut self.landline_phone].into_iter()
    }
}

/// Output of a sanitize pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sanitized<R> {
    pub cleaned: Vec<R>,
    /// Emails and phones dropped as duplicates, combined.
    pub removed_count: usize,
}

/// Sanitize pass parameterized by the two key functions.
#[derive(Debug, Clone, Copy)]
pub struct Sanitizer {
    email_key: fn(&str) -> String,
    phone_key: fn(&str) -> String,
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self::new(normalize_email, normalize_phone)
    }
}

impl Sanitizer {
    #[must_use]
    pub fn new(email_key: fn(&str) -> String, phone_key: fn(&str) -> String) -> Self {
        Self {
            email_key,
            phone_key,
        }
    }

    /// Returns a cleaned copy of `records`; the input is never mutated.
    ///
    /// Blank values are dropped without counting. Kept values are trimmed.
    #[must_use]
    pub fn run<R: ContactRecord>(&self, records: &[R]) -> Sanitized<R> {
        let mut emails = SeenSet::new(self.email_key);
        let mut phones = SeenSet::new(self.phone_key);
        let mut removed_count = 0;

        let cleaned = records
            .iter()
            .map(|record| {
                let mut out = record.clone();

                let original = std::mem::take(out.emails_mut());
                let kept = out.emails_mut();
                for email in &original {
                    match emails.admit(email) {
                        Admission::Blank => {}
                        Admission::Duplicate => removed_count += 1,
                        Admission::Kept(value) => kept.push(value),
                    }
                }

                for slot in out.phone_slots_mut() {
                    let Some(raw) = slot.take() else {
                        continue;
                    };
                    *slot = match phones.admit(&raw) {
                        Admission::Blank => None,
                        Admission::Duplicate => {
                            removed_count += 1;
                            None
                        }
                        Admission::Kept(value) => Some(value),
                    };
                }

                out
            })
            .collect();

        Sanitized {
            cleaned,
            removed_count,
        }
    }
}

/// Sanitizes with the standard email and phone keys.
#[must_use]
pub fn sanitize<R: ContactRecord>(records: &[R]) -> Sanitized<R> {
    Sanitizer::default().run(records)
}

enum Admission {
    Blank,
    Duplicate,
    Kept(String),
}

struct SeenSet {
    key: fn(&str) -> String,
    seen: HashSet<String>,
}

impl SeenSet {
    fn new(key: fn(&str) -> String) -> Self {
        Self {
            key,
            seen: HashSet::new(),
        }
    }

    fn admit(&mut self, raw: &str) -> Admission {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Admission::Blank;
        }
        if self.seen.insert((self.key)(trimmed)) {
            Admission::Kept(trimmed.to_string())
        } else {
            Admission::Duplicate
        }
    }
}

#[cfg(test)]
#[path = "sanitize_test.rs"]
mod tests;
