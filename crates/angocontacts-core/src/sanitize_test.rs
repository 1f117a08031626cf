use std::collections::HashSet;

use super::*;
use crate::dedup::dedup_by_name;
use crate::model::SocialLink;

fn company(name: &str, emails: &[&str]) -> Company {
    let mut c = Company::new(name);
    c.emails = emails.iter().map(|e| (*e).to_string()).collect();
    c
}

fn with_phones(mut c: Company, mobile: Option<&str>, landline: Option<&str>) -> Company {
    c.mobile_phone = mobile.map(str::to_string);
    c.landline_phone = landline.map(str::to_string);
    c
}

fn noisy_fixture() -> Vec<Company> {
    vec![
        with_phones(
            company("Banco BAI", &["geral@bai.ao", " GERAL@bai.ao", "", "rh@bai.ao"]),
            Some("923 111 222"),
            Some("222 333 444"),
        ),
        with_phones(
            company("Unitel", &["rh@bai.ao", "apoio@unitel.ao"]),
            Some("222-333-444"),
            Some("(923) 111 222"),
        ),
        with_phones(
            company("Sonangol", &["apoio@unitel.ao "]),
            Some("  "),
            Some("226 000 000"),
        ),
        with_phones(company("TAAG", &[]), Some("226000000"), Some("226000000")),
    ]
}

fn all_phone_keys(records: &[Company]) -> Vec<String> {
    records
        .iter()
        .flat_map(|c| [c.mobile_phone.as_deref(), c.landline_phone.as_deref()])
        .flatten()
        .map(normalize_phone)
        .collect()
}

// -----------------------------------------------------------------------
// emails
// -----------------------------------------------------------------------

#[test]
fn drops_repeated_email_within_one_record() {
    let out = sanitize(&[company("Foo", &["x@y.com", "x@y.com"])]);
    assert_eq!(out.cleaned[0].emails, ["x@y.com"]);
    assert_eq!(out.removed_count, 1);
}

#[test]
fn drops_email_seen_in_an_earlier_record() {
    let out = sanitize(&[
        company("A", &["shared@x.ao"]),
        company("B", &["Shared@X.ao", "own@b.ao"]),
    ]);
    assert_eq!(out.cleaned[0].emails, ["shared@x.ao"]);
    assert_eq!(out.cleaned[1].emails, ["own@b.ao"]);
    assert_eq!(out.removed_count, 1);
}

#[test]
fn keeps_trimmed_original_casing() {
    let out = sanitize(&[company("A", &["  Geral@Empresa.AO  "])]);
    assert_eq!(out.cleaned[0].emails, ["Geral@Empresa.AO"]);
}

#[test]
fn blank_emails_are_dropped_without_counting() {
    let out = sanitize(&[company("A", &["", "   ", "a@b.co"])]);
    assert_eq!(out.cleaned[0].emails, ["a@b.co"]);
    assert_eq!(out.removed_count, 0);
}

// -----------------------------------------------------------------------
// phones
// -----------------------------------------------------------------------

#[test]
fn mobile_and_landline_share_one_namespace_across_records() {
    let out = sanitize(&[
        with_phones(company("A", &[]), Some("912 345 678"), None),
        with_phones(company("B", &[]), None, Some("912345678")),
    ]);
    assert_eq!(out.removed_count, 1);
    assert_eq!(out.cleaned[0].mobile_phone.as_deref(), Some("912 345 678"));
    assert!(out.cleaned[1].landline_phone.is_none());
}

#[test]
fn landline_repeating_own_mobile_is_cleared() {
    let out = sanitize(&[with_phones(
        company("A", &[]),
        Some("(222) 111-000"),
        Some("222111000"),
    )]);
    assert_eq!(out.cleaned[0].mobile_phone.as_deref(), Some("(222) 111-000"));
    assert!(out.cleaned[0].landline_phone.is_none());
    assert_eq!(out.removed_count, 1);
}

#[test]
fn mobile_is_checked_before_landline() {
    let out = sanitize(&[
        with_phones(company("A", &[]), None, Some("900")),
        with_phones(company("B", &[]), Some("900"), Some("901")),
    ]);
    assert!(out.cleaned[1].mobile_phone.is_none());
    assert_eq!(out.cleaned[1].landline_phone.as_deref(), Some("901"));
}

#[test]
fn blank_phone_becomes_absent_without_counting() {
    let out = sanitize(&[with_phones(company("A", &[]), Some("   "), None)]);
    assert!(out.cleaned[0].mobile_phone.is_none());
    assert_eq!(out.removed_count, 0);
}

#[test]
fn kept_phone_is_trimmed() {
    let out = sanitize(&[with_phones(company("A", &[]), Some(" 923 000 000 "), None)]);
    assert_eq!(out.cleaned[0].mobile_phone.as_deref(), Some("923 000 000"));
}

// -----------------------------------------------------------------------
// whole-list behaviour
// -----------------------------------------------------------------------

#[test]
fn counts_emails_and_phones_together() {
    let out = sanitize(&noisy_fixture());
    // emails: " GERAL@bai.ao", "rh@bai.ao" (Unitel), "apoio@unitel.ao " (Sonangol)
    // phones: Unitel mobile + landline, TAAG mobile + landline
    assert_eq!(out.removed_count, 7);
}

#[test]
fn no_phone_key_survives_twice() {
    let out = sanitize(&noisy_fixture());
    let keys = all_phone_keys(&out.cleaned);
    let unique: HashSet<&String> = keys.iter().collect();
    assert_eq!(keys.len(), unique.len(), "duplicate phone in {keys:?}");
}

#[test]
fn no_email_key_survives_twice() {
    let out = sanitize(&noisy_fixture());
    let keys: Vec<String> = out
        .cleaned
        .iter()
        .flat_map(|c| c.emails.iter().map(|e| normalize_email(e)))
        .collect();
    let unique: HashSet<&String> = keys.iter().collect();
    assert_eq!(keys.len(), unique.len());
}

#[test]
fn second_pass_removes_nothing() {
    let first = sanitize(&noisy_fixture());
    let second = sanitize(&first.cleaned);
    assert_eq!(second.removed_count, 0);
    assert_eq!(second.cleaned, first.cleaned);
}

#[test]
fn input_is_not_mutated() {
    let input = noisy_fixture();
    let snapshot = input.clone();
    let _ = sanitize(&input);
    assert_eq!(input, snapshot);
}

#[test]
fn other_fields_are_copied_unchanged() {
    let mut c = company("Foo", &["a@b.co"]);
    c.address = "Rua 1, Luanda".into();
    c.website = Some("https://foo.ao".into());
    c.social_media = vec![SocialLink {
        platform: "linkedin".into(),
        url: "https://linkedin.example/foo".into(),
    }];
    let out = sanitize(std::slice::from_ref(&c));
    assert_eq!(out.cleaned[0].id, c.id);
    assert_eq!(out.cleaned[0].address, c.address);
    assert_eq!(out.cleaned[0].website, c.website);
    assert_eq!(out.cleaned[0].social_media, c.social_media);
}

#[test]
fn record_count_and_order_are_preserved() {
    let input = noisy_fixture();
    let out = sanitize(&input);
    let before: Vec<&str> = input.iter().map(|c| c.name.as_str()).collect();
    let after: Vec<&str> = out.cleaned.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(before, after);
}

#[test]
fn dedup_then_sanitize_scenario() {
    let input = vec![
        company("Foo", &["x@y.com", "x@y.com"]),
        company("foo", &["z@y.com"]),
    ];
    let unique = dedup_by_name(input);
    assert_eq!(unique.len(), 1);
    assert_eq!(unique[0].name, "Foo");

    let out = sanitize(&unique);
    assert_eq!(out.cleaned[0].emails, ["x@y.com"]);
    assert_eq!(out.removed_count, 1);
}

// -----------------------------------------------------------------------
// custom records and keys
// -----------------------------------------------------------------------

#[derive(Debug, Clone)]
struct Lead {
    name: String,
    emails: Vec<String>,
    phones: [Option<String>; 3],
}

impl ContactRecord for Lead {
    fn name(&self) -> &str {
        &self.name
    }

    fn emails_mut(&mut self) -> &mut Vec<String> {
        &mut self.emails
    }

    fn phone_slots_mut(&mut self) -> impl Iterator<Item = &mut Option<String>> {
        self.phones.iter_mut()
    }
}

#[test]
fn works_for_any_contact_record() {
    let lead = Lead {
        name: "x".into(),
        emails: vec!["a@b.co".into()],
        phones: [Some("1 2".into()), Some("12".into()), Some("3".into())],
    };
    let out = sanitize(&[lead]);
    assert_eq!(out.removed_count, 1);
    assert_eq!(
        out.cleaned[0].phones,
        [Some("1 2".to_string()), None, Some("3".to_string())]
    );
}

#[test]
fn custom_keys_change_what_counts_as_duplicate() {
    fn exact(s: &str) -> String {
        s.to_string()
    }
    let sanitizer = Sanitizer::new(exact, exact);
    let out = sanitizer.run(&[company("A", &["A@b.co", "a@b.co"])]);
    assert_eq!(out.removed_count, 0);
    assert_eq!(out.cleaned[0].emails.len(), 2);
}
