//! Turns the collaborator's raw answer into [`Company`] records.

use angocontacts_core::{is_valid_email, Company, SocialLink};
use serde::Deserialize;
use uuid::Uuid;

/// One entry of the collaborator's answer. Every field except `name` may be
/// missing or `null`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CandidateCompany {
    name: String,
    logo_url: Option<String>,
    emails: Option<Vec<String>>,
    landline_phone: Option<String>,
    mobile_phone: Option<String>,
    address: Option<String>,
    google_maps_link: Option<String>,
    website: Option<String>,
    social_media: Option<Vec<SocialLink>>,
    description: Option<String>,
    sector: Option<String>,
    province: Option<String>,
}

impl CandidateCompany {
    fn into_company(self) -> Company {
        Company {
            id: Uuid::new_v4().to_string(),
            name: self.name,
            logo_url: self.logo_url,
            emails: self
                .emails
                .unwrap_or_default()
                .into_iter()
                .filter(|e| is_valid_email(e))
                .collect(),
            landline_phone: self.landline_phone,
            mobile_phone: self.mobile_phone,
            address: self.address.unwrap_or_default(),
            google_maps_link: self.google_maps_link,
            website: self.website,
            social_media: self.social_media.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            sector: self.sector.unwrap_or_default(),
            province: self.province.unwrap_or_default(),
        }
    }
}

/// Parses a JSON array of candidates.
///
/// Each record gets a fresh id and keeps only syntactically valid emails.
/// Entries that do not look like a company are skipped. Blank text is an
/// empty answer; any other payload that is not a JSON array is logged and
/// yields no records.
#[must_use]
pub fn parse_candidates(text: &str) -> Vec<Company> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let entries: Vec<serde_json::Value> = match serde_json::from_str(text) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::error!(error = %e, "failed to parse search response");
            return Vec::new();
        }
    };

    let total = entries.len();
    let companies: Vec<Company> = entries
        .into_iter()
        .filter_map(|v| serde_json::from_value::<CandidateCompany>(v).ok())
        .map(CandidateCompany::into_company)
        .collect();

    if companies.len() != total {
        tracing::warn!(
            total,
            parsed = companies.len(),
            "skipped malformed search candidates"
        );
    }
    companies
}
