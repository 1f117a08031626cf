//! Sorting, numbering and column layout shared by every export format.

use angocontacts_core::Company;

/// Columns that follow the email block, in order.
pub const TRAILING_HEADERS: [&str; 8] = [
    "Landline",
    "Mobile",
    "Address",
    "Google Maps",
    "Website",
    "Sector",
    "Province",
    "Description",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRow {
    /// 1-based position in the sorted table, zero-padded to four digits.
    pub ext_id: String,
    pub company: Company,
}

/// A sorted, numbered copy of a company list ready to be rendered.
///
/// Stored ids are never touched; `EXT_ID` exists only in the export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportTable {
    email_columns: usize,
    rows: Vec<ExportRow>,
}

impl ExportTable {
    /// Sorts by name (case-insensitive, ties keep input order) and sizes the
    /// email block to the record with the most emails, with at least one
    /// column.
    #[must_use]
    pub fn build(companies: &[Company]) -> Self {
        let mut sorted = companies.to_vec();
        sorted.sort_by_cached_key(|c| c.name.to_lowercase());

        let email_columns = sorted.iter().map(|c| c.emails.len()).max().unwrap_or(0).max(1);
        let rows = sorted
            .into_iter()
            .enumerate()
            .map(|(i, company)| ExportRow {
                ext_id: format!("{:04}", i + 1),
                company,
            })
            .collect();

        Self {
            email_columns,
            rows,
        }
    }

    #[must_use]
    pub fn rows(&self) -> &[ExportRow] {
        &self.rows
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn email_headers(&self) -> Vec<String> {
        (0..self.email_columns).map(email_header).collect()
    }

    #[must_use]
    pub fn headers(&self) -> Vec<String> {
        let mut headers = vec!["EXT_ID".to_string(), "Name".to_string()];
        headers.extend(self.email_headers());
        headers.extend(TRAILING_HEADERS.iter().map(|h| (*h).to_string()));
        headers
    }

    /// One cell list per row, aligned with [`Self::headers`]. Missing values
    /// render as empty cells.
    pub fn records(&self) -> impl Iterator<Item = Vec<&str>> + '_ {
        self.rows.iter().map(move |row| {
            let c = &row.company;
            let mut cells = Vec::with_capacity(2 + self.email_columns + TRAILING_HEADERS.len());
            cells.push(row.ext_id.as_str());
            cells.push(c.name.as_str());
            for i in 0..self.email_columns {
                cells.push(c.emails.get(i).map_or("", String::as_str));
            }
            cells.extend([
                c.landline_phone.as_deref().unwrap_or(""),
                c.mobile_phone.as_deref().unwrap_or(""),
                c.address.as_str(),
                c.google_maps_link.as_deref().unwrap_or(""),
                c.website.as_deref().unwrap_or(""),
                c.sector.as_str(),
                c.province.as_str(),
                c.description.as_str(),
            ]);
            cells
        })
    }
}

/// `EMAIL`, `EMAIL_A` .. `EMAIL_Z`, then the 1-based column number (`EMAIL_28`).
fn email_header(index: usize) -> String {
    match index {
        0 => "EMAIL".to_string(),
        1..=26 => {
            let letter = char::from(b'A' + u8::try_from(index - 1).unwrap_or(0));
            format!("EMAIL_{letter}")
        }
        n => format!("EMAIL_{}", n + 1),
    }
}
