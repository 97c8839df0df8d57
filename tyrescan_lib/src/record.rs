//! Pipeline records: search hits that passed the classifier, and the flat
//! per-company rows the artefacts are built from.

use companies_house_api::types::SearchHit;
use serde::{Deserialize, Serialize};

use crate::classify::BusinessType;

/// Separator for every list-valued field in a flat record.
pub const LIST_SEPARATOR: &str = "; ";

/// An in-scope search hit. Unique by company number once deduplicated.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub hit: SearchHit,
    pub business_type: BusinessType,
    /// The search phrase that first surfaced this company.
    pub query_term: String,
}

impl Candidate {
    pub fn company_number(&self) -> &str {
        &self.hit.company_number
    }
}

/// One flat row per company. Dates are `YYYY-MM-DD`, lists are joined with
/// [`LIST_SEPARATOR`], absent data is an empty string or zero.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct EnrichedRecord {
    pub company_number: String,
    pub company_name: String,
    pub status: String,
    pub company_type: String,
    pub date_of_creation: String,
    pub registered_address: String,
    pub postcode: String,
    pub locality: String,
    pub region: String,
    pub country: String,
    pub jurisdiction: String,
    pub sic_codes: String,
    pub sic_descriptions: String,
    pub business_type: BusinessType,
    pub query_term: String,
    pub categories: String,
    pub is_truck_commercial: bool,
    pub is_mobile: bool,

    pub last_accounts_date: String,
    pub last_accounts_type: String,
    pub next_accounts_due: String,
    /// `DD/MM` year end.
    pub accounting_reference_date: String,
    pub last_confirmation: String,
    pub next_confirmation_due: String,

    pub total_officers: usize,
    pub active_directors: usize,
    /// Up to five active director names.
    pub director_names: String,

    pub total_filings: usize,
    pub latest_filing_date: String,
    pub latest_filing_type: String,
    pub latest_filing_description: String,

    pub total_charges: usize,
    pub outstanding_charges: usize,

    pub psc_count: usize,
    /// Up to three PSC display names.
    pub psc_names: String,

    pub has_charges: bool,
    pub has_insolvency_history: bool,
    pub can_file: bool,
}

impl EnrichedRecord {
    pub fn is_active(&self) -> bool {
        self.status == "active"
    }
}

/// Joins list items with [`LIST_SEPARATOR`], dropping blanks and folding any
/// embedded line breaks to spaces.
pub fn join_list<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items
        .into_iter()
        .map(|item| single_line(item.as_ref()))
        .filter(|item| !item.is_empty())
        .collect::<Vec<_>>()
        .join(LIST_SEPARATOR)
}

/// Trims and replaces CR/LF with spaces.
pub fn single_line(value: &str) -> String {
    value
        .trim()
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect()
}
