//! Types for the company search endpoint.

use serde::{Deserialize, Serialize};

use super::Address;

/// One page of `GET /search/companies`.
#[derive(Serialize, Deserialize, Default, Debug, Clone)]
#[serde(default)]
pub struct SearchPage {
    /// Total matches across all pages.
    pub total_results: i64,
    pub items_per_page: i64,
    pub start_index: i64,
    pub items: Vec<SearchHit>,
}

/// A single search result.
#[derive(Serialize, Deserialize, Default, Debug, Clone)]
#[serde(default)]
pub struct SearchHit {
    /// Registry-unique company number.
    pub company_number: String,

    /// Company name. The search endpoint calls it `title`.
    #[serde(rename = "title")]
    pub name: String,

    /// e.g. `active`, `dissolved`, `liquidation`.
    pub company_status: Option<String>,

    pub company_type: Option<String>,

    pub date_of_creation: Option<String>,

    /// One-line address, as formatted by the registry.
    pub address_snippet: Option<String>,

    pub address: Option<Address>,

    /// Present on some search variants only.
    pub sic_codes: Vec<String>,
}

impl SearchHit {
    /// True when the registry lists the company as `active`.
    pub fn is_active(&self) -> bool {
        self.company_status.as_deref() == Some("active")
    }
}
