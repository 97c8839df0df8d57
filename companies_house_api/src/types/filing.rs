use serde::{Deserialize, Serialize};

/// An entry from `GET /company/{number}/filing-history`. The API orders
/// filings newest first.
#[derive(Serialize, Deserialize, Default, Debug, Clone)]
#[serde(default)]
pub struct Filing {
    pub date: Option<String>,
    /// Form code, e.g. `AA`, `CS01`.
    #[serde(rename = "type")]
    pub filing_type: Option<String>,
    /// Machine description key, e.g. `accounts-with-accounts-type-micro-entity`.
    pub description: Option<String>,
    pub category: Option<String>,
}
