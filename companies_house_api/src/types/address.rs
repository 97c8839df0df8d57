//! Structured postal address as returned by the profile and search endpoints.

use serde::{Deserialize, Serialize};

/// Registered office or search-hit address. Every part is optional.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Address {
    pub care_of: Option<String>,
    pub po_box: Option<String>,
    pub premises: Option<String>,
    pub address_line_1: Option<String>,
    pub address_line_2: Option<String>,
    pub locality: Option<String>,
    pub region: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
}

impl Address {
    /// Non-empty parts in display order: premises, lines 1 and 2, locality,
    /// region, postcode, country. Line breaks inside a part become spaces.
    pub fn parts(&self) -> impl Iterator<Item = String> + '_ {
        [
            &self.premises,
            &self.address_line_1,
            &self.address_line_2,
            &self.locality,
            &self.region,
            &self.postal_code,
            &self.country,
        ]
        .into_iter()
        .filter_map(|part| part.as_deref())
        .map(|part| part.trim().replace(['\r', '\n'], " "))
        .filter(|part| !part.is_empty())
    }

    /// The display parts joined with `", "`.
    pub fn joined(&self) -> String {
        self.parts().collect::<Vec<_>>().join(", ")
    }
}
