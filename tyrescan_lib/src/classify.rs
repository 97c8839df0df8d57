//! Name-based scoping and business-type labelling.
//!
//! Classification is a pure function of the company name: lower-case it,
//! reject on any exclusion token, require the inclusion rule, then label by
//! the first matching rule set.

use std::fmt;

use companies_house_api::types::SearchHit;
use serde::{Deserialize, Serialize};

const EXCLUDE: &[&str] = &[
    "agricultural",
    "tractor",
    "farm",
    "earthmover",
    "forklift",
    "bicycle",
    "motorcycle",
    "motorbike",
    "car tyre",
    "car & van",
    "car and van",
    "passenger",
    "pcr",
    "scooter",
    "quad",
    "atv",
    "golf",
    "lawn",
    "mower",
    "garden",
];

const TRUCK_TOKENS: &[&str] = &[
    "truck",
    "lorry",
    "hgv",
    "commercial",
    "fleet",
    "trailer",
    "artic",
    "heavy goods",
];

const TYRE_TOKENS: &[&str] = &["tyre", "tire", "wheel"];

const PERMISSIVE_QUALIFIERS: &[&str] = &["wholesale", "retread", "fleet", "commercial"];

const WHOLESALE_TOKENS: &[&str] = &["wholesale", "distribution", "supply", "distributor"];
const RETREAD_TOKENS: &[&str] = &["retread", "remould", "recap"];
const MOBILE_TOKENS: &[&str] = &["mobile", "breakdown", "24 hour", "emergency", "roadside"];
const FITTER_TOKENS: &[&str] = &["fitting", "fitter", "service"];

/// Name tokens that put a record in the truck/commercial subset.
const TRUCK_COMMERCIAL_TOKENS: &[&str] = &["truck", "lorry", "hgv", "commercial", "fleet"];

/// Free-form tags recorded alongside the single business type.
const CATEGORY_TAGS: &[(&str, &[&str])] = &[
    ("retread", &["retread", "remould"]),
    (
        "wholesale",
        &["wholesale", "distribution", "supplies", "supply", "warehouse"],
    ),
    (
        "fitting_service",
        &["fitting", "service", "centre", "center", "depot"],
    ),
    ("fleet", &["fleet"]),
];

/// Extra mobile phrasing that only feeds the `mobile` tag.
const MOBILE_TAG_EXTRAS: &[&str] = &["24hr", "24/7", "callout"];

/// Business-type label, first matching rule wins.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BusinessType {
    Wholesaler,
    Retreader,
    MobileService,
    Fitter,
    #[default]
    Specialist,
}

impl BusinessType {
    pub const ALL: [BusinessType; 5] = [
        BusinessType::Wholesaler,
        BusinessType::Retreader,
        BusinessType::MobileService,
        BusinessType::Fitter,
        BusinessType::Specialist,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BusinessType::Wholesaler => "WHOLESALER",
            BusinessType::Retreader => "RETREADER",
            BusinessType::MobileService => "MOBILE_SERVICE",
            BusinessType::Fitter => "FITTER",
            BusinessType::Specialist => "SPECIALIST",
        }
    }
}

impl fmt::Display for BusinessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Token lists driving the classifier. Every list is matched as lower-case
/// substrings of the lower-cased name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierRules {
    pub exclude: Vec<String>,
    pub truck_tokens: Vec<String>,
    pub tyre_tokens: Vec<String>,
    pub permissive_qualifiers: Vec<String>,
    pub wholesale_tokens: Vec<String>,
    pub retread_tokens: Vec<String>,
    pub mobile_tokens: Vec<String>,
    pub fitter_tokens: Vec<String>,
    pub truck_commercial_tokens: Vec<String>,
}

impl Default for ClassifierRules {
    fn default() -> Self {
        Self {
            exclude: owned(EXCLUDE),
            truck_tokens: owned(TRUCK_TOKENS),
            tyre_tokens: owned(TYRE_TOKENS),
            permissive_qualifiers: owned(PERMISSIVE_QUALIFIERS),
            wholesale_tokens: owned(WHOLESALE_TOKENS),
            retread_tokens: owned(RETREAD_TOKENS),
            mobile_tokens: owned(MOBILE_TOKENS),
            fitter_tokens: owned(FITTER_TOKENS),
            truck_commercial_tokens: owned(TRUCK_COMMERCIAL_TOKENS),
        }
    }
}

fn owned(tokens: &[&str]) -> Vec<String> {
    tokens.iter().map(|t| t.to_string()).collect()
}

fn contains_any<S: AsRef<str>>(haystack: &str, tokens: &[S]) -> bool {
    tokens.iter().any(|t| haystack.contains(t.as_ref()))
}

/// Decides scope and label for company names.
#[derive(Debug, Clone)]
pub struct Classifier {
    rules: ClassifierRules,
    permissive: bool,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(ClassifierRules::default(), false)
    }
}

impl Classifier {
    pub fn new(rules: ClassifierRules, permissive: bool) -> Self {
        let lower = |tokens: Vec<String>| -> Vec<String> {
            tokens.into_iter().map(|t| t.to_lowercase()).collect()
        };
        Self {
            rules: ClassifierRules {
                exclude: lower(rules.exclude),
                truck_tokens: lower(rules.truck_tokens),
                tyre_tokens: lower(rules.tyre_tokens),
                permissive_qualifiers: lower(rules.permissive_qualifiers),
                wholesale_tokens: lower(rules.wholesale_tokens),
                retread_tokens: lower(rules.retread_tokens),
                mobile_tokens: lower(rules.mobile_tokens),
                fitter_tokens: lower(rules.fitter_tokens),
                truck_commercial_tokens: lower(rules.truck_commercial_tokens),
            },
            permissive,
        }
    }

    pub fn is_permissive(&self) -> bool {
        self.permissive
    }

    /// `Some(label)` when the name is in scope, `None` otherwise.
    pub fn classify(&self, name: &str) -> Option<BusinessType> {
        let name = name.to_lowercase();
        if self.is_excluded(&name) || !self.is_included(&name) {
            return None;
        }
        Some(self.label(&name))
    }

    /// Applies the status filter and then [`Classifier::classify`].
    pub fn admit(&self, hit: &SearchHit) -> Option<BusinessType> {
        if !hit.is_active() {
            return None;
        }
        self.classify(&hit.name)
    }

    fn is_excluded(&self, lower: &str) -> bool {
        contains_any(lower, &self.rules.exclude)
    }

    fn is_included(&self, lower: &str) -> bool {
        let has_tyre = contains_any(lower, &self.rules.tyre_tokens);
        if !has_tyre {
            return false;
        }
        if contains_any(lower, &self.rules.truck_tokens) {
            return true;
        }
        self.permissive && contains_any(lower, &self.rules.permissive_qualifiers)
    }

    fn label(&self, lower: &str) -> BusinessType {
        let rules = &self.rules;
        if contains_any(lower, &rules.wholesale_tokens) {
            BusinessType::Wholesaler
        } else if contains_any(lower, &rules.retread_tokens) {
            BusinessType::Retreader
        } else if contains_any(lower, &rules.mobile_tokens) {
            BusinessType::MobileService
        } else if contains_any(lower, &rules.fitter_tokens) {
            BusinessType::Fitter
        } else {
            BusinessType::Specialist
        }
    }

    /// Membership of the truck/commercial subset: wholesalers, or a name
    /// carrying a truck/commercial token.
    pub fn is_truck_commercial(&self, name: &str, business_type: BusinessType) -> bool {
        business_type == BusinessType::Wholesaler
            || contains_any(&name.to_lowercase(), &self.rules.truck_commercial_tokens)
    }

    /// Descriptive tags for a name. Never empty: falls back to `general_tyre`.
    pub fn categories(&self, name: &str, business_type: BusinessType) -> Vec<String> {
        let lower = name.to_lowercase();
        let mut tags = Vec::new();
        if self.is_truck_commercial(name, business_type) {
            tags.push("truck_commercial".to_string());
        }
        if contains_any(&lower, &self.rules.mobile_tokens) || contains_any(&lower, MOBILE_TAG_EXTRAS)
        {
            tags.push("mobile".to_string());
        }
        for (tag, tokens) in CATEGORY_TAGS {
            if contains_any(&lower, *tokens) {
                tags.push(tag.to_string());
            }
        }
        if tags.is_empty() {
            tags.push("general_tyre".to_string());
        }
        tags
    }
}
