//! Library layer for tyrescan: paced registry client, search driver,
//! classifier, deduplication, enrichment and dataset assembly.
//!
//! Wraps the `companies_house_api` crate with request pacing and 429 retry,
//! then turns search phrases into one flat record per in-scope company.

pub mod classify;
pub mod client;
pub mod config;
pub mod dataset;
pub mod dedupe;
pub mod enrich;
pub mod error;
pub mod record;
pub mod scan;
pub mod search;
pub mod sic;

pub use companies_house_api;
pub use companies_house_api::types;

pub use classify::{BusinessType, Classifier, ClassifierRules};
pub use client::{PacedClient, RequestTracker, TrackerSummary};
pub use config::ScanConfig;
pub use dataset::{Dataset, Metadata};
pub use enrich::{enrich_all, enrich_candidate, fetch_company_data, flatten, CompanyData};
pub use error::ScanError;
pub use record::{Candidate, EnrichedRecord, LIST_SEPARATOR};
pub use scan::{find_candidates, select_candidates};
pub use search::{collect_hits, QueryHit};
