//! The emitted dataset: every record plus the active, truck/commercial and
//! mobile subsets, with a summary header.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::classify::BusinessType;
use crate::record::EnrichedRecord;

pub const SOURCE: &str = "Companies House API";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Metadata {
    /// Local time the run finished, `YYYY-MM-DD HH:MM:SS`.
    pub generated_date: String,
    pub source: String,
    pub total_companies: usize,
    pub active_companies: usize,
    pub truck_commercial_count: usize,
    pub mobile_count: usize,
    pub search_terms_used: Vec<String>,
}

/// JSON artefact body. The CSV and workbook are views over `active_only` and
/// its subsets.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Dataset {
    pub metadata: Metadata,
    pub all_companies: Vec<EnrichedRecord>,
    pub active_only: Vec<EnrichedRecord>,
    pub truck_commercial: Vec<EnrichedRecord>,
    pub mobile_services: Vec<EnrichedRecord>,
}

impl Dataset {
    /// Splits records into subsets. Subsets keep input order and are drawn
    /// from the active records only.
    pub fn build(
        records: Vec<EnrichedRecord>,
        queries: &[String],
        generated_at: NaiveDateTime,
    ) -> Self {
        let active_only: Vec<EnrichedRecord> =
            records.iter().filter(|r| r.is_active()).cloned().collect();
        let truck_commercial: Vec<EnrichedRecord> = active_only
            .iter()
            .filter(|r| r.is_truck_commercial)
            .cloned()
            .collect();
        let mobile_services: Vec<EnrichedRecord> = active_only
            .iter()
            .filter(|r| r.is_mobile)
            .cloned()
            .collect();

        let metadata = Metadata {
            generated_date: generated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            source: SOURCE.to_string(),
            total_companies: records.len(),
            active_companies: active_only.len(),
            truck_commercial_count: truck_commercial.len(),
            mobile_count: mobile_services.len(),
            search_terms_used: queries.to_vec(),
        };

        Self {
            metadata,
            all_companies: records,
            active_only,
            truck_commercial,
            mobile_services,
        }
    }

    /// Active-record count per business type, in label order. Types with no
    /// records are included with a zero.
    pub fn business_type_breakdown(&self) -> Vec<(BusinessType, usize)> {
        BusinessType::ALL
            .iter()
            .map(|bt| {
                let count = self
                    .active_only
                    .iter()
                    .filter(|r| r.business_type == *bt)
                    .count();
                (*bt, count)
            })
            .collect()
    }
}
