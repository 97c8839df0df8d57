use serde::{Deserialize, Serialize};

/// Envelope used by the per-company list endpoints (officers, filings,
/// charges, PSC). Records of interest sit under `items`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ItemList<T> {
    #[serde(default)]
    pub items: Vec<T>,
    #[serde(default)]
    pub total_results: Option<i64>,
}

impl<T> Default for ItemList<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total_results: None,
        }
    }
}
