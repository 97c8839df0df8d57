use serde::{Deserialize, Serialize};

/// An entry from `GET /company/{number}/charges`.
#[derive(Serialize, Deserialize, Default, Debug, Clone)]
#[serde(default)]
pub struct Charge {
    /// `outstanding`, `satisfied`, `part-satisfied`, ...
    pub status: Option<String>,
    pub charge_number: Option<i64>,
    pub created_on: Option<String>,
    pub delivered_on: Option<String>,
}

impl Charge {
    pub fn is_outstanding(&self) -> bool {
        self.status.as_deref() == Some("outstanding")
    }
}
