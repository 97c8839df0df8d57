use serde::{Deserialize, Serialize};

/// Roles that count as a director when tallying the board.
const DIRECTOR_ROLES: &[&str] = &["director", "corporate-director"];

/// An entry from `GET /company/{number}/officers`.
#[derive(Serialize, Deserialize, Default, Debug, Clone)]
#[serde(default)]
pub struct Officer {
    /// Registry format, usually `SURNAME, Forenames`.
    pub name: String,
    /// e.g. `director`, `secretary`, `llp-member`.
    pub officer_role: Option<String>,
    pub appointed_on: Option<String>,
    pub resigned_on: Option<String>,
    pub nationality: Option<String>,
    pub occupation: Option<String>,
}

impl Officer {
    /// A director (natural or corporate) who has not resigned.
    pub fn is_active_director(&self) -> bool {
        self.resigned_on.is_none()
            && self
                .officer_role
                .as_deref()
                .is_some_and(|role| DIRECTOR_ROLES.contains(&role))
    }
}
