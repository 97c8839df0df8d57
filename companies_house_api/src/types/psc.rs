use serde::{Deserialize, Serialize};

/// An entry from `GET /company/{number}/persons-with-significant-control`.
#[derive(Serialize, Deserialize, Default, Debug, Clone)]
#[serde(default)]
pub struct PersonWithSignificantControl {
    pub name: Option<String>,
    pub name_elements: Option<NameElements>,
    /// e.g. `individual-person-with-significant-control`.
    pub kind: Option<String>,
    pub natures_of_control: Vec<String>,
    pub notified_on: Option<String>,
    pub ceased_on: Option<String>,
}

impl PersonWithSignificantControl {
    /// The `name` field, falling back to the structured surname, else empty.
    pub fn display_name(&self) -> String {
        match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => self
                .name_elements
                .as_ref()
                .and_then(|el| el.surname.as_deref())
                .unwrap_or_default()
                .trim()
                .to_string(),
        }
    }
}

/// Structured name parts for individual PSCs.
#[derive(Serialize, Deserialize, Default, Debug, Clone)]
#[serde(default)]
pub struct NameElements {
    pub title: Option<String>,
    pub forename: Option<String>,
    pub middle_name: Option<String>,
    pub surname: Option<String>,
}
