//! Date values. The registry mostly sends ISO strings but some nested records
//! carry `{year, month, day}` objects whose parts may be numbers or strings.

use serde::{Deserialize, Serialize};

/// A date as found in an API response.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum ApiDate {
    /// `YYYY-MM-DD`, passed through untouched.
    Iso(String),
    /// `{year, month, day}` parts.
    Parts(DateParts),
}

impl ApiDate {
    /// Renders the date as `YYYY-MM-DD`. Parts are zero-padded; an incomplete
    /// part-date renders empty.
    pub fn render(&self) -> String {
        match self {
            ApiDate::Iso(s) => s.trim().to_string(),
            ApiDate::Parts(parts) => parts.render(),
        }
    }
}

/// Structured date. Any part may be missing.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct DateParts {
    pub year: Option<DatePart>,
    pub month: Option<DatePart>,
    pub day: Option<DatePart>,
}

impl DateParts {
    pub fn render(&self) -> String {
        let year = self.year.as_ref().and_then(DatePart::value);
        let month = self.month.as_ref().and_then(DatePart::value);
        let day = self.day.as_ref().and_then(DatePart::value);
        match (year, month, day) {
            (Some(y), Some(m), Some(d)) => format!("{:04}-{:02}-{:02}", y, m, d),
            _ => String::new(),
        }
    }

    /// `DD/MM`, used for the accounting reference date which has no year.
    /// Empty when either part is missing.
    pub fn day_month(&self) -> String {
        let month = self.month.as_ref().and_then(DatePart::value);
        let day = self.day.as_ref().and_then(DatePart::value);
        match (day, month) {
            (Some(d), Some(m)) => format!("{:02}/{:02}", d, m),
            _ => String::new(),
        }
    }
}

/// One component of a [`DateParts`]; the API is inconsistent about quoting.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum DatePart {
    Number(i64),
    Text(String),
}

impl DatePart {
    pub fn value(&self) -> Option<i64> {
        match self {
            DatePart::Number(n) => Some(*n),
            DatePart::Text(s) => s.trim().parse().ok(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iso_passes_through() {
        let date: ApiDate = serde_json::from_str(r#""2021-03-31""#).unwrap();
        assert_eq!(date.render(), "2021-03-31");
    }

    #[test]
    fn numeric_parts_are_zero_padded() {
        let date: ApiDate = serde_json::from_str(r#"{"year": 2020, "month": 1, "day": 5}"#).unwrap();
        assert_eq!(date.render(), "2020-01-05");
    }

    #[test]
    fn quoted_parts_are_accepted() {
        let date: ApiDate =
            serde_json::from_str(r#"{"year": "2019", "month": "12", "day": "9"}"#).unwrap();
        assert_eq!(date.render(), "2019-12-09");
    }

    #[test]
    fn day_month_without_year() {
        let parts: DateParts = serde_json::from_str(r#"{"day": "31", "month": "03"}"#).unwrap();
        assert_eq!(parts.day_month(), "31/03");
        assert_eq!(ApiDate::Parts(parts).render(), "");
    }

    #[test]
    fn incomplete_parts_render_empty() {
        let year_month: ApiDate = serde_json::from_str(r#"{"year": 2020, "month": 1}"#).unwrap();
        assert_eq!(year_month.render(), "");
        let year_only: ApiDate = serde_json::from_str(r#"{"year": "2020"}"#).unwrap();
        assert_eq!(year_only.render(), "");
    }

    #[test]
    fn empty_parts_render_empty() {
        assert_eq!(DateParts::default().render(), "");
    }
}
