//! Company profile types for `GET /company/{number}`.

use serde::{Deserialize, Serialize};

use super::{Address, ApiDate, DateParts};

/// Full company profile.
#[derive(Serialize, Deserialize, Default, Debug, Clone)]
#[serde(default)]
pub struct CompanyProfile {
    pub company_number: String,

    pub company_name: Option<String>,

    pub company_status: Option<String>,

    /// Legal form, e.g. `ltd`, `llp`.
    #[serde(rename = "type")]
    pub company_type: Option<String>,

    pub date_of_creation: Option<ApiDate>,

    /// e.g. `england-wales`, `scotland`.
    pub jurisdiction: Option<String>,

    pub registered_office_address: Address,

    /// Five-digit industry codes.
    pub sic_codes: Vec<String>,

    pub accounts: Accounts,

    pub confirmation_statement: ConfirmationStatement,

    pub has_charges: bool,

    pub has_insolvency_history: bool,

    pub can_file: bool,
}

/// Annual accounts status.
#[derive(Serialize, Deserialize, Default, Debug, Clone)]
#[serde(default)]
pub struct Accounts {
    /// Day and month of the financial year end; no year.
    pub accounting_reference_date: Option<DateParts>,
    pub last_accounts: Option<LastAccounts>,
    pub next_accounts: Option<NextAccounts>,
    pub next_due: Option<ApiDate>,
    pub next_made_up_to: Option<ApiDate>,
    pub overdue: bool,
}

/// The most recently filed accounts.
#[derive(Serialize, Deserialize, Default, Debug, Clone)]
#[serde(default)]
pub struct LastAccounts {
    pub made_up_to: Option<ApiDate>,
    /// e.g. `micro-entity`, `full`, `total-exemption-full`.
    #[serde(rename = "type")]
    pub accounts_type: Option<String>,
}

/// The next accounts the company must file.
#[derive(Serialize, Deserialize, Default, Debug, Clone)]
#[serde(default)]
pub struct NextAccounts {
    pub due_on: Option<ApiDate>,
    pub period_end_on: Option<ApiDate>,
    pub overdue: bool,
}

/// Confirmation statement status.
#[derive(Serialize, Deserialize, Default, Debug, Clone)]
#[serde(default)]
pub struct ConfirmationStatement {
    pub last_made_up_to: Option<ApiDate>,
    pub next_due: Option<ApiDate>,
    pub next_made_up_to: Option<ApiDate>,
    pub overdue: bool,
}
