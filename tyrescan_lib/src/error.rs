//! Error types for the library layer.

use thiserror::Error;

/// Errors produced by the library layer, wrapping upstream API errors
/// and adding configuration failures and the run-level abort condition.
#[derive(Error, Debug)]
pub enum ScanError {
    /// An error from the underlying API client.
    #[error("API error: {0}")]
    Api(#[from] companies_house_api::Error),

    /// The very first search request failed, which points at bad credentials
    /// or no connectivity. The run stops here.
    #[error("First search request failed ({0}); check the API key and connectivity")]
    FirstSearchFailed(#[source] companies_house_api::Error),

    /// The configuration file or an override was invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}
