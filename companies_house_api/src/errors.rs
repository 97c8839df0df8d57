//! Error types for the API client.

/// Errors that can occur when making API requests.
///
/// A 404 is not represented here: lookups that find nothing return `Ok(None)`.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// An HTTP request failed (network error, timeout, or invalid URL).
    #[error("Request failed")]
    RequestFailed,
    /// The API answered 429 Too Many Requests.
    #[error("Rate limited by the registry API (HTTP 429)")]
    RateLimited,
    /// The API returned a non-success status with a body snippet.
    #[error("Request failed with status {status}")]
    HttpStatus { status: u16, body: String },
    /// The response body was not the JSON shape we expected.
    #[error("Failed to decode response: {0}")]
    Decode(String),
}
