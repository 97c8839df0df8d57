//! HTTP client for the Companies House public data API.

use std::time::Duration;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use url::Url;

use crate::{
    query::{FilingHistoryQuery, Query, SearchQuery},
    types::{
        Charge, CompanyProfile, Filing, ItemList, Officer, PersonWithSignificantControl,
        SearchPage,
    },
    Error,
};

/// Production API root.
pub const DEFAULT_BASE_URL: &str = "https://api.company-information.service.gov.uk";

/// Per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the registry API.
///
/// Authenticates with HTTP basic auth: the API key is the username and the
/// password is empty. Makes exactly one request per call; pacing and 429
/// retries belong to the caller.
pub struct Client {
    http: reqwest::Client,
    /// Base URL for the API. Defaults to [`DEFAULT_BASE_URL`].
    base_api_url: String,
    api_key: String,
}

impl Client {
    /// Creates a client pointing at the production API.
    pub fn new(api_key: &str) -> Result<Self, Error> {
        Self::with_settings(DEFAULT_BASE_URL, api_key, DEFAULT_TIMEOUT)
    }

    /// Creates a client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str, api_key: &str) -> Result<Self, Error> {
        Self::with_settings(base_url, api_key, DEFAULT_TIMEOUT)
    }

    /// Creates a client with a custom base URL and request timeout.
    pub fn with_settings(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::RequestFailed
            })?;
        Ok(Self {
            http,
            base_api_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    fn get_url(&self, path: &str, query: Option<&impl Query>) -> Result<Url, Error> {
        let url = Url::parse(format!("{}{}", &self.base_api_url, path).as_str()).map_err(|e| {
            tracing::error!("Invalid URL constructed: {}", e);
            Error::RequestFailed
        })?;
        Ok(match query {
            Some(query) => query.add_to_url(&url),
            None => url,
        })
    }

    /// Issues one GET. `Ok(None)` means the registry answered 404.
    async fn get<T, Q>(&self, path: &str, query: Option<&Q>) -> Result<Option<T>, Error>
    where
        T: DeserializeOwned,
        Q: Query,
    {
        let url = self.get_url(path, query)?;
        let resp = self
            .http
            .get(url)
            .basic_auth(&self.api_key, Some(""))
            .header("accept", "application/json")
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to get {}: {}", path, e);
                Error::RequestFailed
            })?;

        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            tracing::debug!("{} not found", path);
            return Ok(None);
        }
        if status == StatusCode::TOO_MANY_REQUESTS {
            tracing::warn!("{} rate limited", path);
            return Err(Error::RateLimited);
        }

        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body for {}: {}", path, e);
            Error::RequestFailed
        })?;

        if !status.is_success() {
            let snippet = truncate_body(&body);
            tracing::error!("{} failed with status {}: {}", path, status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
            });
        }

        let parsed = serde_json::from_str::<T>(&body).map_err(|e| {
            let snippet = truncate_body(&body);
            tracing::error!("Failed to parse {}: {} | body: {}", path, e, snippet);
            Error::Decode(e.to_string())
        })?;

        Ok(Some(parsed))
    }

    /// Runs one page of a company name search.
    pub async fn search_companies(&self, query: &SearchQuery) -> Result<Option<SearchPage>, Error> {
        self.get::<SearchPage, SearchQuery>("/search/companies", Some(query))
            .await
    }

    /// Fetches the company profile.
    pub async fn get_company_profile(
        &self,
        company_number: &str,
    ) -> Result<Option<CompanyProfile>, Error> {
        self.get::<CompanyProfile, SearchQuery>(
            format!("/company/{}", company_number).as_str(),
            None,
        )
        .await
    }

    /// Fetches the officer list, resigned officers included.
    pub async fn get_officers(
        &self,
        company_number: &str,
    ) -> Result<Option<ItemList<Officer>>, Error> {
        self.get::<ItemList<Officer>, SearchQuery>(
            format!("/company/{}/officers", company_number).as_str(),
            None,
        )
        .await
    }

    /// Fetches the filing history, newest first.
    pub async fn get_filing_history(
        &self,
        company_number: &str,
        query: &FilingHistoryQuery,
    ) -> Result<Option<ItemList<Filing>>, Error> {
        self.get::<ItemList<Filing>, FilingHistoryQuery>(
            format!("/company/{}/filing-history", company_number).as_str(),
            Some(query),
        )
        .await
    }

    /// Fetches registered charges.
    pub async fn get_charges(&self, company_number: &str) -> Result<Option<ItemList<Charge>>, Error> {
        self.get::<ItemList<Charge>, SearchQuery>(
            format!("/company/{}/charges", company_number).as_str(),
            None,
        )
        .await
    }

    /// Fetches persons with significant control.
    pub async fn get_persons_with_significant_control(
        &self,
        company_number: &str,
    ) -> Result<Option<ItemList<PersonWithSignificantControl>>, Error> {
        self.get::<ItemList<PersonWithSignificantControl>, SearchQuery>(
            format!("/company/{}/persons-with-significant-control", company_number).as_str(),
            None,
        )
        .await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...[truncated]", &body[..end])
    }
}
