//! Pacing and rate-limit retry wrapper around the API client.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use companies_house_api::types::{
    Charge, CompanyProfile, Filing, ItemList, Officer, PersonWithSignificantControl, SearchPage,
};
use companies_house_api::{Client, FilingHistoryQuery, SearchQuery};
use tokio::time::{sleep, Instant};

use crate::config::ScanConfig;
use crate::error::ScanError;

/// Enforces a minimum gap between the starts of consecutive requests.
///
/// The first request goes out immediately.
pub struct Pacer {
    min_interval: Duration,
    /// When the last request was started.
    last_request: Mutex<Option<Instant>>,
}

impl Pacer {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_request: Mutex::new(None),
        }
    }

    /// Sleeps until `min_interval` has passed since the previous call, then
    /// records now as the start of the next request.
    pub async fn wait(&self) {
        let sleep_dur = {
            let last = self.last_request.lock().unwrap_or_else(|e| e.into_inner());
            last.and_then(|last_time| self.min_interval.checked_sub(last_time.elapsed()))
        };
        if let Some(dur) = sleep_dur {
            sleep(dur).await;
        }
        *self.last_request.lock().unwrap_or_else(|e| e.into_inner()) = Some(Instant::now());
    }
}

/// Counters for request outcomes over a run.
#[derive(Default)]
pub struct RequestTracker {
    requests_made: AtomicU64,
    requests_succeeded: AtomicU64,
    requests_not_found: AtomicU64,
    requests_rate_limited: AtomicU64,
    requests_failed: AtomicU64,
    /// Cumulative backoff time in milliseconds.
    total_backoff_ms: AtomicU64,
}

impl RequestTracker {
    pub fn record_success(&self) {
        self.requests_made.fetch_add(1, Ordering::Relaxed);
        self.requests_succeeded.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_not_found(&self) {
        self.requests_made.fetch_add(1, Ordering::Relaxed);
        self.requests_not_found.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_rate_limited(&self) {
        self.requests_made.fetch_add(1, Ordering::Relaxed);
        self.requests_rate_limited.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failure(&self) {
        self.requests_made.fetch_add(1, Ordering::Relaxed);
        self.requests_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_backoff(&self, duration: Duration) {
        self.total_backoff_ms
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
    }

    /// Snapshot the current counters.
    pub fn summary(&self) -> TrackerSummary {
        TrackerSummary {
            requests_made: self.requests_made.load(Ordering::Relaxed),
            requests_succeeded: self.requests_succeeded.load(Ordering::Relaxed),
            requests_not_found: self.requests_not_found.load(Ordering::Relaxed),
            requests_rate_limited: self.requests_rate_limited.load(Ordering::Relaxed),
            requests_failed: self.requests_failed.load(Ordering::Relaxed),
            total_backoff_secs: self.total_backoff_ms.load(Ordering::Relaxed) as f64 / 1000.0,
        }
    }
}

/// Immutable snapshot of tracker counters for display.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackerSummary {
    pub requests_made: u64,
    pub requests_succeeded: u64,
    pub requests_not_found: u64,
    pub requests_rate_limited: u64,
    pub requests_failed: u64,
    pub total_backoff_secs: f64,
}

/// API client wrapper that paces every request and retries 429s.
///
/// A 429 sleeps for the configured backoff and re-issues the same request,
/// as many times as it takes. A 404 comes back as `Ok(None)`. Any other
/// failure is logged by the inner client and returned once.
pub struct PacedClient {
    inner: Client,
    pacer: Pacer,
    backoff: Duration,
    tracker: RequestTracker,
}

impl PacedClient {
    pub fn new(config: &ScanConfig) -> Result<Self, ScanError> {
        let inner = Client::with_settings(
            &config.base_url,
            &config.api_key,
            config.request_timeout(),
        )?;
        Ok(Self::with_client(
            inner,
            config.min_request_interval(),
            config.rate_limit_backoff(),
        ))
    }

    pub fn with_client(inner: Client, min_interval: Duration, backoff: Duration) -> Self {
        Self {
            inner,
            pacer: Pacer::new(min_interval),
            backoff,
            tracker: RequestTracker::default(),
        }
    }

    pub fn tracker(&self) -> &RequestTracker {
        &self.tracker
    }

    async fn call<T, F, Fut>(&self, label: &str, request: F) -> Result<Option<T>, ScanError>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<Option<T>, companies_house_api::Error>>,
    {
        loop {
            self.pacer.wait().await;
            match request().await {
                Ok(Some(value)) => {
                    self.tracker.record_success();
                    return Ok(Some(value));
                }
                Ok(None) => {
                    self.tracker.record_not_found();
                    return Ok(None);
                }
                Err(companies_house_api::Error::RateLimited) => {
                    self.tracker.record_rate_limited();
                    tracing::warn!(
                        "{} rate limited, retrying in {:.0}s",
                        label,
                        self.backoff.as_secs_f64()
                    );
                    self.tracker.record_backoff(self.backoff);
                    sleep(self.backoff).await;
                }
                Err(e) => {
                    self.tracker.record_failure();
                    return Err(e.into());
                }
            }
        }
    }

    pub async fn search_companies(
        &self,
        query: &SearchQuery,
    ) -> Result<Option<SearchPage>, ScanError> {
        self.call("search", move || self.inner.search_companies(query))
            .await
    }

    pub async fn get_company_profile(
        &self,
        company_number: &str,
    ) -> Result<Option<CompanyProfile>, ScanError> {
        self.call("profile", move || {
            self.inner.get_company_profile(company_number)
        })
        .await
    }

    pub async fn get_officers(
        &self,
        company_number: &str,
    ) -> Result<Option<ItemList<Officer>>, ScanError> {
        self.call("officers", move || self.inner.get_officers(company_number))
            .await
    }

    pub async fn get_filing_history(
        &self,
        company_number: &str,
        query: &FilingHistoryQuery,
    ) -> Result<Option<ItemList<Filing>>, ScanError> {
        self.call("filing-history", move || {
            self.inner.get_filing_history(company_number, query)
        })
        .await
    }

    pub async fn get_charges(
        &self,
        company_number: &str,
    ) -> Result<Option<ItemList<Charge>>, ScanError> {
        self.call("charges", move || self.inner.get_charges(company_number))
            .await
    }

    pub async fn get_persons_with_significant_control(
        &self,
        company_number: &str,
    ) -> Result<Option<ItemList<PersonWithSignificantControl>>, ScanError> {
        self.call("psc", move || {
            self.inner
                .get_persons_with_significant_control(company_number)
        })
        .await
    }
}
