//! Run configuration: one record injected at program start.
//!
//! Values come from the built-in defaults, then an optional TOML file named by
//! `TYRESCAN_CONFIG`, then individual environment overrides.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::classify::ClassifierRules;
use crate::error::ScanError;

/// Search phrases sent to the registry, in order.
pub const DEFAULT_QUERIES: &[&str] = &[
    "truck tyre",
    "truck tire",
    "lorry tyre",
    "hgv tyre",
    "commercial tyre",
    "commercial vehicle tyre",
    "fleet tyre",
    "trailer tyre",
    "truck wheel",
    "tyre wholesale",
    "tyre retread",
    "mobile truck tyre",
];

/// File name root shared by the JSON, CSV and XLSX artefacts.
pub const DEFAULT_OUTPUT_STEM: &str = "UK_TYRE_COMPANIES_API_ONLY";

/// Largest page the search endpoint will serve.
const MAX_PAGE_SIZE: i64 = 100;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Registry API key, sent as the basic-auth username.
    #[serde(skip_serializing)]
    pub api_key: String,
    pub base_url: String,
    /// Minimum gap between the starts of two consecutive requests.
    pub min_request_interval_ms: u64,
    /// Sleep after a 429 before retrying the same request.
    pub rate_limit_backoff_secs: u64,
    pub request_timeout_secs: u64,
    /// Results per search page (1-100).
    pub page_size: i64,
    pub max_pages_per_query: usize,
    /// Filing-history entries requested per company.
    pub max_filings: i64,
    /// Also admit `tyre` + {wholesale, retread, fleet, commercial} names
    /// that lack a truck token.
    pub permissive_match: bool,
    /// Fetch the per-company endpoints. When off, records carry search data only.
    pub enrich: bool,
    pub queries: Vec<String>,
    pub rules: ClassifierRules,
    pub output_stem: String,
    pub output_dir: PathBuf,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: companies_house_api::DEFAULT_BASE_URL.to_string(),
            min_request_interval_ms: 600,
            rate_limit_backoff_secs: 60,
            request_timeout_secs: companies_house_api::DEFAULT_TIMEOUT.as_secs(),
            page_size: MAX_PAGE_SIZE,
            max_pages_per_query: 5,
            max_filings: 10,
            permissive_match: false,
            enrich: true,
            queries: DEFAULT_QUERIES.iter().map(|q| q.to_string()).collect(),
            rules: ClassifierRules::default(),
            output_stem: DEFAULT_OUTPUT_STEM.to_string(),
            output_dir: PathBuf::from("."),
        }
    }
}

impl ScanConfig {
    /// Defaults, then `TYRESCAN_CONFIG` (if set), then environment overrides.
    pub fn load() -> Result<Self, ScanError> {
        let mut config = match std::env::var("TYRESCAN_CONFIG") {
            Ok(path) => Self::from_toml_file(Path::new(&path))?,
            Err(_) => Self::default(),
        };
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_file(path: &Path) -> Result<Self, ScanError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ScanError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a TOML document. Keys that are absent keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ScanError> {
        toml::from_str(content).map_err(|e| ScanError::Config(e.to_string()))
    }

    fn apply_env(&mut self) {
        if let Some(key) = env_string("COMPANIES_HOUSE_API_KEY") {
            self.api_key = key;
        }
        if let Some(url) = env_string("COMPANIES_HOUSE_BASE_URL") {
            self.base_url = url;
        }
        if let Some(dir) = env_string("TYRESCAN_OUTPUT_DIR") {
            self.output_dir = PathBuf::from(dir);
        }
        self.min_request_interval_ms =
            env_u64("TYRESCAN_MIN_INTERVAL_MS", self.min_request_interval_ms);
        self.rate_limit_backoff_secs =
            env_u64("TYRESCAN_BACKOFF_SECS", self.rate_limit_backoff_secs);
        self.max_pages_per_query = env_usize("TYRESCAN_MAX_PAGES", self.max_pages_per_query);
        self.max_filings = env_u64("TYRESCAN_MAX_FILINGS", self.max_filings as u64) as i64;
        self.permissive_match = env_bool("TYRESCAN_PERMISSIVE", self.permissive_match);
        self.enrich = env_bool("TYRESCAN_ENRICH", self.enrich);
    }

    /// Rejects configurations that cannot produce a run.
    pub fn validate(&self) -> Result<(), ScanError> {
        if self.api_key.trim().is_empty() {
            return Err(ScanError::Config(
                "no API key; set COMPANIES_HOUSE_API_KEY or api_key in the config file".into(),
            ));
        }
        if !(1..=MAX_PAGE_SIZE).contains(&self.page_size) {
            return Err(ScanError::Config(format!(
                "page_size must be between 1 and {}, got {}",
                MAX_PAGE_SIZE, self.page_size
            )));
        }
        if self.max_pages_per_query == 0 {
            return Err(ScanError::Config("max_pages_per_query must be at least 1".into()));
        }
        if self.max_filings < 0 {
            return Err(ScanError::Config("max_filings must not be negative".into()));
        }
        if self.queries.is_empty() {
            return Err(ScanError::Config("no search queries configured".into()));
        }
        Ok(())
    }

    pub fn min_request_interval(&self) -> Duration {
        Duration::from_millis(self.min_request_interval_ms)
    }

    pub fn rate_limit_backoff(&self) -> Duration {
        Duration::from_secs(self.rate_limit_backoff_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
}

fn env_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|val| val.parse::<u64>().ok())
        .unwrap_or(default)
}

fn env_usize(key: &str, default: usize) -> usize {
    std::env::var(key)
        .ok()
        .and_then(|val| val.parse::<usize>().ok())
        .unwrap_or(default)
}

fn env_bool(key: &str, default: bool) -> bool {
    match std::env::var(key).ok().as_deref().map(str::trim) {
        Some("1") | Some("true") | Some("yes") | Some("on") => true,
        Some("0") | Some("false") | Some("no") | Some("off") => false,
        _ => default,
    }
}
