//! Settings read from the environment.

use std::env;

use url::Url;

use crate::DemoError;
use search_client_repository::{RefreshPolicy, SearchIndexConfig};

/// Default OpenSearch URL.
const DEFAULT_OPENSEARCH_URL: &str = "http://localhost:9200/";

/// Runtime settings for a demo run.
#[derive(Debug, Clone)]
pub struct Settings {
    pub opensearch_url: Url,
    pub refresh: RefreshPolicy,
    pub pretty: bool,
    /// Check cluster health before running. Off by default: the check needs
    /// `cluster:monitor/health`, which a plain index user may not have.
    pub healthcheck: bool,
}

impl Settings {
    /// Read settings from the process environment.
    ///
    /// # Environment Variables
    ///
    /// - `OPENSEARCH_URL`: OpenSearch server URL (default: http://localhost:9200/)
    /// - `SEARCH_REFRESH`: `wait_for`, `true` or `false` (default: wait_for)
    /// - `SEARCH_PRETTY`: pretty-print search responses (default: true)
    /// - `SEARCH_HEALTHCHECK`: check cluster health at start-up (default: false)
    pub fn from_env() -> Result<Self, DemoError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read settings through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DemoError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_url = lookup("OPENSEARCH_URL").unwrap_or_else(|| DEFAULT_OPENSEARCH_URL.to_string());
        let opensearch_url = Url::parse(&raw_url)
            .map_err(|e| DemoError::config(format!("Invalid OPENSEARCH_URL {}: {}", raw_url, e)))?;

        let refresh = match lookup("SEARCH_REFRESH") {
            Some(value) => RefreshPolicy::parse(&value).ok_or_else(|| {
                DemoError::config(format!("Invalid SEARCH_REFRESH {}", value))
            })?,
            None => RefreshPolicy::default(),
        };

        let pretty = parse_flag(&lookup, "SEARCH_PRETTY", true)?;
        let healthcheck = parse_flag(&lookup, "SEARCH_HEALTHCHECK", false)?;

        Ok(Self {
            opensearch_url,
            refresh,
            pretty,
            healthcheck,
        })
    }

    /// Client configuration derived from these settings.
    pub fn index_config(&self) -> SearchIndexConfig {
        SearchIndexConfig {
            refresh: self.refresh,
            pretty: self.pretty,
            ..SearchIndexConfig::default()
        }
    }
}

fn parse_flag<F>(lookup: &F, key: &str, default: bool) -> Result<bool, DemoError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse::<bool>()
            .map_err(|_| DemoError::config(format!("Invalid {} {}", key, value))),
        None => Ok(default),
    }
}
