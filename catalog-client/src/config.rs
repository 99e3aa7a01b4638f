//! Client configuration

use std::time::Duration;

use crate::client::NetworkHttpClient;
use crate::error::{ClientError, ClientResult};

/// Default API base URL
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// How long a fetched collection counts as fresh
pub const DEFAULT_FRESHNESS_WINDOW: Duration = Duration::from_secs(5 * 60);

/// Client configuration for connecting to the catalog API
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | CATALOG_API_URL | http://localhost:8000 | API base URL |
/// | CATALOG_REQUEST_TIMEOUT_SECS | (unset) | Per-request timeout; no timeout when unset |
/// | CATALOG_CACHE_TTL_SECS | 300 | Store freshness window |
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:8000")
    pub base_url: String,

    /// Request timeout. `None` leaves timeouts to the caller.
    pub timeout: Option<Duration>,

    /// `fetch_all` skips the network while the last fetch is younger than this
    pub freshness_window: Duration,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: None,
            freshness_window: DEFAULT_FRESHNESS_WINDOW,
        }
    }

    /// Load configuration from environment variables
    ///
    /// Unset or unparsable values fall back to their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let secs = |key: &str| lookup(key).and_then(|v| v.trim().parse::<u64>().ok());

        Self {
            base_url: lookup("CATALOG_API_URL").unwrap_or_else(|| DEFAULT_BASE_URL.into()),
            timeout: secs("CATALOG_REQUEST_TIMEOUT_SECS").map(Duration::from_secs),
            freshness_window: secs("CATALOG_CACHE_TTL_SECS")
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_FRESHNESS_WINDOW),
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the store freshness window
    pub fn with_freshness_window(mut self, window: Duration) -> Self {
        self.freshness_window = window;
        self
    }

    /// Check that the base URL is an absolute http(s) URL
    pub fn validate(&self) -> ClientResult<()> {
        let url = self.base_url.trim();
        if url.starts_with("http://") || url.starts_with("https://") {
            Ok(())
        } else {
            Err(ClientError::Config(format!(
                "base URL must start with http:// or https://, got '{}'",
                self.base_url
            )))
        }
    }

    /// Create a network HTTP client from this configuration
    pub fn build_http_client(&self) -> ClientResult<NetworkHttpClient> {
        NetworkHttpClient::new(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
