//! Client configuration

use std::time::Duration;

use crate::session::SessionHandle;
use crate::{ClientResult, HttpClient};

/// Client configuration for connecting to the storefront API
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL (e.g., "https://shop.example.com/api")
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Minimum spacing between consecutive requests, in milliseconds.
    /// Zero disables client-side throttling.
    pub min_request_interval: u64,

    /// Maximum transport-level retries (connection errors, HTTP 429)
    pub max_retries: u32,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: 15,
            min_request_interval: 1_000,
            max_retries: 3,
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set the minimum spacing between consecutive requests
    pub fn with_min_request_interval(mut self, millis: u64) -> Self {
        self.min_request_interval = millis;
        self
    }

    /// Set the transport retry limit
    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    pub(crate) fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    pub(crate) fn request_interval(&self) -> Duration {
        Duration::from_millis(self.min_request_interval)
    }

    /// Create an HTTP client from this configuration
    pub fn build_http_client(&self, session: SessionHandle) -> ClientResult<HttpClient> {
        HttpClient::new(self, session)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:8081/api")
    }
}
