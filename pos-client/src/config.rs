//! Client configuration

use std::time::Duration;

/// Default back-office API root
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api/v1";

/// Client configuration for connecting to the sales back office
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API root (e.g., "http://localhost:3000/api/v1")
    pub base_url: String,

    /// Bearer token for authentication
    pub token: Option<String>,

    /// Request timeout
    pub timeout: Duration,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: Duration::from_secs(30),
        }
    }

    /// Set the bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Create an HTTP client from this configuration
    pub fn build_http_client(&self) -> crate::ClientResult<crate::NetworkSalesClient> {
        crate::NetworkSalesClient::new(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
