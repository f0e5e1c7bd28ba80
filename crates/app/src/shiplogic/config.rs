//! Shiplogic client configuration.

use std::{fmt, time::Duration};

/// Base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "https://api.shiplogic.com";

/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for the Shiplogic API.
#[derive(Clone)]
pub struct ShiplogicConfig {
    base_url: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl ShiplogicConfig {
    /// Build a configuration. A trailing slash on `base_url` is dropped, and a blank API key
    /// counts as missing.
    #[must_use]
    pub fn new(base_url: &str, api_key: Option<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            timeout,
        }
    }

    /// API base URL, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Bearer credential, when configured.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    /// Per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Absolute URL for an API path.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Default for ShiplogicConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, None, DEFAULT_TIMEOUT)
    }
}

impl fmt::Debug for ShiplogicConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShiplogicConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "**redacted**"))
            .field("timeout", &self.timeout)
            .finish()
    }
}
