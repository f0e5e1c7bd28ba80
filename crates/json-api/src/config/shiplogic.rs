//! Shipping Provider Config

use std::time::Duration;

use clap::Args;
use taper_app::shiplogic::{DEFAULT_BASE_URL, ShiplogicConfig};

/// Shiplogic API settings.
#[derive(Debug, Args)]
pub struct ShiplogicSettings {
    /// Shiplogic API key; rates fall back to flat tiers while unset
    #[arg(long, env = "SHIPLOGIC_API_KEY", hide_env_values = true)]
    pub shiplogic_api_key: Option<String>,

    /// Shiplogic API base URL
    #[arg(long, env = "SHIPLOGIC_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub shiplogic_base_url: String,

    /// Provider request timeout in seconds
    #[arg(long, env = "SHIPLOGIC_TIMEOUT_SECONDS", default_value_t = 30_u64)]
    pub shiplogic_timeout_seconds: u64,
}

impl ShiplogicSettings {
    /// Provider request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.shiplogic_timeout_seconds)
    }

    /// Client configuration for these settings.
    #[must_use]
    pub fn client_config(&self) -> ShiplogicConfig {
        ShiplogicConfig::new(
            &self.shiplogic_base_url,
            self.shiplogic_api_key.clone(),
            self.timeout(),
        )
    }
}
