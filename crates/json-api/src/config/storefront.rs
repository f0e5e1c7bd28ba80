//! Storefront Config

use std::{path::PathBuf, time::Duration};

use clap::{Args, ValueEnum};
use taper::orders::TransitionPolicy;

/// Which order status changes the back office may make.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum PolicyArg {
    /// Any status may follow any other.
    Permissive,

    /// Orders only move forward through their lifecycle.
    Forward,
}

/// Catalog, checkout and back-office settings.
#[derive(Debug, Args)]
pub struct StorefrontConfig {
    /// Product catalog YAML file
    #[arg(long, env = "CATALOG_PATH", default_value = "catalog.yaml")]
    pub catalog_path: PathBuf,

    /// Spool file for orders awaiting database insertion
    #[arg(long, env = "OUTBOX_PATH", default_value = "orders-outbox.jsonl")]
    pub outbox_path: PathBuf,

    /// Seconds between outbox reconciliation runs; 0 disables the background task
    #[arg(long, env = "OUTBOX_RECONCILE_INTERVAL_SECONDS", default_value_t = 60_u64)]
    pub outbox_reconcile_interval_seconds: u64,

    /// Order status transition policy (permissive, forward)
    #[arg(long, env = "ORDER_TRANSITION_POLICY", value_enum, default_value_t = PolicyArg::Permissive)]
    pub transition_policy: PolicyArg,

    /// Include raw provider failure details in error responses
    #[arg(long, env = "EXPOSE_ERROR_DETAILS", default_value_t = false)]
    pub expose_error_details: bool,
}

impl StorefrontConfig {
    /// Order status transition policy.
    #[must_use]
    pub fn transition_policy(&self) -> TransitionPolicy {
        match self.transition_policy {
            PolicyArg::Permissive => TransitionPolicy::Permissive,
            PolicyArg::Forward => TransitionPolicy::Forward,
        }
    }

    /// Interval of the background outbox reconciler, if enabled.
    #[must_use]
    pub fn reconcile_interval(&self) -> Option<Duration> {
        (self.outbox_reconcile_interval_seconds > 0)
            .then(|| Duration::from_secs(self.outbox_reconcile_interval_seconds))
    }
}
