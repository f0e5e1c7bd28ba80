//! Background outbox reconciliation.

use std::{sync::Arc, time::Duration};

use tokio::{
    task::JoinHandle,
    time::{self, MissedTickBehavior},
};
use tracing::{debug, error, info, warn};

use taper_app::domain::orders::outbox::{CheckoutService, ReconcileReport};

/// Re-submit spooled orders every `period` until the runtime shuts down.
pub(crate) fn spawn(checkout: Arc<dyn CheckoutService>, period: Duration) -> JoinHandle<()> {
    info!(period_seconds = period.as_secs(), "starting outbox reconciler");

    tokio::spawn(async move {
        let mut interval = time::interval(period);

        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            interval.tick().await;

            run_once(checkout.as_ref()).await;
        }
    })
}

/// One reconciliation pass. Failures are logged and retried on the next pass.
pub(crate) async fn run_once(checkout: &dyn CheckoutService) -> Option<ReconcileReport> {
    match checkout.reconcile().await {
        Ok(report) if report.stored > 0 || report.already_present > 0 => {
            info!(
                stored = report.stored,
                already_present = report.already_present,
                remaining = report.remaining,
                "reconciled spooled orders"
            );

            Some(report)
        }
        Ok(report) if report.remaining > 0 => {
            warn!(
                remaining = report.remaining,
                "spooled orders are still waiting for the order store"
            );

            Some(report)
        }
        Ok(report) => {
            debug!("outbox is empty");

            Some(report)
        }
        Err(source) => {
            error!("outbox reconciliation failed: {source}");

            None
        }
    }
}
