use std::{path::PathBuf, sync::Arc};

use clap::Args;
use taper::orders::TransitionPolicy;
use taper_app::{
    database::{self, Db},
    domain::orders::{
        PgOrdersService,
        outbox::{CheckoutService, OrderOutbox, OutboxCheckoutService},
    },
};

#[derive(Debug, Args)]
pub(crate) struct ReconcileArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Spool file of orders awaiting insertion
    #[arg(long, env = "OUTBOX_PATH", default_value = "orders-outbox.jsonl")]
    outbox_path: PathBuf,
}

pub(crate) async fn run(args: ReconcileArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let orders = Arc::new(PgOrdersService::new(
        Db::new(pool),
        TransitionPolicy::default(),
    ));
    let outbox = Arc::new(OrderOutbox::new(args.outbox_path));

    let report = OutboxCheckoutService::new(orders, outbox)
        .reconcile()
        .await
        .map_err(|error| format!("failed to reconcile outbox: {error}"))?;

    println!("stored: {}", report.stored);
    println!("already_present: {}", report.already_present);
    println!("remaining: {}", report.remaining);

    Ok(())
}
