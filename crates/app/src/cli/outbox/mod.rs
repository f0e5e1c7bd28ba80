use clap::{Args, Subcommand};

mod reconcile;

#[derive(Debug, Args)]
pub(crate) struct OutboxCommand {
    #[command(subcommand)]
    command: OutboxSubcommand,
}

#[derive(Debug, Subcommand)]
enum OutboxSubcommand {
    /// Re-submit spooled orders to the database
    Reconcile(reconcile::ReconcileArgs),
}

pub(crate) async fn run(command: OutboxCommand) -> Result<(), String> {
    match command.command {
        OutboxSubcommand::Reconcile(args) => reconcile::run(args).await,
    }
}
