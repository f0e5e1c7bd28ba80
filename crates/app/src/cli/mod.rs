use clap::{Parser, Subcommand};

mod admin;
mod db;
mod outbox;

#[derive(Debug, Parser)]
#[command(name = "taper-app", about = "Taper CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Manage back-office access tokens
    Admin(admin::AdminCommand),

    /// Database maintenance
    Db(db::DbCommand),

    /// Inspect and drain the checkout outbox
    Outbox(outbox::OutboxCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Admin(command) => admin::run(command).await,
            Commands::Db(command) => db::run(command).await,
            Commands::Outbox(command) => outbox::run(command).await,
        }
    }
}
