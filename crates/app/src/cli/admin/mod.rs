use clap::{Args, Subcommand};

mod issue;
mod list;
mod revoke;

#[derive(Debug, Args)]
pub(crate) struct AdminCommand {
    #[command(subcommand)]
    command: AdminSubcommand,
}

#[derive(Debug, Subcommand)]
enum AdminSubcommand {
    /// Issue a new admin token
    IssueToken(issue::IssueTokenArgs),

    /// List admin tokens
    ListTokens(list::ListTokensArgs),

    /// Revoke an admin token
    RevokeToken(revoke::RevokeTokenArgs),
}

pub(crate) async fn run(command: AdminCommand) -> Result<(), String> {
    match command.command {
        AdminSubcommand::IssueToken(args) => issue::run(args).await,
        AdminSubcommand::ListTokens(args) => list::run(args).await,
        AdminSubcommand::RevokeToken(args) => revoke::run(args).await,
    }
}
