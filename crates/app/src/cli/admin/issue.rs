use clap::Args;
use taper_app::{auth::PgAuthService, database};

#[derive(Debug, Args)]
pub(crate) struct IssueTokenArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Who or what the token is for
    #[arg(long)]
    name: String,
}

pub(crate) async fn run(args: IssueTokenArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let issued = PgAuthService::new(pool)
        .issue_admin_token(&args.name)
        .await
        .map_err(|error| format!("failed to issue token: {error}"))?;

    println!("token_uuid: {}", issued.metadata.uuid);
    println!("token_name: {}", issued.metadata.name);
    println!("token_created_at: {}", issued.metadata.created_at);
    println!("admin_token: {}", issued.token.as_str());
    println!("store this token now; it is only shown once");

    Ok(())
}
