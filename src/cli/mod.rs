pub mod commands;

use clap::{Parser, Subcommand};

use commands::{auth::TokenArgs, server::ServeArgs};

#[derive(Parser)]
#[command(name = "ballot-plans-api")]
#[command(about = "Subscription plans API for the ballot platform")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP server (default)")]
    Serve(ServeArgs),

    #[command(about = "Mint a JWT signed with the configured secret")]
    Token(TokenArgs),

    #[command(about = "Apply the embedded database migrations and exit")]
    Migrate,
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Some(Commands::Serve(args)) => commands::server::handle(args).await,
        Some(Commands::Token(args)) => commands::auth::handle(args),
        Some(Commands::Migrate) => commands::migrate::handle().await,
        None => commands::server::handle(ServeArgs::default()).await,
    }
}
