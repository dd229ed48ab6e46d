use clap::Parser;

use sitesmith::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    // Initialize configuration (this loads the config singleton)
    let config = sitesmith::config::config();
    tracing::info!("Starting sitesmith in {:?} mode", config.environment);

    let cli = Cli::parse();
    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => sitesmith::server::run().await,
        Commands::Seed {
            username,
            password,
            demo,
        } => sitesmith::cli::seed::run(&username, &password, demo).await,
    }
}
