use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use leafthrough_core::{storage::Database, AppConfig};

mod commands;

#[derive(Parser)]
#[command(name = "leafthrough")]
#[command(author, version, about = "A terminal browser for a local article collection")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the TUI
    Run,
    /// Import articles from a JSON file
    Import {
        /// Path to a JSON file containing a list of articles
        file: String,
    },
    /// List all stored articles
    List,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Arc::new(AppConfig::load()?);

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // Initialize database
    let db = Arc::new(Database::new(&config).await?);

    match cli.command {
        Some(Commands::Run) | None => commands::run::run(config, db).await,
        Some(Commands::Import { file }) => commands::import::run(&db, &file).await,
        Some(Commands::List) => commands::list::run(&db).await,
    }
}
