//! gameshelf CLI - game catalog backend
//!
//! Entry point for the `gameshelf` binary:
//! - `serve` runs the HTTP API (image upload/fetch/replace/delete, listing)
//! - `migrate` creates the catalog tables if they are missing

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "gameshelf",
    author,
    version,
    about = "Game catalog backend with cover image storage",
    long_about = "Serve a game catalog over HTTP. Cover images are stored as binary rows \
                  in PostgreSQL and inlined into the catalog listing as data URIs."
)]
struct Cli {
    /// Enable debug logging (RUST_LOG still takes precedence)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Create catalog tables and indexes if missing
    Migrate(commands::migrate::MigrateArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env must be loaded before clap reads `env = ...` defaults
    let env_file = config::load_dotenv();

    let cli = Cli::parse();
    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug })?;

    match env_file {
        Some(path) => tracing::info!("Loaded configuration from {}", path.display()),
        None => tracing::debug!("No .env file found, using environment variables only"),
    }

    match cli.command {
        Commands::Serve(args) => commands::serve::run_serve(args).await,
        Commands::Migrate(args) => commands::migrate::run_migrate(args).await,
    }
}
