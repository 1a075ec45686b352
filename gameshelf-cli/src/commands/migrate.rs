//! Schema bootstrap command

use anyhow::{Context, Result};
use clap::Parser;

use gameshelf_server::db::schema;
use gameshelf_server::CatalogStore;

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    /// Database URL
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,
}

/// Create catalog tables and indexes, then exit
pub async fn run_migrate(args: MigrateArgs) -> Result<()> {
    let store = super::connect(&args.database_url, 1).await?;

    let result = schema::ensure(store.pool())
        .await
        .context("Failed to run catalog migrations");
    store.close().await;

    result
}
