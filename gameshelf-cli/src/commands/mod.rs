//! Subcommand implementations

pub mod migrate;
pub mod serve;

use anyhow::{Context, Result};
use gameshelf_server::PgCatalogStore;

/// Open the PostgreSQL store shared by all subcommands
async fn connect(database_url: &str, max_connections: u32) -> Result<PgCatalogStore> {
    PgCatalogStore::connect(database_url, max_connections)
        .await
        .context("Failed to create database pool")
}
