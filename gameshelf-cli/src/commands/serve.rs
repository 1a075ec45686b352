//! HTTP server command
//!
//! Runs the catalog API until Ctrl+C or SIGTERM.

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use gameshelf_server::db::{schema, DEFAULT_MAX_CONNECTIONS};
use gameshelf_server::http::server::DEFAULT_PORT;
use gameshelf_server::{run_server, CatalogStore, ServerConfig};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Interface to bind to
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(long, short = 'p', env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Database URL
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,

    /// Maximum pooled database connections
    #[arg(long, env = "DATABASE_MAX_CONNECTIONS", default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,

    /// Create missing catalog tables before serving
    #[arg(long)]
    pub migrate: bool,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let bind_addr = SocketAddr::new(args.host, args.port);
    tracing::info!("Starting gameshelf server on {}", bind_addr);

    let store = super::connect(&args.database_url, args.max_connections).await?;

    if args.migrate {
        if let Err(e) = schema::ensure(store.pool()).await {
            store.close().await;
            return Err(e).context("Failed to run catalog migrations");
        }
    }

    let config = ServerConfig { bind_addr };

    // Run server (blocks until shutdown, closes the pool on the way out)
    run_server(Arc::new(store), config)
        .await
        .context("Server error")?;

    Ok(())
}
