//! gameshelf-server: game catalog HTTP backend
//!
//! Stores cover images for game records and serves the catalog listing
//! with images inlined as data URIs.

pub mod db;
pub mod http;
pub mod models;

pub use db::{CatalogStore, DbError, MemoryCatalogStore, PgCatalogStore};
pub use http::{build_router, run_server, AppState, ServerConfig, ServerError};
