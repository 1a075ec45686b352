//! HTTP server layer
//!
//! Axum server with:
//! - CORS open to any origin
//! - Request tracing
//! - Graceful shutdown
//! - JSON error responses (plain text for image bytes)

pub mod server;
pub mod error;
pub mod extractors;
pub mod routes;

pub use server::{build_router, run_server, AppState, ServerConfig, ServerError};
pub use error::{ApiError, ImageFetchError};
