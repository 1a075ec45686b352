//! Health check endpoint

use axum::{routing::get, Router};
use chrono::{SecondsFormat, Utc};

/// GET / - liveness probe with the current server time
async fn health() -> String {
    format!(
        "Server running - {}",
        Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
    )
}

/// Health routes
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/", get(health))
}
