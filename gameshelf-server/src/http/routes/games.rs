//! Game listing endpoint

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};

use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::models::GameSummary;

/// GET /games - every game with developer, categories and inline image
async fn list_games(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<GameSummary>>, ApiError> {
    let games = state
        .store
        .list_games()
        .await
        .map_err(ApiError::store("failed to fetch games"))?;

    tracing::debug!(count = games.len(), "Listed games");
    Ok(Json(games))
}

/// Game routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/games", get(list_games))
}
