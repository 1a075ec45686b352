//! Image endpoints
//!
//! Upload, replace and delete are keyed by game; fetch is keyed by image.

use std::sync::Arc;

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        DefaultBodyLimit, Multipart, Path, State,
    },
    http::header,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;

use crate::db::CatalogStore;
use crate::http::error::{ApiError, ImageFetchError};
use crate::http::extractors::ValidGameId;
use crate::http::server::AppState;
use crate::models::{Game, GameId, ImageId, ValidationError, IMAGE_MIME};

/// Multipart field carrying the image bytes
const IMAGE_FIELD: &str = "image";

/// Upload response
#[derive(Serialize)]
pub struct UploadResponse {
    pub message: &'static str,
    #[serde(rename = "imageId")]
    pub image_id: ImageId,
}

/// Replace/delete response
#[derive(Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

async fn require_game(
    store: &dyn CatalogStore,
    id: GameId,
    failure: &'static str,
) -> Result<Game, ApiError> {
    store
        .find_game(id)
        .await
        .map_err(ApiError::store(failure))?
        .ok_or(ApiError::GAME_NOT_FOUND)
}

/// Buffer the `image` field into memory, skipping any other fields.
async fn read_image_field(
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Vec<u8>, ApiError> {
    let malformed = |_: MultipartError| {
        ApiError::Validation(ValidationError::InvalidFormat {
            field: IMAGE_FIELD,
            reason: "malformed multipart body",
        })
    };

    let mut multipart = multipart.map_err(|e| {
        tracing::debug!(error = %e, "rejected upload body");
        ApiError::Validation(ValidationError::MissingField { field: IMAGE_FIELD })
    })?;

    while let Some(field) = multipart.next_field().await.map_err(malformed)? {
        if field.name() == Some(IMAGE_FIELD) {
            let bytes = field.bytes().await.map_err(malformed)?;
            return Ok(bytes.to_vec());
        }
    }

    Err(ApiError::Validation(ValidationError::MissingField {
        field: IMAGE_FIELD,
    }))
}

/// POST /upload/{game_id} - store a new image and link it to the game
async fn upload_image(
    State(state): State<Arc<AppState>>,
    ValidGameId(game_id): ValidGameId,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, ApiError> {
    const FAILURE: &str = "failed to save image";

    let store = state.store.as_ref();
    let game = require_game(store, game_id, FAILURE).await?;
    let data = read_image_field(multipart).await?;
    let size = data.len();

    let image_id = store
        .attach_image(game.id(), data)
        .await
        .map_err(ApiError::store(FAILURE))?;

    tracing::info!(game = %game_id, image = %image_id, size, "Image uploaded");
    Ok(Json(UploadResponse {
        message: "image uploaded successfully",
        image_id,
    }))
}

/// GET /image/{id} - raw image bytes
async fn fetch_image(
    State(state): State<Arc<AppState>>,
    Path(raw): Path<String>,
) -> Result<Response, ImageFetchError> {
    let id = ImageId::parse(&raw).map_err(|_| ImageFetchError::NotFound)?;
    let image = state
        .store
        .fetch_image(id)
        .await?
        .ok_or(ImageFetchError::NotFound)?;
    let data = image.bytes().ok_or(ImageFetchError::NotFound)?.to_vec();

    Ok(([(header::CONTENT_TYPE, IMAGE_MIME)], data).into_response())
}

/// PUT /upload/{game_id} - overwrite the bytes of the game's image rows
async fn replace_image(
    State(state): State<Arc<AppState>>,
    ValidGameId(game_id): ValidGameId,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    const FAILURE: &str = "failed to update image";

    let store = state.store.as_ref();
    let game = require_game(store, game_id, FAILURE).await?;
    let data = read_image_field(multipart).await?;

    let updated = store
        .replace_game_image(game.id(), data)
        .await
        .map_err(ApiError::store(FAILURE))?;

    if updated == 0 {
        return Err(ApiError::NotFound {
            message: "image not found for this game",
        });
    }

    tracing::info!(game = %game_id, rows = updated, "Image replaced");
    Ok(Json(MessageResponse {
        message: "image updated successfully",
    }))
}

/// DELETE /upload/{game_id} - unlink and delete the game's image rows
async fn delete_image(
    State(state): State<Arc<AppState>>,
    ValidGameId(game_id): ValidGameId,
) -> Result<Json<MessageResponse>, ApiError> {
    const FAILURE: &str = "failed to delete image";

    let store = state.store.as_ref();
    let game = require_game(store, game_id, FAILURE).await?;

    let deleted = store
        .delete_game_image(game.id())
        .await
        .map_err(ApiError::store(FAILURE))?;

    if deleted == 0 {
        return Err(ApiError::NotFound {
            message: "image not found",
        });
    }

    tracing::info!(game = %game_id, rows = deleted, "Image deleted");
    Ok(Json(MessageResponse {
        message: "image deleted successfully",
    }))
}

/// Image routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/upload/{game_id}",
            post(upload_image).put(replace_image).delete(delete_image),
        )
        // uploads are buffered whole, with no size cap
        .layer(DefaultBodyLimit::disable())
        .route("/image/{id}", get(fetch_image))
}
