//! API error types with IntoResponse
//!
//! JSON routes answer with `{"error": "..."}`. Store failures are logged and
//! replaced with a fixed per-operation message.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::DbError;
use crate::models::ValidationError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Validation failed (400)
    Validation(ValidationError),

    /// Resource not found (404)
    NotFound { message: &'static str },

    /// Store failure (500, logged)
    Store {
        message: &'static str,
        source: DbError,
    },
}

impl ApiError {
    pub const GAME_NOT_FOUND: Self = Self::NotFound {
        message: "game not found",
    };

    /// Map a store error for an operation whose generic failure text is
    /// `message`. A vanished game still reports as not found.
    pub fn store(message: &'static str) -> impl FnOnce(DbError) -> Self {
        move |source| match source {
            DbError::NotFound { resource: "game", .. } => Self::GAME_NOT_FOUND,
            source => Self::Store { message, source },
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            Self::Validation(e) => e.to_string(),
            Self::NotFound { message } => message.to_owned(),
            Self::Store { message, source } => {
                // Log the actual error, return generic message
                tracing::error!(error = %source, "{}", message);
                message.to_owned()
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

/// Failure while serving raw image bytes. Answered as plain text.
#[derive(Debug, thiserror::Error)]
pub enum ImageFetchError {
    #[error("image not found")]
    NotFound,

    #[error("failed to load image")]
    Store(#[from] DbError),
}

impl IntoResponse for ImageFetchError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Store(e) => {
                tracing::error!(error = %e, "failed to load image");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (
            status,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            self.to_string(),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn validation_error_is_400() {
        let err = ApiError::Validation(ValidationError::InvalidId { field: "id" });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await, json!({ "error": "invalid id" }));
    }

    #[tokio::test]
    async fn not_found_is_404() {
        let response = ApiError::GAME_NOT_FOUND.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await, json!({ "error": "game not found" }));
    }

    #[tokio::test]
    async fn store_error_hides_details() {
        let err = ApiError::store("failed to save image")(DbError::Sqlx(sqlx::Error::PoolClosed));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "failed to save image" })
        );
    }

    #[test]
    fn vanished_game_maps_to_404() {
        let err = ApiError::store("failed to save image")(DbError::NotFound {
            resource: "game",
            id: "3".into(),
        });
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn image_fetch_errors_are_plain_text() {
        let response = ImageFetchError::NotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/plain; charset=utf-8"
        );
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"image not found");

        let response = ImageFetchError::Store(DbError::Sqlx(sqlx::Error::PoolClosed)).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
