//! Custom Axum extractors

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;

use super::error::ApiError;
use crate::models::{GameId, ValidationError};

/// Extract and validate a game id from path
///
/// Runs before any body extractor, so a bad id is reported even when the
/// body is missing or malformed.
pub struct ValidGameId(pub GameId);

impl<S> FromRequestParts<S> for ValidGameId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::Validation(ValidationError::InvalidId { field: "id" }))?;

        let id = GameId::parse(&raw)?;
        Ok(Self(id))
    }
}
