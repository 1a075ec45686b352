//! The storage seam between request handlers and the relational store

use async_trait::async_trait;

use crate::models::{Game, GameId, GameSummary, Image, ImageId};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },
}

impl DbError {
    pub(crate) fn game_not_found(id: GameId) -> Self {
        Self::NotFound {
            resource: "game",
            id: id.to_string(),
        }
    }
}

/// Catalog storage operations.
///
/// A game and its image reference each other through two independent
/// columns (`games.image_id` and `image.game_id`). Implementations keep both
/// in step on every mutation.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Look up a game by primary key.
    async fn find_game(&self, id: GameId) -> Result<Option<Game>, DbError>;

    /// Store a new image for `game` and point the game at it.
    ///
    /// Returns `DbError::NotFound` if the game disappeared in between.
    async fn attach_image(&self, game: GameId, data: Vec<u8>) -> Result<ImageId, DbError>;

    /// Look up an image row by primary key.
    async fn fetch_image(&self, id: ImageId) -> Result<Option<Image>, DbError>;

    /// Overwrite the bytes of every image whose `game_id` is `game`.
    ///
    /// Returns the number of rows updated. `games.image_id` is not consulted.
    async fn replace_game_image(&self, game: GameId, data: Vec<u8>) -> Result<u64, DbError>;

    /// Clear `games.image_id`, then delete every image whose `game_id` is
    /// `game`.
    ///
    /// Returns the number of image rows deleted. The pointer stays cleared
    /// even when no image row matched.
    async fn delete_game_image(&self, game: GameId) -> Result<u64, DbError>;

    /// All games ordered by id, with developer, categories and linked image.
    async fn list_games(&self) -> Result<Vec<GameSummary>, DbError>;

    /// Release held resources. Called once at shutdown.
    async fn close(&self) {}
}
