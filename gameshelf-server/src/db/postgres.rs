//! PostgreSQL store over an sqlx connection pool

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use super::{CatalogStore, DbError};
use crate::models::{Game, GameId, GameListingRow, GameSummary, Image, ImageId};

/// Default maximum connections for the pool.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Store backed by the `games`, `image`, `developer`, `category` and
/// `game_category` tables.
#[derive(Clone)]
pub struct PgCatalogStore {
    pool: PgPool,
}

impl PgCatalogStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool against `database_url`.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let store = PgCatalogStore::connect("postgres://localhost/gameshelf", 5).await?;
    /// ```
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, DbError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        tracing::info!(max_connections, "Database pool ready");
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl CatalogStore for PgCatalogStore {
    async fn find_game(&self, id: GameId) -> Result<Option<Game>, DbError> {
        let game = sqlx::query_as::<_, Game>(
            "SELECT id, name, developer_id, image_id FROM games WHERE id = $1",
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await?;

        Ok(game)
    }

    async fn attach_image(&self, game: GameId, data: Vec<u8>) -> Result<ImageId, DbError> {
        let mut tx = self.pool.begin().await?;

        let (image_id,): (i32,) = sqlx::query_as(
            "INSERT INTO image (data, game_id) VALUES ($1, $2) RETURNING id",
        )
        .bind(data)
        .bind(game.get())
        .fetch_one(&mut *tx)
        .await?;

        let linked = sqlx::query("UPDATE games SET image_id = $1 WHERE id = $2")
            .bind(image_id)
            .bind(game.get())
            .execute(&mut *tx)
            .await?;

        if linked.rows_affected() == 0 {
            // dropping tx rolls back the insert
            return Err(DbError::game_not_found(game));
        }

        tx.commit().await?;
        Ok(ImageId::new(image_id))
    }

    async fn fetch_image(&self, id: ImageId) -> Result<Option<Image>, DbError> {
        let image = sqlx::query_as::<_, Image>(
            "SELECT id, data, game_id FROM image WHERE id = $1",
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await?;

        Ok(image)
    }

    async fn replace_game_image(&self, game: GameId, data: Vec<u8>) -> Result<u64, DbError> {
        let updated = sqlx::query("UPDATE image SET data = $1 WHERE game_id = $2")
            .bind(data)
            .bind(game.get())
            .execute(&self.pool)
            .await?;

        Ok(updated.rows_affected())
    }

    async fn delete_game_image(&self, game: GameId) -> Result<u64, DbError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("UPDATE games SET image_id = NULL WHERE id = $1")
            .bind(game.get())
            .execute(&mut *tx)
            .await?;

        let deleted = sqlx::query("DELETE FROM image WHERE game_id = $1")
            .bind(game.get())
            .execute(&mut *tx)
            .await?;

        // Committed even when nothing was deleted: the cleared pointer stands.
        tx.commit().await?;
        Ok(deleted.rows_affected())
    }

    async fn list_games(&self) -> Result<Vec<GameSummary>, DbError> {
        let rows = sqlx::query_as::<_, GameListingRow>(
            r#"
            SELECT
                g.id,
                g.name,
                g.description,
                trim_scale(g.price)::text AS price,
                g.release_date,
                d.name AS developer,
                i.data AS image_data,
                COALESCE(
                    ARRAY_AGG(c.name ORDER BY c.id) FILTER (WHERE c.name IS NOT NULL),
                    '{}'::text[]
                ) AS categories
            FROM games g
            LEFT JOIN developer d ON d.id = g.developer_id
            LEFT JOIN image i ON i.id = g.image_id
            LEFT JOIN game_category gc ON gc.game_id = g.id
            LEFT JOIN category c ON c.id = gc.category_id
            GROUP BY g.id, d.id, i.id
            ORDER BY g.id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(GameSummary::from).collect())
    }

    async fn close(&self) {
        self.pool.close().await;
        tracing::info!("Database pool closed");
    }
}
