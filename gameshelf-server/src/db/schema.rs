//! Schema bootstrap for the catalog tables
//!
//! Every statement is idempotent, so this is safe to run against a database
//! that already carries the catalog schema.

use sqlx::PgPool;

use super::DbError;

/// Create missing catalog tables, constraints and indexes.
pub async fn ensure(pool: &PgPool) -> Result<(), DbError> {
    tracing::info!("Running catalog migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS developer (
            id SERIAL PRIMARY KEY,
            name TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS category (
            id SERIAL PRIMARY KEY,
            name TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS games (
            id SERIAL PRIMARY KEY,
            name TEXT NOT NULL,
            description TEXT,
            price NUMERIC(10, 2),
            release_date DATE,
            developer_id INTEGER REFERENCES developer(id),
            image_id INTEGER UNIQUE
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS image (
            id SERIAL PRIMARY KEY,
            data BYTEA,
            game_id INTEGER REFERENCES games(id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    // games and image reference each other, so one side is added afterwards
    sqlx::query(
        r#"
        DO $$
        BEGIN
            IF NOT EXISTS (
                SELECT 1 FROM pg_constraint WHERE conname = 'games_image_id_fkey'
            ) THEN
                ALTER TABLE games
                    ADD CONSTRAINT games_image_id_fkey
                    FOREIGN KEY (image_id) REFERENCES image(id);
            END IF;
        END
        $$
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS game_category (
            game_id INTEGER NOT NULL REFERENCES games(id) ON DELETE CASCADE,
            category_id INTEGER NOT NULL REFERENCES category(id) ON DELETE CASCADE,
            PRIMARY KEY (game_id, category_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    create_indexes(pool).await?;

    tracing::info!("Catalog migrations complete");
    Ok(())
}

async fn create_indexes(pool: &PgPool) -> Result<(), DbError> {
    // replace and delete both filter on image.game_id
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_image_game_id ON image(game_id)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_games_developer ON games(developer_id)")
        .execute(pool)
        .await?;
    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_game_category_category ON game_category(category_id)",
    )
    .execute(pool)
    .await?;

    Ok(())
}
