//! In-process store for tests and local runs without PostgreSQL
//!
//! Mirrors the table layout of the PostgreSQL store, including the two
//! independent game/image pointers, and counts write statements so callers
//! can assert that a rejected request touched nothing.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::Mutex;

use super::{CatalogStore, DbError};
use crate::models::{Game, GameId, GameListingRow, GameSummary, Image, ImageId};

/// Game row to seed into the store
#[derive(Debug, Clone, Default)]
pub struct NewGame {
    pub id: i32,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub developer_id: Option<i32>,
}

impl NewGame {
    pub fn new(id: i32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone)]
struct GameRow {
    game: NewGame,
    image_id: Option<i32>,
}

#[derive(Debug)]
struct Tables {
    games: BTreeMap<i32, GameRow>,
    images: BTreeMap<i32, Image>,
    developers: BTreeMap<i32, String>,
    categories: BTreeMap<i32, String>,
    /// (game_id, category_id)
    game_categories: Vec<(i32, i32)>,
    next_image_id: i32,
}

impl Default for Tables {
    fn default() -> Self {
        Self {
            games: BTreeMap::new(),
            images: BTreeMap::new(),
            developers: BTreeMap::new(),
            categories: BTreeMap::new(),
            game_categories: Vec::new(),
            next_image_id: 1,
        }
    }
}

/// Catalog store held entirely in memory
#[derive(Debug, Default)]
pub struct MemoryCatalogStore {
    tables: Mutex<Tables>,
    writes: AtomicU64,
}

impl MemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start image ids at `next` instead of 1.
    pub fn with_next_image_id(next: i32) -> Self {
        Self {
            tables: Mutex::new(Tables {
                next_image_id: next,
                ..Tables::default()
            }),
            writes: AtomicU64::new(0),
        }
    }

    pub async fn insert_developer(&self, id: i32, name: impl Into<String>) {
        self.tables.lock().await.developers.insert(id, name.into());
    }

    pub async fn insert_category(&self, id: i32, name: impl Into<String>) {
        self.tables.lock().await.categories.insert(id, name.into());
    }

    pub async fn insert_game(&self, game: NewGame) {
        self.tables.lock().await.games.insert(
            game.id,
            GameRow {
                game,
                image_id: None,
            },
        );
    }

    pub async fn link_category(&self, game: i32, category: i32) {
        self.tables
            .lock()
            .await
            .game_categories
            .push((game, category));
    }

    /// Insert an image row directly, without touching `games.image_id`.
    pub async fn insert_image(&self, game: Option<i32>, data: Option<Vec<u8>>) -> ImageId {
        let mut tables = self.tables.lock().await;
        let id = tables.next_image_id;
        tables.next_image_id += 1;
        tables.images.insert(
            id,
            Image {
                id,
                data,
                game_id: game,
            },
        );
        ImageId::new(id)
    }

    /// Number of write statements executed through `CatalogStore`.
    pub fn writes(&self) -> u64 {
        self.writes.load(Ordering::SeqCst)
    }

    fn record_write(&self) {
        self.writes.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl CatalogStore for MemoryCatalogStore {
    async fn find_game(&self, id: GameId) -> Result<Option<Game>, DbError> {
        let tables = self.tables.lock().await;
        Ok(tables.games.get(&id.get()).map(|row| Game {
            id: row.game.id,
            name: row.game.name.clone(),
            developer_id: row.game.developer_id,
            image_id: row.image_id,
        }))
    }

    async fn attach_image(&self, game: GameId, data: Vec<u8>) -> Result<ImageId, DbError> {
        let mut tables = self.tables.lock().await;
        if !tables.games.contains_key(&game.get()) {
            return Err(DbError::game_not_found(game));
        }

        let id = tables.next_image_id;
        tables.next_image_id += 1;
        tables.images.insert(
            id,
            Image {
                id,
                data: Some(data),
                game_id: Some(game.get()),
            },
        );
        self.record_write();

        if let Some(row) = tables.games.get_mut(&game.get()) {
            row.image_id = Some(id);
        }
        self.record_write();

        Ok(ImageId::new(id))
    }

    async fn fetch_image(&self, id: ImageId) -> Result<Option<Image>, DbError> {
        Ok(self.tables.lock().await.images.get(&id.get()).cloned())
    }

    async fn replace_game_image(&self, game: GameId, data: Vec<u8>) -> Result<u64, DbError> {
        let mut tables = self.tables.lock().await;
        let mut updated = 0;
        for image in tables.images.values_mut() {
            if image.game_id == Some(game.get()) {
                image.data = Some(data.clone());
                updated += 1;
            }
        }
        self.record_write();
        Ok(updated)
    }

    async fn delete_game_image(&self, game: GameId) -> Result<u64, DbError> {
        let mut tables = self.tables.lock().await;

        if let Some(row) = tables.games.get_mut(&game.get()) {
            row.image_id = None;
        }
        self.record_write();

        let before = tables.images.len();
        tables.images.retain(|_, image| image.game_id != Some(game.get()));
        self.record_write();

        Ok((before - tables.images.len()) as u64)
    }

    async fn list_games(&self) -> Result<Vec<GameSummary>, DbError> {
        let tables = self.tables.lock().await;

        let summaries = tables
            .games
            .values()
            .map(|row| {
                let mut category_ids: Vec<i32> = tables
                    .game_categories
                    .iter()
                    .filter(|(game, _)| *game == row.game.id)
                    .map(|(_, category)| *category)
                    .collect();
                category_ids.sort_unstable();

                GameListingRow {
                    id: row.game.id,
                    name: row.game.name.clone(),
                    description: row.game.description.clone(),
                    price: row.game.price.clone(),
                    release_date: row.game.release_date,
                    developer: row
                        .game
                        .developer_id
                        .and_then(|id| tables.developers.get(&id).cloned()),
                    image_data: row
                        .image_id
                        .and_then(|id| tables.images.get(&id))
                        .and_then(|image| image.data.clone()),
                    categories: category_ids
                        .iter()
                        .filter_map(|id| tables.categories.get(id).cloned())
                        .collect(),
                }
            })
            .map(GameSummary::from)
            .collect();

        Ok(summaries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn attach_writes_both_sides() {
        let store = MemoryCatalogStore::new();
        store.insert_game(NewGame::new(1, "Celeste")).await;

        let image = store.attach_image(GameId::new(1), vec![1, 2]).await.unwrap();

        let game = store.find_game(GameId::new(1)).await.unwrap().unwrap();
        assert_eq!(game.image_id(), Some(image));
        let row = store.fetch_image(image).await.unwrap().unwrap();
        assert_eq!(row.game_id(), Some(GameId::new(1)));
        assert_eq!(store.writes(), 2);
    }

    #[tokio::test]
    async fn attach_to_missing_game_fails() {
        let store = MemoryCatalogStore::new();
        let err = store.attach_image(GameId::new(9), vec![1]).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { resource: "game", .. }));
        assert_eq!(store.writes(), 0);
    }

    #[tokio::test]
    async fn replace_follows_image_game_id_not_game_pointer() {
        let store = MemoryCatalogStore::new();
        store.insert_game(NewGame::new(1, "Celeste")).await;
        // orphan row that still claims game 1, game pointer never set
        let orphan = store.insert_image(Some(1), Some(vec![0])).await;

        let updated = store.replace_game_image(GameId::new(1), vec![5]).await.unwrap();
        assert_eq!(updated, 1);
        let row = store.fetch_image(orphan).await.unwrap().unwrap();
        assert_eq!(row.data, Some(vec![5]));
    }

    #[tokio::test]
    async fn delete_clears_pointer_even_when_no_rows_match() {
        let store = MemoryCatalogStore::new();
        store.insert_game(NewGame::new(1, "Celeste")).await;
        let image = store.attach_image(GameId::new(1), vec![1]).await.unwrap();
        // detach the row from the image side only
        store.tables.lock().await.images.get_mut(&image.get()).unwrap().game_id = None;

        let deleted = store.delete_game_image(GameId::new(1)).await.unwrap();
        assert_eq!(deleted, 0);
        let game = store.find_game(GameId::new(1)).await.unwrap().unwrap();
        assert_eq!(game.image_id, None);
    }

    #[tokio::test]
    async fn custom_image_id_start() {
        let store = MemoryCatalogStore::with_next_image_id(7);
        store.insert_game(NewGame::new(1, "Celeste")).await;
        let image = store.attach_image(GameId::new(1), vec![1]).await.unwrap();
        assert_eq!(image, ImageId::new(7));
    }
}
