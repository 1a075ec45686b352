//! Game records and the flattened listing shape

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use sqlx::FromRow;

use super::{data_uri, GameId, ImageId};

/// Game record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Game {
    pub id: i32,
    pub name: Option<String>,
    pub developer_id: Option<i32>,
    pub image_id: Option<i32>,
}

impl Game {
    pub fn id(&self) -> GameId {
        GameId::new(self.id)
    }

    pub fn image_id(&self) -> Option<ImageId> {
        self.image_id.map(ImageId::new)
    }
}

/// One game joined with its developer, categories and linked image.
///
/// The image is the one reached through `games.image_id`, not through
/// `image.game_id`.
#[derive(Debug, Clone, FromRow)]
pub struct GameListingRow {
    pub id: i32,
    pub name: Option<String>,
    pub description: Option<String>,
    /// NUMERIC rendered as text without trailing zeros
    pub price: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub developer: Option<String>,
    pub image_data: Option<Vec<u8>>,
    pub categories: Vec<String>,
}

/// Game as returned by `GET /games`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameSummary {
    pub id: i32,
    pub name: Option<String>,
    pub image: Option<String>,
    pub description: Option<String>,
    pub price: Option<String>,
    pub release_date: Option<String>,
    pub developer: Option<String>,
    pub categories: Vec<String>,
}

impl From<GameListingRow> for GameSummary {
    fn from(row: GameListingRow) -> Self {
        let image = row
            .image_data
            .as_deref()
            .filter(|data| !data.is_empty())
            .map(data_uri);

        Self {
            id: row.id,
            name: row.name,
            image,
            description: row.description,
            price: row.price,
            release_date: row.release_date.map(format_release_date),
            developer: row.developer,
            categories: row.categories,
        }
    }
}

/// Dates are served as UTC-midnight timestamps with millisecond precision.
fn format_release_date(date: NaiveDate) -> String {
    date.and_time(NaiveTime::MIN)
        .and_utc()
        .format("%Y-%m-%dT%H:%M:%S%.3fZ")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> GameListingRow {
        GameListingRow {
            id: 1,
            name: Some("Hollow Knight".into()),
            description: Some("Metroidvania".into()),
            price: Some("59.9".into()),
            release_date: NaiveDate::from_ymd_opt(2017, 2, 24),
            developer: Some("Team Cherry".into()),
            image_data: None,
            categories: vec!["Action".into(), "Indie".into()],
        }
    }

    #[test]
    fn summary_without_image_is_null() {
        let summary = GameSummary::from(row());
        assert_eq!(summary.image, None);
        assert_eq!(summary.release_date.as_deref(), Some("2017-02-24T00:00:00.000Z"));

        let json = serde_json::to_value(&summary).unwrap();
        assert!(json["image"].is_null());
        assert_eq!(json["price"], "59.9");
        assert_eq!(json["developer"], "Team Cherry");
        assert_eq!(json["categories"], serde_json::json!(["Action", "Indie"]));
    }

    #[test]
    fn summary_embeds_image_as_data_uri() {
        let mut row = row();
        row.image_data = Some(vec![0xFF, 0xD8]);
        let summary = GameSummary::from(row);
        assert_eq!(summary.image.as_deref(), Some("data:image/jpeg;base64,/9g="));
    }

    #[test]
    fn empty_image_data_is_null() {
        let mut row = row();
        row.image_data = Some(Vec::new());
        assert_eq!(GameSummary::from(row).image, None);
    }
}
