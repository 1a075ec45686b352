//! Image rows and their transport encoding

use base64::{engine::general_purpose, Engine as _};
use sqlx::FromRow;

use super::GameId;

/// Media type reported for every stored image. The upload format is never
/// recorded, so this cannot be derived from the row.
pub const IMAGE_MIME: &str = "image/jpeg";

/// Image record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Image {
    pub id: i32,
    pub data: Option<Vec<u8>>,
    pub game_id: Option<i32>,
}

impl Image {
    pub fn game_id(&self) -> Option<GameId> {
        self.game_id.map(GameId::new)
    }

    /// Stored bytes, if the row holds any.
    pub fn bytes(&self) -> Option<&[u8]> {
        self.data.as_deref().filter(|data| !data.is_empty())
    }
}

/// Encode image bytes as a `data:` URI usable directly as an image source.
pub fn data_uri(bytes: &[u8]) -> String {
    format!(
        "data:{};base64,{}",
        IMAGE_MIME,
        general_purpose::STANDARD.encode(bytes)
    )
}
