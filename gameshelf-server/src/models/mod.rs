//! Domain models with validation at construction
//!
//! Path parameters are parsed into typed ids before any handler logic
//! runs. Invalid input returns ValidationError, not panic.

pub mod validation;
pub mod ids;
pub mod game;
pub mod image;

pub use validation::ValidationError;
pub use ids::{GameId, ImageId};
pub use game::{Game, GameListingRow, GameSummary};
pub use image::{data_uri, Image, IMAGE_MIME};
