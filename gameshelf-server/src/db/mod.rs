//! Database layer - store trait and implementations
//!
//! # Design Principles
//!
//! - Handlers only see `CatalogStore`, never a pool
//! - The game/image dual pointer is written here and nowhere else
//! - The listing is a single JOIN query (no N+1)
//! - Transactions for multi-step operations

pub mod store;
pub mod postgres;
pub mod memory;
pub mod schema;

pub use store::{CatalogStore, DbError};
pub use postgres::{PgCatalogStore, DEFAULT_MAX_CONNECTIONS};
pub use memory::{MemoryCatalogStore, NewGame};
