//! Game catalog engine for Arcade Hub
//!
//! Handles catalog lookup, search/filter/sort queries, favorites, and the
//! recently played history. Favorites and history are persisted through a
//! small key-value boundary so any durable store can back them.

mod controller;
mod entity;
mod favorites;
mod history;
mod notification;
mod persistence;
pub mod query;
pub mod sample;
mod store;

pub use controller::{ActionOutcome, CatalogController, CatalogState, QueryState};
pub use entity::{GameEntity, GameRef};
pub use favorites::{FavoritesTracker, ToggleOutcome};
pub use history::{DEFAULT_HISTORY_CAPACITY, RecentHistory};
pub use notification::{Notification, NotificationKind};
pub use persistence::{KeyValueStore, MemoryStore, SqliteStore};
pub use query::{FieldUpdate, FilterOptions, FilterPatch, SortOption};
pub use store::CatalogStore;

use thiserror::Error;

/// Category sentinel meaning "no category constraint"
pub const ALL_CATEGORIES: &str = "all";

/// Persistence key for the favorites set
pub const FAVORITES_KEY: &str = "favorites";

/// Persistence key for the recently played history
pub const RECENTLY_PLAYED_KEY: &str = "recentlyPlayed";

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Duplicate game id: {0}")]
    DuplicateId(String),

    #[error("Invalid rating {rating} for game {id} (expected 0.0-5.0)")]
    InvalidRating { id: String, rating: f64 },

    #[error("Catalog is empty")]
    EmptyCatalog,

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Named views over the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Collection {
    /// All games
    All,
    /// Hot games shown in the featured strip
    Featured,
    /// Favorites
    Favorites,
    /// Recently played
    RecentlyPlayed,
    /// By category
    Category(String),
}
