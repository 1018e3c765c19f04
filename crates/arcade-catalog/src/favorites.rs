//! Favorites set

use crate::persistence::{read_ids, write_ids};
use crate::{CatalogError, FAVORITES_KEY, KeyValueStore};
use std::collections::HashSet;
use tracing::info;

/// Result of flipping a favorite
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Added,
    Removed,
}

/// Set of favorited game ids.
///
/// Ids are kept in the order they were added so the persisted record is
/// stable, but membership is the only observable property. No catalog
/// existence check is made.
#[derive(Debug, Clone, Default)]
pub struct FavoritesTracker {
    ids: Vec<String>,
}

impl FavoritesTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rehydrate from the store; absent or malformed records start empty
    pub fn load(store: &dyn KeyValueStore) -> Result<Self, CatalogError> {
        let mut tracker = Self::new();

        if let Some(ids) = read_ids(store, FAVORITES_KEY)? {
            for id in ids {
                if !tracker.contains(&id) {
                    tracker.ids.push(id);
                }
            }
        }

        info!("Loaded {} favorites", tracker.len());
        Ok(tracker)
    }

    /// Write the full set to the store
    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<(), CatalogError> {
        write_ids(store, FAVORITES_KEY, &self.ids)
    }

    /// Flip membership of `id`
    pub fn toggle(&mut self, id: &str) -> ToggleOutcome {
        if let Some(pos) = self.ids.iter().position(|fav| fav == id) {
            self.ids.remove(pos);
            ToggleOutcome::Removed
        } else {
            self.ids.push(id.to_string());
            ToggleOutcome::Added
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|fav| fav == id)
    }

    /// All favorited ids
    pub fn all(&self) -> HashSet<&str> {
        self.ids.iter().map(|s| s.as_str()).collect()
    }

    /// Ids in the order they were added
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
