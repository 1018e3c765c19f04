//! Recently played history

use crate::persistence::{read_ids, write_ids};
use crate::{CatalogError, CatalogStore, GameEntity, GameRef, KeyValueStore, RECENTLY_PLAYED_KEY};
use tracing::{debug, info};

/// Number of games kept in the recently played list
pub const DEFAULT_HISTORY_CAPACITY: usize = 4;

/// Bounded most-recent-first list of played game ids.
///
/// Ids are the ground truth; entities are resolved against the catalog on
/// every read.
#[derive(Debug, Clone)]
pub struct RecentHistory {
    ids: Vec<String>,
    capacity: usize,
}

impl Default for RecentHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

impl RecentHistory {
    /// Create an empty history; capacity is clamped to at least one
    pub fn new(capacity: usize) -> Self {
        Self {
            ids: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    /// Rehydrate from the store.
    ///
    /// Ids that no longer resolve in the catalog are dropped, as are
    /// duplicates and anything beyond capacity.
    pub fn load(
        store: &dyn KeyValueStore,
        catalog: &CatalogStore,
        capacity: usize,
    ) -> Result<Self, CatalogError> {
        let mut history = Self::new(capacity);

        if let Some(ids) = read_ids(store, RECENTLY_PLAYED_KEY)? {
            for id in ids {
                if history.ids.len() == history.capacity {
                    break;
                }
                if !catalog.contains(&id) {
                    debug!("Dropping unknown game {} from history", id);
                    continue;
                }
                if !history.ids.contains(&id) {
                    history.ids.push(id);
                }
            }
        }

        info!("Loaded {} recently played games", history.ids.len());
        Ok(history)
    }

    /// Write the id sequence to the store
    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<(), CatalogError> {
        write_ids(store, RECENTLY_PLAYED_KEY, &self.ids)
    }

    /// Move `game` to the front, evicting the oldest entry past capacity
    pub fn record_play(&mut self, game: &GameEntity) {
        self.ids.retain(|id| *id != game.id);
        self.ids.insert(0, game.id.clone());
        self.ids.truncate(self.capacity);
    }

    /// Resolved games, most recent first; unknown ids are skipped
    pub fn current(&self, catalog: &CatalogStore) -> Vec<GameRef> {
        self.ids
            .iter()
            .filter_map(|id| catalog.by_id(id).cloned())
            .collect()
    }

    /// Ids, most recent first
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
