//! Read-only catalog store with id lookup

use crate::{CatalogError, GameEntity, GameRef};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Number of hot games shown in the featured strip
const FEATURED_LIMIT: usize = 3;

/// Immutable base collection of games
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    games: Vec<GameRef>,
    index: HashMap<String, usize>,
}

impl CatalogStore {
    /// Build a store, rejecting duplicate ids and out-of-range ratings
    pub fn new(games: Vec<GameEntity>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(games.len());

        for (pos, game) in games.iter().enumerate() {
            if !game.has_valid_rating() {
                return Err(CatalogError::InvalidRating {
                    id: game.id.clone(),
                    rating: game.rating,
                });
            }
            if index.insert(game.id.clone(), pos).is_some() {
                return Err(CatalogError::DuplicateId(game.id.clone()));
            }
        }

        Ok(Self {
            games: games.into_iter().map(Arc::new).collect(),
            index,
        })
    }

    /// Parse a JSON array of games
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let games: Vec<GameEntity> = serde_json::from_str(json)?;
        Self::new(games)
    }

    /// Load a JSON catalog file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let store = Self::from_json(&contents)?;
        info!("Loaded {} games from {}", store.len(), path.display());
        Ok(store)
    }

    /// All games in insertion order
    pub fn all(&self) -> &[GameRef] {
        &self.games
    }

    /// Look up a game by id
    pub fn by_id(&self, id: &str) -> Option<&GameRef> {
        self.index.get(id).map(|&pos| &self.games[pos])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// Distinct categories in first-seen order
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for game in &self.games {
            if !seen.contains(&game.category.as_str()) {
                seen.push(game.category.as_str());
            }
        }
        seen
    }

    /// Distinct tags in first-seen order
    pub fn tags(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for tag in self.games.iter().flat_map(|g| g.tags.iter()) {
            if !seen.contains(&tag.as_str()) {
                seen.push(tag.as_str());
            }
        }
        seen
    }

    /// First few hot games in catalog order
    pub fn featured(&self) -> Vec<GameRef> {
        self.games
            .iter()
            .filter(|g| g.is_hot)
            .take(FEATURED_LIMIT)
            .cloned()
            .collect()
    }
}
