//! Game entity model

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A game in the catalog. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameEntity {
    pub id: String,
    pub title: String,
    #[serde(default, alias = "image")]
    pub image_ref: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub rating: f64,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub comments: u64,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default)]
    pub is_hot: bool,
}

/// Shared handle to a catalog entry
pub type GameRef = Arc<GameEntity>;

impl GameEntity {
    /// Create an entity with the required fields; counters and flags start at zero
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        category: impl Into<String>,
        rating: f64,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            image_ref: String::new(),
            description: String::new(),
            category: category.into(),
            tags: Vec::new(),
            rating,
            views: 0,
            comments: 0,
            is_new: false,
            is_hot: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_image(mut self, image_ref: impl Into<String>) -> Self {
        self.image_ref = image_ref.into();
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_counters(mut self, views: u64, comments: u64) -> Self {
        self.views = views;
        self.comments = comments;
        self
    }

    pub fn new_release(mut self) -> Self {
        self.is_new = true;
        self
    }

    pub fn hot(mut self) -> Self {
        self.is_hot = true;
        self
    }

    /// Popularity score: each comment weighs as much as five views.
    /// Saturates at `u64::MAX` for oversized counters.
    pub fn popularity(&self) -> u64 {
        self.views.saturating_add(self.comments.saturating_mul(5))
    }

    /// Check if rating lies within 0.0-5.0
    pub fn has_valid_rating(&self) -> bool {
        (0.0..=5.0).contains(&self.rating)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_popularity_score() {
        let a = GameEntity::new("3", "Space Shooter", "Action", 4.7).with_counters(1560, 42);
        let b = GameEntity::new("7", "Hidden School", "Stealth", 4.9).with_counters(2100, 58);
        assert_eq!(a.popularity(), 1770);
        assert_eq!(b.popularity(), 2390);
    }

    #[test]
    fn test_popularity_saturates() {
        let game = GameEntity::new("1", "a", "b", 3.0).with_counters(10, u64::MAX);
        assert_eq!(game.popularity(), u64::MAX);

        let game = GameEntity::new("1", "a", "b", 3.0).with_counters(u64::MAX, 1);
        assert_eq!(game.popularity(), u64::MAX);
    }

    #[test]
    fn test_rating_bounds() {
        assert!(GameEntity::new("1", "a", "b", 0.0).has_valid_rating());
        assert!(GameEntity::new("1", "a", "b", 5.0).has_valid_rating());
        assert!(!GameEntity::new("1", "a", "b", 5.1).has_valid_rating());
        assert!(!GameEntity::new("1", "a", "b", -0.5).has_valid_rating());
        assert!(!GameEntity::new("1", "a", "b", f64::NAN).has_valid_rating());
    }

    #[test]
    fn test_deserialize_defaults() {
        let json = r#"{"id":"9","title":"Tiny","category":"Puzzle","rating":3.0}"#;
        let game: GameEntity = serde_json::from_str(json).unwrap();
        assert!(game.tags.is_empty());
        assert!(!game.is_new);
        assert!(!game.is_hot);
        assert_eq!(game.views, 0);
    }

    #[test]
    fn test_deserialize_camel_case_flags() {
        let json = r#"{
            "id": "1",
            "title": "Arcade Racer",
            "imageRef": "racer.png",
            "category": "Racing",
            "rating": 4.5,
            "isNew": true
        }"#;
        let game: GameEntity = serde_json::from_str(json).unwrap();
        assert_eq!(game.image_ref, "racer.png");
        assert!(game.is_new);
    }
}
