//! Search, filter and sort over sequences of games
//!
//! All functions are pure: they take a slice of shared game handles and
//! return a new vector, preserving input order wherever no ordering key
//! applies.

use crate::{ALL_CATEGORIES, GameEntity, GameRef};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Filter constraints; `None` means no constraint on that dimension
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub category: Option<String>,
    pub tag: Option<String>,
    /// Minimum rating
    pub rating: Option<f64>,
}

impl FilterOptions {
    pub fn category(category: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
            ..Self::default()
        }
    }

    pub fn tag(tag: impl Into<String>) -> Self {
        Self {
            tag: Some(tag.into()),
            ..Self::default()
        }
    }

    pub fn min_rating(rating: f64) -> Self {
        Self {
            rating: Some(rating),
            ..Self::default()
        }
    }

    /// Check if no field is set
    pub fn is_empty(&self) -> bool {
        self.active_count() == 0
    }

    /// Number of fields that are set
    pub fn active_count(&self) -> usize {
        [
            self.category.is_some(),
            self.tag.is_some(),
            self.rating.is_some(),
        ]
        .iter()
        .filter(|&&set| set)
        .count()
    }

    /// Check a single game against every set constraint
    pub fn matches(&self, game: &GameEntity) -> bool {
        if let Some(category) = &self.category {
            if category != ALL_CATEGORIES && game.category != *category {
                return false;
            }
        }
        if let Some(tag) = &self.tag {
            if !game.tags.iter().any(|t| t == tag) {
                return false;
            }
        }
        if let Some(rating) = self.rating {
            // A NaN threshold admits nothing
            if rating.is_nan() || game.rating < rating {
                return false;
            }
        }
        true
    }

    /// Apply a patch field by field
    pub fn apply(&mut self, patch: FilterPatch) {
        patch.category.apply_to(&mut self.category);
        patch.tag.apply_to(&mut self.tag);
        patch.rating.apply_to(&mut self.rating);
    }
}

/// Change to a single sticky filter field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldUpdate<T> {
    /// Leave the previous value in place
    Keep,
    /// Replace the previous value
    Set(T),
    /// Remove the constraint
    Clear,
}

impl<T> Default for FieldUpdate<T> {
    fn default() -> Self {
        FieldUpdate::Keep
    }
}

impl<T> FieldUpdate<T> {
    fn apply_to(self, slot: &mut Option<T>) {
        match self {
            FieldUpdate::Keep => {}
            FieldUpdate::Set(value) => *slot = Some(value),
            FieldUpdate::Clear => *slot = None,
        }
    }
}

/// Partial filter update merged into the current filter state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterPatch {
    pub category: FieldUpdate<String>,
    pub tag: FieldUpdate<String>,
    pub rating: FieldUpdate<f64>,
}

impl FilterPatch {
    pub fn category(category: impl Into<String>) -> Self {
        Self {
            category: FieldUpdate::Set(category.into()),
            ..Self::default()
        }
    }

    pub fn tag(tag: impl Into<String>) -> Self {
        Self {
            tag: FieldUpdate::Set(tag.into()),
            ..Self::default()
        }
    }

    pub fn min_rating(rating: f64) -> Self {
        Self {
            rating: FieldUpdate::Set(rating),
            ..Self::default()
        }
    }

    /// Patch that removes every constraint
    pub fn clear_all() -> Self {
        Self {
            category: FieldUpdate::Clear,
            tag: FieldUpdate::Clear,
            rating: FieldUpdate::Clear,
        }
    }
}

impl From<FilterOptions> for FilterPatch {
    /// Set fields become `Set`, unset fields are left untouched
    fn from(options: FilterOptions) -> Self {
        Self {
            category: options.category.map_or(FieldUpdate::Keep, FieldUpdate::Set),
            tag: options.tag.map_or(FieldUpdate::Keep, FieldUpdate::Set),
            rating: options.rating.map_or(FieldUpdate::Keep, FieldUpdate::Set),
        }
    }
}

/// Result ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOption {
    /// Views plus five per comment, descending
    Popular,
    /// New releases first
    Newest,
    /// Rating, descending
    Rating,
    /// Views, descending
    Views,
}

impl SortOption {
    pub const ALL: [SortOption; 4] = [
        SortOption::Popular,
        SortOption::Newest,
        SortOption::Rating,
        SortOption::Views,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::Popular => "popular",
            SortOption::Newest => "newest",
            SortOption::Rating => "rating",
            SortOption::Views => "views",
        }
    }

    /// Capitalized name for messages
    pub fn label(&self) -> &'static str {
        match self {
            SortOption::Popular => "Popular",
            SortOption::Newest => "Newest",
            SortOption::Rating => "Rating",
            SortOption::Views => "Views",
        }
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "popular" => Ok(SortOption::Popular),
            "newest" => Ok(SortOption::Newest),
            "rating" => Ok(SortOption::Rating),
            "views" => Ok(SortOption::Views),
            other => Err(format!("unknown sort option: {}", other)),
        }
    }
}

/// Case-insensitive substring match on title, description, or any tag.
///
/// The term is matched as given; callers decide what a blank term means.
pub fn search(games: &[GameRef], term: &str) -> Vec<GameRef> {
    let needle = term.to_lowercase();

    games
        .iter()
        .filter(|game| {
            game.title.to_lowercase().contains(&needle)
                || game.description.to_lowercase().contains(&needle)
                || game.tags.iter().any(|t| t.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}

/// Keep games satisfying every set constraint
pub fn filter(games: &[GameRef], options: &FilterOptions) -> Vec<GameRef> {
    games
        .iter()
        .filter(|game| options.matches(game))
        .cloned()
        .collect()
}

/// Narrow to one category; the `all` sentinel keeps everything
pub fn in_category(games: &[GameRef], category: &str) -> Vec<GameRef> {
    if category == ALL_CATEGORIES {
        return games.to_vec();
    }
    games
        .iter()
        .filter(|game| game.category == category)
        .cloned()
        .collect()
}

/// Stable sort into a new vector; equal keys keep input order
pub fn sort(games: &[GameRef], option: SortOption) -> Vec<GameRef> {
    let mut sorted = games.to_vec();

    match option {
        SortOption::Popular => sorted.sort_by_key(|g| std::cmp::Reverse(g.popularity())),
        SortOption::Newest => sorted.sort_by_key(|g| !g.is_new),
        SortOption::Rating => sorted.sort_by(|a, b| {
            b.rating.partial_cmp(&a.rating).unwrap_or(Ordering::Equal)
        }),
        SortOption::Views => sorted.sort_by_key(|g| std::cmp::Reverse(g.views)),
    }

    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CatalogStore, sample};
    use std::sync::Arc;

    fn ids(games: &[GameRef]) -> Vec<&str> {
        games.iter().map(|g| g.id.as_str()).collect()
    }

    fn game(id: &str) -> GameEntity {
        GameEntity::new(id, format!("Game {}", id), "Action", 3.0)
    }

    #[test]
    fn test_search_matches_title_description_and_tags() {
        let store = sample::catalog().unwrap();
        assert_eq!(ids(&search(store.all(), "stealth")), ["4", "7", "8"]);
        // tag only
        assert_eq!(ids(&search(store.all(), "ninja")), ["4"]);
        // description only
        assert_eq!(ids(&search(store.all(), "galaxy")), ["3"]);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let store = sample::catalog().unwrap();
        assert_eq!(
            ids(&search(store.all(), "STEALTH")),
            ids(&search(store.all(), "sTeAlTh"))
        );
    }

    #[test]
    fn test_search_no_match() {
        let store = sample::catalog().unwrap();
        assert!(search(store.all(), "zzz-nothing").is_empty());
    }

    #[test]
    fn test_search_results_contain_term() {
        let store = sample::catalog().unwrap();
        for term in ["a", "arcade", "game", "st", "Office"] {
            let needle = term.to_lowercase();
            for g in search(store.all(), term) {
                assert!(
                    g.title.to_lowercase().contains(&needle)
                        || g.description.to_lowercase().contains(&needle)
                        || g.tags.iter().any(|t| t.to_lowercase().contains(&needle)),
                    "{} does not contain {}",
                    g.id,
                    term
                );
            }
        }
    }

    #[test]
    fn test_filter_conjunction() {
        let store = sample::catalog().unwrap();
        let options = FilterOptions {
            category: Some("Stealth".to_string()),
            tag: Some("Casual".to_string()),
            rating: Some(4.5),
        };
        assert_eq!(ids(&filter(store.all(), &options)), ["7"]);
    }

    #[test]
    fn test_filter_all_sentinel_and_empty() {
        let store = sample::catalog().unwrap();
        assert_eq!(filter(store.all(), &FilterOptions::default()).len(), 8);
        assert_eq!(filter(store.all(), &FilterOptions::category("all")).len(), 8);
    }

    #[test]
    fn test_filter_tag_is_exact() {
        let store = sample::catalog().unwrap();
        assert_eq!(ids(&filter(store.all(), &FilterOptions::tag("Stealth"))), ["7"]);
        assert!(filter(store.all(), &FilterOptions::tag("stealth")).is_empty());
    }

    #[test]
    fn test_filter_nan_rating_matches_nothing() {
        let store = sample::catalog().unwrap();
        assert!(filter(store.all(), &FilterOptions::min_rating(f64::NAN)).is_empty());
    }

    #[test]
    fn test_filter_idempotent() {
        let store = sample::catalog().unwrap();
        let options_list = [
            FilterOptions::category("Stealth"),
            FilterOptions::tag("Strategy"),
            FilterOptions::min_rating(4.5),
            FilterOptions::default(),
        ];
        for options in options_list {
            let once = filter(store.all(), &options);
            let twice = filter(&once, &options);
            assert_eq!(ids(&once), ids(&twice));
        }
    }

    #[test]
    fn test_sort_popular() {
        let store = sample::catalog().unwrap();
        let sorted = sort(store.all(), SortOption::Popular);
        assert_eq!(sorted[0].id, "7");
        let pos3 = sorted.iter().position(|g| g.id == "3").unwrap();
        let pos7 = sorted.iter().position(|g| g.id == "7").unwrap();
        assert!(pos7 < pos3);
    }

    #[test]
    fn test_sort_popular_with_huge_counters() {
        let catalog = CatalogStore::from_json(
            r#"[
                {"id": "a", "title": "A", "category": "Action", "rating": 3.0, "views": 10},
                {"id": "b", "title": "B", "category": "Action", "rating": 3.0, "comments": 18446744073709551615},
                {"id": "c", "title": "C", "category": "Action", "rating": 3.0, "views": 18446744073709551615, "comments": 1}
            ]"#,
        )
        .unwrap();
        // b and c both saturate and keep input order
        assert_eq!(ids(&sort(catalog.all(), SortOption::Popular)), ["b", "c", "a"]);
    }

    #[test]
    fn test_sort_newest_is_stable_partition() {
        let store = sample::catalog().unwrap();
        let sorted = sort(store.all(), SortOption::Newest);
        assert_eq!(ids(&sorted), ["1", "6", "2", "3", "4", "5", "7", "8"]);
    }

    #[test]
    fn test_sort_rating_and_views() {
        let store = sample::catalog().unwrap();
        assert_eq!(
            ids(&sort(store.all(), SortOption::Rating)),
            ["7", "4", "3", "6", "1", "8", "5", "2"]
        );
        assert_eq!(
            ids(&sort(store.all(), SortOption::Views)),
            ["7", "3", "4", "1", "6", "8", "5", "2"]
        );
    }

    #[test]
    fn test_sort_is_stable_for_every_option() {
        // All keys equal, so every option must return input order
        let games: Vec<GameRef> = ["a", "b", "c", "d"]
            .iter()
            .map(|id| Arc::new(game(id)))
            .collect();
        for option in SortOption::ALL {
            assert_eq!(ids(&sort(&games, option)), ["a", "b", "c", "d"], "{}", option);
        }
    }

    #[test]
    fn test_sort_does_not_mutate_input() {
        let store = sample::catalog().unwrap();
        let before = ids(store.all()).join(",");
        let _ = sort(store.all(), SortOption::Rating);
        assert_eq!(ids(store.all()).join(","), before);
    }

    #[test]
    fn test_in_category() {
        let store = sample::catalog().unwrap();
        assert_eq!(ids(&in_category(store.all(), "Stealth")), ["4", "7", "8"]);
        assert_eq!(in_category(store.all(), ALL_CATEGORIES).len(), 8);
    }

    #[test]
    fn test_patch_merge_is_sticky() {
        let mut options = FilterOptions::default();
        options.apply(FilterPatch::category("Stealth"));
        options.apply(FilterPatch::min_rating(4.5));
        assert_eq!(options.category.as_deref(), Some("Stealth"));
        assert_eq!(options.rating, Some(4.5));

        options.apply(FilterPatch {
            category: FieldUpdate::Clear,
            ..FilterPatch::default()
        });
        assert!(options.category.is_none());
        assert_eq!(options.active_count(), 1);

        options.apply(FilterPatch::clear_all());
        assert!(options.is_empty());
    }

    #[test]
    fn test_patch_from_options() {
        let patch = FilterPatch::from(FilterOptions::tag("Arcade"));
        assert_eq!(patch.tag, FieldUpdate::Set("Arcade".to_string()));
        assert_eq!(patch.category, FieldUpdate::Keep);
    }

    #[test]
    fn test_sort_option_parse_and_display() {
        for option in SortOption::ALL {
            assert_eq!(option.as_str().parse::<SortOption>().unwrap(), option);
        }
        assert_eq!("POPULAR".parse::<SortOption>().unwrap(), SortOption::Popular);
        assert!("latest".parse::<SortOption>().is_err());
        assert_eq!(SortOption::Views.label(), "Views");
    }
}
