//! Catalog controller: turns user actions into result views and notifications
//!
//! The controller keeps the last search term, sticky filter options, sort
//! option and selected category as explicit state and recomputes the result
//! view from the full catalog after every action:
//!
//! ```text
//! base = search(all, term)            if term is not blank
//!      = in_category(all, category)   otherwise
//! view = sort(filter(base, options), sort_option)
//! ```
//!
//! Favorites and history are written through to the key-value store right
//! after each mutation.

use crate::notification::Notification;
use crate::query::{self, FilterOptions, FilterPatch, SortOption};
use crate::{
    ALL_CATEGORIES, CatalogError, CatalogStore, Collection, DEFAULT_HISTORY_CAPACITY,
    FavoritesTracker, GameEntity, GameRef, KeyValueStore, RecentHistory, ToggleOutcome,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::sync::Arc;
use tracing::{debug, info};

/// Query inputs the result view is derived from
#[derive(Debug, Clone, PartialEq)]
pub struct QueryState {
    pub search_term: String,
    pub filter: FilterOptions,
    pub sort: Option<SortOption>,
    pub selected_category: String,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            filter: FilterOptions::default(),
            sort: None,
            selected_category: ALL_CATEGORIES.to_string(),
        }
    }
}

impl QueryState {
    /// Compute the result view over `catalog`
    pub fn view(&self, catalog: &CatalogStore) -> Vec<GameRef> {
        let base = if self.search_term.trim().is_empty() {
            query::in_category(catalog.all(), &self.selected_category)
        } else {
            query::search(catalog.all(), &self.search_term)
        };

        let filtered = query::filter(&base, &self.filter);

        match self.sort {
            Some(option) => query::sort(&filtered, option),
            None => filtered,
        }
    }
}

/// Everything the controller mutates
#[derive(Debug, Clone, Default)]
pub struct CatalogState {
    pub query: QueryState,
    pub favorites: FavoritesTracker,
    pub history: RecentHistory,
}

/// Result of a single user action
#[derive(Debug, Clone)]
pub struct ActionOutcome {
    /// Result view after the action
    pub view: Vec<GameRef>,
    /// At most one event for the UI to display
    pub notification: Option<Notification>,
}

impl ActionOutcome {
    /// Ids in the result view
    pub fn ids(&self) -> Vec<&str> {
        self.view.iter().map(|g| g.id.as_str()).collect()
    }
}

/// Orchestrates queries, favorites and history for one session
pub struct CatalogController {
    catalog: Arc<CatalogStore>,
    store: Box<dyn KeyValueStore>,
    state: CatalogState,
    rng: StdRng,
}

impl CatalogController {
    /// Create a controller, rehydrating favorites and history from `store`
    pub fn new(
        catalog: Arc<CatalogStore>,
        store: Box<dyn KeyValueStore>,
        history_capacity: usize,
    ) -> Result<Self, CatalogError> {
        let favorites = FavoritesTracker::load(store.as_ref())?;
        let history = RecentHistory::load(store.as_ref(), &catalog, history_capacity)?;

        info!(
            "Catalog ready: {} games, {} favorites, {} recent",
            catalog.len(),
            favorites.len(),
            history.len()
        );

        Ok(Self {
            catalog,
            store,
            state: CatalogState {
                query: QueryState::default(),
                favorites,
                history,
            },
            rng: StdRng::from_entropy(),
        })
    }

    /// Create a controller with the default history capacity
    pub fn with_store(
        catalog: Arc<CatalogStore>,
        store: Box<dyn KeyValueStore>,
    ) -> Result<Self, CatalogError> {
        Self::new(catalog, store, DEFAULT_HISTORY_CAPACITY)
    }

    /// Use a fixed seed for random picks
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn catalog(&self) -> &Arc<CatalogStore> {
        &self.catalog
    }

    pub fn state(&self) -> &CatalogState {
        &self.state
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    /// Current result view
    pub fn view(&self) -> Vec<GameRef> {
        self.state.query.view(&self.catalog)
    }

    fn outcome(&self, notification: Option<Notification>) -> ActionOutcome {
        ActionOutcome {
            view: self.view(),
            notification,
        }
    }

    /// Search title, description and tags. A blank term restores the
    /// selected category view and emits nothing.
    pub fn on_search(&mut self, term: &str) -> ActionOutcome {
        debug!("Search: {:?}", term);

        if term.trim().is_empty() {
            self.state.query.search_term.clear();
            return self.outcome(None);
        }

        self.state.query.search_term = term.to_string();
        let view = self.view();
        let notification = Notification::search(term, view.len());

        ActionOutcome {
            view,
            notification: Some(notification),
        }
    }

    /// Merge a filter update into the sticky filter state
    pub fn on_filter(&mut self, patch: impl Into<FilterPatch>) -> ActionOutcome {
        self.state.query.filter.apply(patch.into());
        debug!("Filter: {:?}", self.state.query.filter);

        let view = self.view();
        let notification = if self.state.query.filter.is_empty() {
            None
        } else {
            Some(Notification::filters_applied(view.len()))
        };

        ActionOutcome { view, notification }
    }

    /// Drop every filter constraint
    pub fn on_clear_filters(&mut self) -> ActionOutcome {
        self.on_filter(FilterPatch::clear_all())
    }

    /// Order the result view
    pub fn on_sort(&mut self, option: SortOption) -> ActionOutcome {
        debug!("Sort: {}", option);
        self.state.query.sort = Some(option);
        self.outcome(Some(Notification::sorted(option)))
    }

    /// Browse one category (or `all`). Clears the search term and filters;
    /// the sort option stays in effect.
    pub fn on_select_category(&mut self, category: &str) -> ActionOutcome {
        debug!("Category: {}", category);
        let query = &mut self.state.query;
        query.selected_category = category.to_string();
        query.search_term.clear();
        query.filter = FilterOptions::default();
        self.outcome(None)
    }

    /// Flip a favorite and persist the set
    pub fn on_toggle_favorite(&mut self, id: &str) -> Result<ActionOutcome, CatalogError> {
        let notification = match self.state.favorites.toggle(id) {
            ToggleOutcome::Added => Notification::favorited(),
            ToggleOutcome::Removed => Notification::unfavorited(),
        };
        self.state.favorites.save(self.store.as_mut())?;
        info!("{} {}", notification.title, id);

        Ok(self.outcome(Some(notification)))
    }

    /// Record a play and persist the history
    pub fn on_play(&mut self, game: &GameEntity) -> Result<ActionOutcome, CatalogError> {
        self.state.history.record_play(game);
        self.state.history.save(self.store.as_mut())?;
        info!("Playing {} ({})", game.title, game.id);

        Ok(self.outcome(Some(Notification::now_playing(&game.title))))
    }

    /// Play a uniformly random game from the full catalog
    pub fn on_random(&mut self) -> Result<ActionOutcome, CatalogError> {
        let game = self
            .catalog
            .all()
            .choose(&mut self.rng)
            .cloned()
            .ok_or(CatalogError::EmptyCatalog)?;

        debug!("Random pick: {}", game.id);
        self.on_play(&game)
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.state.favorites.contains(id)
    }

    /// Favorited games in catalog order; unknown ids are skipped
    pub fn favorites(&self) -> Vec<GameRef> {
        self.catalog
            .all()
            .iter()
            .filter(|g| self.state.favorites.contains(&g.id))
            .cloned()
            .collect()
    }

    /// Recently played games, most recent first
    pub fn recent(&self) -> Vec<GameRef> {
        self.state.history.current(&self.catalog)
    }

    /// Resolve a named collection
    pub fn collection(&self, collection: &Collection) -> Vec<GameRef> {
        match collection {
            Collection::All => self.catalog.all().to_vec(),
            Collection::Featured => self.catalog.featured(),
            Collection::Favorites => self.favorites(),
            Collection::RecentlyPlayed => self.recent(),
            Collection::Category(name) => query::in_category(self.catalog.all(), name),
        }
    }
}
