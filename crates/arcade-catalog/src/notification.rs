//! Notification events returned to the UI layer

use crate::SortOption;
use serde::Serialize;
use std::fmt;

/// What kind of outcome a notification reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    SearchResults,
    NoResults,
    FiltersApplied,
    Sorted,
    Favorited,
    Unfavorited,
    NowPlaying,
}

/// A (title, description) pair describing an action's outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub description: String,
}

impl Notification {
    fn new(kind: NotificationKind, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            description: description.into(),
        }
    }

    pub(crate) fn search(term: &str, found: usize) -> Self {
        if found == 0 {
            Self::new(
                NotificationKind::NoResults,
                "No games found",
                format!("No games match \"{}\"", term),
            )
        } else {
            Self::new(
                NotificationKind::SearchResults,
                "Search results",
                format!("Found {} games matching \"{}\"", found, term),
            )
        }
    }

    pub(crate) fn filters_applied(shown: usize) -> Self {
        Self::new(
            NotificationKind::FiltersApplied,
            "Filters applied",
            format!("Showing {} filtered games", shown),
        )
    }

    pub(crate) fn sorted(option: SortOption) -> Self {
        Self::new(
            NotificationKind::Sorted,
            "Games sorted",
            format!("Sorted by {}", option.label()),
        )
    }

    pub(crate) fn favorited() -> Self {
        Self::new(
            NotificationKind::Favorited,
            "Added to favorites",
            "Game added to your favorites list",
        )
    }

    pub(crate) fn unfavorited() -> Self {
        Self::new(
            NotificationKind::Unfavorited,
            "Removed from favorites",
            "Game removed from your favorites list",
        )
    }

    pub(crate) fn now_playing(title: &str) -> Self {
        Self::new(
            NotificationKind::NowPlaying,
            format!("Now Playing: {}", title),
            "Game launched in fullscreen mode",
        )
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.description)
    }
}
