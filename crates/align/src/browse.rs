//! List view over a built artifact: search, sort, and keyboard selection.
//!
//! The visible list is a pure function of the correspondences and a
//! [`BrowseQuery`]; [`Selection`] is the only state and holds an id, never an
//! index, so it survives re-filtering.

use serde::{Deserialize, Serialize};

use crate::model::Correspondence;
use crate::natural::natural_cmp;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    #[default]
    Source,
    Target,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrowseQuery {
    pub search: String,
    pub sort_by: SortBy,
}

impl BrowseQuery {
    pub fn new(search: impl Into<String>, sort_by: SortBy) -> Self {
        Self { search: search.into(), sort_by }
    }
}

/// Correspondences whose source or target code contains the search text
/// (case-insensitive, trimmed), in natural order of the chosen code.
pub fn visible_correspondences<'a>(
    all: &'a [Correspondence],
    query: &BrowseQuery,
) -> Vec<&'a Correspondence> {
    let needle = query.search.trim().to_lowercase();

    let mut items: Vec<&Correspondence> = all
        .iter()
        .filter(|c| {
            needle.is_empty()
                || c.source.code.to_lowercase().contains(&needle)
                || c.target.code.to_lowercase().contains(&needle)
        })
        .collect();

    items.sort_by(|a, b| match query.sort_by {
        SortBy::Source => natural_cmp(&a.source.code, &b.source.code),
        SortBy::Target => natural_cmp(&a.target.code, &b.target.code),
    });
    items
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    selected_id: Option<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected_id.as_deref()
    }

    pub fn select(&mut self, id: impl Into<String>) {
        self.selected_id = Some(id.into());
    }

    /// Resolve the selection against the full collection, ignoring filters.
    pub fn selected<'a>(&self, all: &'a [Correspondence]) -> Option<&'a Correspondence> {
        let id = self.selected_id.as_deref()?;
        all.iter().find(|c| c.id == id)
    }

    /// Move one step through `visible`, clamping at both ends. With nothing
    /// selected, or a selection that is filtered out, jumps to the first item.
    /// An empty list leaves the selection untouched.
    pub fn navigate(&mut self, direction: Direction, visible: &[&Correspondence]) {
        let Some(first) = visible.first() else {
            return;
        };

        let current = self
            .selected_id
            .as_deref()
            .and_then(|id| visible.iter().position(|c| c.id == id));

        let next = match (current, direction) {
            (None, _) => *first,
            (Some(idx), Direction::Up) => visible[idx.saturating_sub(1)],
            (Some(idx), Direction::Down) => visible[(idx + 1).min(visible.len() - 1)],
        };
        self.selected_id = Some(next.id.clone());
    }
}
