//! Filter state for one browsing session
//!
//! [`CatalogView`] owns the active filters and borrows the loaded catalog.
//! Every filter event goes through [`CatalogView::apply`], which reports
//! which cards changed visibility so a front end only touches those.

use serde::Serialize;
use std::collections::BTreeSet;

use super::{is_visible, ActiveFilters};
use crate::catalog::{Catalog, CrateEntry, TagRegistry};

/// A user interaction on the filter controls
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterEvent {
    /// Flip one tag filter
    Toggle(String),
    /// Activate one tag filter (no-op if already active)
    Set(String),
    /// Drop every filter
    Clear,
}

/// Cards whose visibility changed after an event, in name order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VisibilityDelta {
    pub hidden: Vec<String>,
    pub shown: Vec<String>,
}

impl VisibilityDelta {
    pub fn is_empty(&self) -> bool {
        self.hidden.is_empty() && self.shown.is_empty()
    }
}

/// One filter control: a tag plus its active marker
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagControl<'a> {
    pub tag: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
    pub count: usize,
    pub active: bool,
}

/// A catalog seen through the current filters
#[derive(Debug, Clone)]
pub struct CatalogView<'a> {
    catalog: &'a Catalog,
    filters: ActiveFilters,
}

impl<'a> CatalogView<'a> {
    /// Start with no filters (everything visible)
    pub fn new(catalog: &'a Catalog) -> Self {
        Self::with_filters(catalog, ActiveFilters::new())
    }

    pub fn with_filters(catalog: &'a Catalog, filters: ActiveFilters) -> Self {
        Self { catalog, filters }
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    pub fn filters(&self) -> &ActiveFilters {
        &self.filters
    }

    /// Apply one event and report the cards that changed visibility
    pub fn apply(&mut self, event: FilterEvent) -> VisibilityDelta {
        let before = self.visible_names();

        match &event {
            FilterEvent::Toggle(tag) => {
                let active = self.filters.toggle(tag);
                tracing::debug!("Toggled filter '{}' (active: {})", tag, active);
                if active {
                    self.note_unused(tag);
                }
            }
            FilterEvent::Set(tag) => {
                if self.filters.set(tag) {
                    tracing::debug!("Set filter '{}'", tag);
                    self.note_unused(tag);
                }
            }
            FilterEvent::Clear => {
                tracing::debug!("Cleared {} filter(s)", self.filters.len());
                self.filters.clear();
            }
        }

        let after = self.visible_names();
        VisibilityDelta {
            hidden: before.difference(&after).map(|s| s.to_string()).collect(),
            shown: after.difference(&before).map(|s| s.to_string()).collect(),
        }
    }

    /// Whether the named crate is visible; `None` if it is not in the catalog
    pub fn is_entry_visible(&self, name: &str) -> Option<bool> {
        self.catalog
            .get(name)
            .map(|entry| is_visible(&entry.tags, &self.filters))
    }

    /// Visible entries in name order
    pub fn visible(&self) -> impl Iterator<Item = &'a CrateEntry> + '_ {
        self.catalog
            .entries()
            .filter(move |entry| is_visible(&entry.tags, &self.filters))
    }

    /// Hidden entries in name order
    pub fn hidden(&self) -> impl Iterator<Item = &'a CrateEntry> + '_ {
        self.catalog
            .entries()
            .filter(move |entry| !is_visible(&entry.tags, &self.filters))
    }

    pub fn visible_count(&self) -> usize {
        self.visible().count()
    }

    /// One control per registry tag, in tag order
    pub fn tag_controls<'r>(&self, registry: &'r TagRegistry) -> Vec<TagControl<'r>> {
        let counts = self.catalog.tag_counts();
        registry
            .tags()
            .map(|tag| TagControl {
                tag,
                description: registry.description(tag),
                count: counts.get(tag).copied().unwrap_or(0),
                active: self.filters.contains(tag),
            })
            .collect()
    }

    fn visible_names(&self) -> BTreeSet<&'a str> {
        self.visible().map(|entry| entry.name.as_str()).collect()
    }

    fn note_unused(&self, tag: &str) {
        if !self.catalog.uses_tag(tag) {
            tracing::debug!("Filter '{}' matches no crate in the catalog", tag);
        }
    }
}
