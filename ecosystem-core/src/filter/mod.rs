//! Tag filtering
//!
//! Decides which crates are visible for a given set of active tag filters.
//!
//! # Semantics
//!
//! - No active filters: every crate is visible.
//! - One or more active filters: a crate is visible when it carries at least
//!   one of them (inclusive OR, not AND).
//!
//! Visibility is never stored. It is recomputed from the crate's tags and the
//! current [`ActiveFilters`] whenever it is needed.

mod view;

pub use view::{CatalogView, FilterEvent, TagControl, VisibilityDelta};

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Separator used when a tag list travels as a single attribute string
pub const TAG_ATTRIBUTE_SEPARATOR: char = ',';

/// The set of tags the user currently filters by
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActiveFilters {
    tags: BTreeSet<String>,
}

impl ActiveFilters {
    /// Create an empty filter set (everything visible)
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the tag if absent, remove it if present.
    ///
    /// Returns whether the tag is active afterwards.
    pub fn toggle(&mut self, tag: &str) -> bool {
        if self.tags.remove(tag) {
            false
        } else {
            self.tags.insert(tag.to_string());
            true
        }
    }

    /// Activate the tag. Never deactivates.
    ///
    /// Returns `true` if the set changed.
    pub fn set(&mut self, tag: &str) -> bool {
        if self.tags.contains(tag) {
            return false;
        }
        self.tags.insert(tag.to_string())
    }

    /// Deactivate every filter
    pub fn clear(&mut self) {
        self.tags.clear();
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Iterates active tags in sorted order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    /// Whether a crate carrying `package_tags` passes these filters
    pub fn admits<I, S>(&self, package_tags: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        is_visible(package_tags, self)
    }
}

impl<S: Into<String>> FromIterator<S> for ActiveFilters {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self {
            tags: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<S: Into<String>> Extend<S> for ActiveFilters {
    fn extend<T: IntoIterator<Item = S>>(&mut self, iter: T) {
        self.tags.extend(iter.into_iter().map(Into::into));
    }
}

/// Decide whether a crate with `package_tags` is visible under `active_filters`.
///
/// Total over its inputs: empty tag lists and empty filter sets are fine.
pub fn is_visible<I, S>(package_tags: I, active_filters: &ActiveFilters) -> bool
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    if active_filters.is_empty() {
        return true;
    }

    package_tags
        .into_iter()
        .any(|tag| active_filters.contains(tag.as_ref()))
}

/// Parse a comma-separated tag attribute (e.g. `"async, http"`).
///
/// Pieces are trimmed and empty pieces dropped, so `""` is the empty list.
pub fn parse_tag_attribute(attribute: &str) -> Vec<String> {
    attribute
        .split(TAG_ATTRIBUTE_SEPARATOR)
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// Join tags into a single attribute string
pub fn tag_attribute<I, S>(tags: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();
    for (i, tag) in tags.into_iter().enumerate() {
        if i > 0 {
            out.push(TAG_ATTRIBUTE_SEPARATOR);
        }
        out.push_str(tag.as_ref());
    }
    out
}

#[cfg(test)]
mod filter_tests {
    use super::*;

    fn filters(tags: &[&str]) -> ActiveFilters {
        tags.iter().copied().collect()
    }

    #[test]
    fn test_no_filters_shows_everything() {
        assert!(is_visible(["async", "http"], &ActiveFilters::new()));
        assert!(is_visible(Vec::<String>::new(), &ActiveFilters::new()));
    }

    #[test]
    fn test_disjoint_filter_hides() {
        assert!(!is_visible(["async", "http"], &filters(&["cli"])));
    }

    #[test]
    fn test_any_shared_tag_shows() {
        assert!(is_visible(["async", "http"], &filters(&["http", "cli"])));
    }

    #[test]
    fn test_untagged_crate_hidden_once_filtering() {
        assert!(!is_visible(Vec::<&str>::new(), &filters(&["cli"])));
    }

    #[test]
    fn test_tags_compared_exactly() {
        assert!(!is_visible(["CLI"], &filters(&["cli"])));
    }

    #[test]
    fn test_toggle() {
        let mut active = ActiveFilters::new();
        assert!(active.toggle("cli"));
        assert_eq!(active, filters(&["cli"]));

        assert!(!active.toggle("cli"));
        assert!(active.is_empty());
    }

    #[test]
    fn test_set_never_removes() {
        let mut active = filters(&["cli"]);
        assert!(!active.set("cli"));
        assert_eq!(active, filters(&["cli"]));

        assert!(active.set("gui"));
        assert_eq!(active.iter().collect::<Vec<_>>(), vec!["cli", "gui"]);
    }

    #[test]
    fn test_clear() {
        let mut active = filters(&["cli", "gui"]);
        active.clear();
        assert!(active.is_empty());
        assert!(active.admits(["anything"]));
    }

    #[test]
    fn test_parse_tag_attribute() {
        assert_eq!(parse_tag_attribute("async, http"), vec!["async", "http"]);
        assert_eq!(parse_tag_attribute(" gui ,,cli "), vec!["gui", "cli"]);
        assert!(parse_tag_attribute("").is_empty());
        assert!(parse_tag_attribute(" , ").is_empty());
    }

    #[test]
    fn test_tag_attribute() {
        assert_eq!(tag_attribute(["async", "http"]), "async,http");
        assert_eq!(tag_attribute(Vec::<String>::new()), "");
    }

    #[test]
    fn test_serializes_as_plain_list() {
        let active = filters(&["http", "async"]);
        let json = serde_json::to_string(&active).unwrap();
        assert_eq!(json, r#"["async","http"]"#);
    }
}
