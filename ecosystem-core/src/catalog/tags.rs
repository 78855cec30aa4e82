//! Tag descriptions
//!
//! An optional JSON document maps tags to a human readable description
//! (or `null`). The registry merges it with the tags the catalog actually
//! uses, so every used tag is present even when nobody described it.

use std::collections::BTreeMap;

use super::entry::check_tag;
use super::index::DocumentEntries;
use super::Catalog;
use crate::error::{CatalogError, Result};

/// Tags known to the catalog, with optional descriptions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagRegistry {
    tags: BTreeMap<String, Option<String>>,
}

impl TagRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a tag description document (`{"tag": "description" | null}`)
    pub fn from_json(content: &str, location: &str) -> Result<Self> {
        let raw: DocumentEntries<Option<String>> =
            serde_json::from_str(content).map_err(|source| CatalogError::Parse {
                location: location.to_string(),
                source,
            })?;

        let mut tags: BTreeMap<String, Option<String>> = BTreeMap::new();
        for (tag, description) in raw.0 {
            let trimmed = tag.trim();
            if let Err(reason) = check_tag(trimmed) {
                return Err(CatalogError::InvalidTag {
                    tag,
                    reason: reason.to_string(),
                });
            }
            if tags.contains_key(trimmed) {
                return Err(CatalogError::InvalidTag {
                    tag,
                    reason: "described more than once".to_string(),
                });
            }
            let description = description
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty());
            tags.insert(trimmed.to_string(), description);
        }

        Ok(Self { tags })
    }

    /// Build a registry holding exactly the tags the catalog uses
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let mut registry = Self::new();
        registry.merge_used(catalog);
        registry
    }

    /// Add every tag the catalog uses that is not yet described.
    ///
    /// Returns the described tags no crate uses; each one is logged as a
    /// warning since it usually means a typo in either document.
    pub fn merge_used(&mut self, catalog: &Catalog) -> Vec<String> {
        let used = catalog.tag_counts();

        let unused: Vec<String> = self
            .tags
            .keys()
            .filter(|tag| !used.contains_key(tag.as_str()))
            .cloned()
            .collect();
        for tag in &unused {
            tracing::warn!("Tag \"{}\" is not used to describe any crate", tag);
        }

        for tag in used.keys() {
            self.tags.entry(tag.to_string()).or_insert(None);
        }

        unused
    }

    pub fn description(&self, tag: &str) -> Option<&str> {
        self.tags.get(tag).and_then(|d| d.as_deref())
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.contains_key(tag)
    }

    /// Iterates tags in sorted order
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.tags.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

#[cfg(test)]
mod tags_tests {
    use super::*;
    use crate::catalog::CrateEntry;

    fn catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog
            .insert(CrateEntry::new("iced", "GUI library", &["gui", "elm"]))
            .unwrap();
        catalog
            .insert(CrateEntry::new("clap", "Argument parser", &["cli"]))
            .unwrap();
        catalog
    }

    #[test]
    fn test_parse_descriptions() {
        let registry = TagRegistry::from_json(
            r#"{"gui": "Graphical user interfaces", "cli": null, "elm": "  "}"#,
            "tags.json",
        )
        .unwrap();
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.description("gui"), Some("Graphical user interfaces"));
        assert_eq!(registry.description("cli"), None);
        assert_eq!(registry.description("elm"), None);
    }

    #[test]
    fn test_rejects_comma_tag() {
        let err = TagRegistry::from_json(r#"{"gui,cli": null}"#, "tags.json").unwrap_err();
        assert!(matches!(err, CatalogError::InvalidTag { .. }));
    }

    #[test]
    fn test_rejects_tag_described_twice() {
        let err = TagRegistry::from_json(
            r#"{" gui": "Graphical", "gui": "Windows and widgets"}"#,
            "tags.json",
        )
        .unwrap_err();
        match err {
            CatalogError::InvalidTag { tag, reason } => {
                assert_eq!(tag, "gui");
                assert_eq!(reason, "described more than once");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_merge_used_reports_unused() {
        let mut registry =
            TagRegistry::from_json(r#"{"gui": "Graphical", "web": "Browsers"}"#, "tags.json")
                .unwrap();
        let unused = registry.merge_used(&catalog());

        assert_eq!(unused, vec!["web".to_string()]);
        assert_eq!(
            registry.tags().collect::<Vec<_>>(),
            vec!["cli", "elm", "gui", "web"]
        );
        assert_eq!(registry.description("gui"), Some("Graphical"));
    }

    #[test]
    fn test_from_catalog() {
        let registry = TagRegistry::from_catalog(&catalog());
        assert_eq!(registry.tags().collect::<Vec<_>>(), vec!["cli", "elm", "gui"]);
        assert!(registry.description("gui").is_none());
    }
}
