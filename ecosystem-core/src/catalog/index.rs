//! Catalog document parsing and lookup
//!
//! The catalog document is a JSON object mapping crate names to records
//! (see [`CrateEntry`]). Records are validated once here, at the load
//! boundary, and are read-only afterwards.

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;

use super::CrateEntry;
use crate::error::{CatalogError, Result};

/// All crates in the catalog, keyed by name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: BTreeMap<String, CrateEntry>,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a catalog document.
    ///
    /// `location` is only used in error messages.
    pub fn from_json(content: &str, location: &str) -> Result<Self> {
        let raw: DocumentEntries<CrateEntry> =
            serde_json::from_str(content).map_err(|source| CatalogError::Parse {
                location: location.to_string(),
                source,
            })?;

        let mut catalog = Catalog::new();
        for (name, mut entry) in raw.0 {
            entry.name = name;
            catalog.insert(entry)?;
        }

        tracing::debug!(
            "Parsed catalog from {}: {} crates, {} tags",
            location,
            catalog.len(),
            catalog.tag_counts().len()
        );
        Ok(catalog)
    }

    /// Serialize to a pretty-printed catalog document
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Validate and add an entry. Names must be unique.
    pub fn insert(&mut self, mut entry: CrateEntry) -> Result<()> {
        entry.validate()?;
        if self.entries.contains_key(&entry.name) {
            return Err(CatalogError::invalid_entry(
                &entry.name,
                "duplicate crate name",
            ));
        }
        self.entries.insert(entry.name.clone(), entry);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&CrateEntry> {
        self.entries.get(name)
    }

    /// Iterates entries in name order
    pub fn entries(&self) -> impl Iterator<Item = &CrateEntry> {
        self.entries.values()
    }

    /// Iterates crate names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every tag used by at least one crate, with the number of crates using it
    pub fn tag_counts(&self) -> BTreeMap<&str, usize> {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for entry in self.entries.values() {
            for tag in &entry.tags {
                *counts.entry(tag.as_str()).or_default() += 1;
            }
        }
        counts
    }

    /// Whether any crate carries the tag
    pub fn uses_tag(&self, tag: &str) -> bool {
        self.entries.values().any(|entry| entry.has_tag(tag))
    }
}

impl Serialize for Catalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.entries.serialize(serializer)
    }
}

/// Keys and values of a top-level JSON object in document order.
///
/// Repeated keys are kept so callers can reject them instead of letting the
/// last one win.
pub(super) struct DocumentEntries<V>(pub(super) Vec<(String, V)>);

impl<'de, V: Deserialize<'de>> Deserialize<'de> for DocumentEntries<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct EntriesVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for EntriesVisitor<V> {
            type Value = DocumentEntries<V>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a JSON object keyed by name")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut map: A,
            ) -> std::result::Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, value)) = map.next_entry::<String, V>()? {
                    entries.push((key, value));
                }
                Ok(DocumentEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor(PhantomData))
    }
}
