//! Crate records as they appear in the catalog document

use serde::{Deserialize, Serialize};

use super::source::has_http_scheme;
use crate::error::{CatalogError, Result};
use crate::filter::TAG_ATTRIBUTE_SEPARATOR;

/// One crate in the catalog.
///
/// The name is the key of the record in the catalog document, so it is not
/// part of the serialized record itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CrateEntry {
    /// Crate name (unique within the catalog)
    #[serde(skip)]
    pub name: String,

    /// Short description shown on the card
    pub description: String,

    /// Tags in declaration order, without duplicates
    #[serde(default)]
    pub tags: Vec<String>,

    /// crates.io page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crates_io: Option<String>,

    /// Source repository
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,

    /// API documentation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docs: Option<String>,
}

/// Which metadata link a URL is
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    Crate,
    Repo,
    Docs,
}

impl LinkKind {
    /// Label shown on the card
    pub fn label(&self) -> &'static str {
        match self {
            LinkKind::Crate => "crate",
            LinkKind::Repo => "repo",
            LinkKind::Docs => "docs",
        }
    }
}

/// A labeled metadata link
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetaLink<'a> {
    #[serde(rename = "label")]
    pub kind: LinkKind,
    pub url: &'a str,
}

impl CrateEntry {
    /// Build an entry with no links
    pub fn new(name: &str, description: &str, tags: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            crates_io: None,
            repo: None,
            docs: None,
        }
    }

    /// Metadata links in display order: crate, repo, docs
    pub fn links(&self) -> Vec<MetaLink<'_>> {
        [
            (LinkKind::Crate, &self.crates_io),
            (LinkKind::Repo, &self.repo),
            (LinkKind::Docs, &self.docs),
        ]
        .into_iter()
        .filter_map(|(kind, url)| url.as_deref().map(|url| MetaLink { kind, url }))
        .collect()
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Truncate description to first line
    pub fn short_description(&self) -> &str {
        self.description
            .lines()
            .next()
            .unwrap_or(&self.description)
            .trim()
    }

    /// Check the record and normalize its tags in place.
    ///
    /// Tags are trimmed and duplicates collapsed (first occurrence wins).
    pub(crate) fn validate(&mut self) -> Result<()> {
        validate_name(&self.name)?;

        let mut tags: Vec<String> = Vec::with_capacity(self.tags.len());
        for raw in &self.tags {
            let tag = raw.trim();
            if let Err(reason) = check_tag(tag) {
                return Err(CatalogError::invalid_entry(
                    &self.name,
                    format!("tag {raw:?} {reason}"),
                ));
            }
            if tags.iter().any(|t| t == tag) {
                tracing::debug!("Dropping duplicate tag '{}' on {}", tag, self.name);
                continue;
            }
            tags.push(tag.to_string());
        }
        self.tags = tags;

        for link in self.links() {
            if !has_http_scheme(link.url) {
                return Err(CatalogError::invalid_entry(
                    &self.name,
                    format!(
                        "{} link must start with http:// or https://, got '{}'",
                        link.kind.label(),
                        link.url
                    ),
                ));
            }
        }

        Ok(())
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(CatalogError::invalid_entry(name, "crate name is required"));
    }

    if name
        .chars()
        .any(|c| c.is_whitespace() || c == TAG_ATTRIBUTE_SEPARATOR)
    {
        return Err(CatalogError::invalid_entry(
            name,
            "crate name must not contain whitespace or commas",
        ));
    }

    Ok(())
}

/// Reasons a (trimmed) tag cannot be used
pub(crate) fn check_tag(tag: &str) -> std::result::Result<(), &'static str> {
    if tag.is_empty() {
        return Err("must not be empty");
    }
    if tag.contains(TAG_ATTRIBUTE_SEPARATOR) {
        return Err("must not contain a comma");
    }
    Ok(())
}
