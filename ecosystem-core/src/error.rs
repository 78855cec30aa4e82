//! Catalog loading error types with clear, actionable messages

use thiserror::Error;

/// Errors raised at the catalog load boundary.
///
/// Filtering itself never fails; only reading, parsing and validating the
/// catalog (or the tag description document) can.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The document could not be read or fetched
    #[error("Catalog unavailable from {location}: {reason}")]
    Unavailable { location: String, reason: String },

    /// The document is not valid JSON of the expected shape
    #[error("Failed to parse catalog document from {location}")]
    Parse {
        location: String,
        #[source]
        source: serde_json::Error,
    },

    /// A crate record failed validation
    #[error("Invalid catalog entry '{name}': {reason}")]
    InvalidEntry { name: String, reason: String },

    /// A tag description key failed validation
    #[error("Invalid tag '{tag}': {reason}")]
    InvalidTag { tag: String, reason: String },

    /// A URL location was given but HTTP support was not compiled in
    #[error("Cannot fetch {location}: remote catalogs are not enabled. Rebuild with --features fetch")]
    FetchDisabled { location: String },
}

pub type Result<T> = std::result::Result<T, CatalogError>;

impl CatalogError {
    pub(crate) fn unavailable(location: impl Into<String>, reason: impl ToString) -> Self {
        CatalogError::Unavailable {
            location: location.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn invalid_entry(name: &str, reason: impl Into<String>) -> Self {
        CatalogError::InvalidEntry {
            name: name.to_string(),
            reason: reason.into(),
        }
    }

    /// Whether this error means the catalog could not be obtained at all,
    /// as opposed to being obtained and rejected.
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            CatalogError::Unavailable { .. } | CatalogError::FetchDisabled { .. }
        )
    }
}
