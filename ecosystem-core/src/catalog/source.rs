//! Where catalog documents come from
//!
//! A document is read once, as a single asynchronous step. There is no
//! caching, retry or cancellation: a failed read surfaces as
//! [`CatalogError::Unavailable`] and the caller decides what to show.

use async_trait::async_trait;
use std::path::PathBuf;

use super::{Catalog, TagRegistry};
use crate::config::FetchConfig;
use crate::error::{CatalogError, Result};

/// Something that can produce the text of a catalog document
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Human readable location used in messages
    fn location(&self) -> String;

    /// Read the whole document
    async fn read(&self) -> Result<String>;
}

/// A parsed document location
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    File(PathBuf),
    Url(String),
}

impl Location {
    /// `http://` and `https://` locations are URLs, everything else is a path
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if has_http_scheme(trimmed) {
            Location::Url(trimmed.to_string())
        } else {
            Location::File(PathBuf::from(trimmed))
        }
    }

    /// Build the source able to read this location
    pub fn into_source(self, fetch: &FetchConfig) -> Result<Box<dyn CatalogSource>> {
        match self {
            Location::File(path) => Ok(Box::new(FileSource::new(path))),
            Location::Url(url) => http_source(url, fetch),
        }
    }
}

/// Whether `url` starts with `http://` or `https://`, ignoring ASCII case
pub(crate) fn has_http_scheme(url: &str) -> bool {
    ["http://", "https://"].iter().any(|scheme| {
        url.get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}

#[cfg(feature = "fetch")]
fn http_source(url: String, fetch: &FetchConfig) -> Result<Box<dyn CatalogSource>> {
    Ok(Box::new(HttpSource::new(url, fetch)?))
}

#[cfg(not(feature = "fetch"))]
fn http_source(url: String, _fetch: &FetchConfig) -> Result<Box<dyn CatalogSource>> {
    Err(CatalogError::FetchDisabled { location: url })
}

/// Reads a document from the local filesystem
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CatalogSource for FileSource {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    async fn read(&self) -> Result<String> {
        tracing::debug!("Reading catalog document from {}", self.path.display());
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| CatalogError::unavailable(self.location(), e))
    }
}

/// Fetches a document over HTTP(S)
#[cfg(feature = "fetch")]
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
    client: reqwest::Client,
}

#[cfg(feature = "fetch")]
impl HttpSource {
    pub fn new(url: impl Into<String>, fetch: &FetchConfig) -> Result<Self> {
        let url = url.into();
        let client = reqwest::Client::builder()
            .user_agent(fetch.user_agent())
            .timeout(fetch.timeout())
            .build()
            .map_err(|e| CatalogError::unavailable(url.clone(), e))?;
        Ok(Self { url, client })
    }
}

#[cfg(feature = "fetch")]
#[async_trait]
impl CatalogSource for HttpSource {
    fn location(&self) -> String {
        self.url.clone()
    }

    async fn read(&self) -> Result<String> {
        tracing::debug!("Fetching catalog document from {}", self.url);
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| CatalogError::unavailable(self.location(), e))?;

        if !response.status().is_success() {
            return Err(CatalogError::unavailable(
                self.location(),
                format!("HTTP {}", response.status()),
            ));
        }

        response
            .text()
            .await
            .map_err(|e| CatalogError::unavailable(self.location(), e))
    }
}

/// Load and validate the catalog from a source
pub async fn load_catalog(source: &dyn CatalogSource) -> Result<Catalog> {
    let location = source.location();
    let content = source.read().await?;
    let catalog = Catalog::from_json(&content, &location)?;
    tracing::info!("Loaded {} crates from {}", catalog.len(), location);
    Ok(catalog)
}

/// Load the tag description document from a source
pub async fn load_tag_registry(source: &dyn CatalogSource) -> Result<TagRegistry> {
    let location = source.location();
    let content = source.read().await?;
    TagRegistry::from_json(&content, &location)
}
