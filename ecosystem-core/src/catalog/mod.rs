//! Ecosystem catalog - crate records and how they are loaded
//!
//! # Overview
//!
//! The catalog is a pre-built JSON document describing each crate: its
//! description, tags and metadata links. It is loaded once, validated, and
//! read-only afterwards.
//!
//! # Architecture
//!
//! ```text
//! ecosystem.json ──┐               ecosystem_tags.json (optional)
//!   (file or URL)  │                        │
//!                  ▼                        ▼
//!            CatalogSource ──► Catalog ──► TagRegistry
//!                                 │
//!                                 ▼
//!                        Card (one per crate)
//! ```

mod card;
mod entry;
mod index;
mod source;
mod tags;

pub use card::{Card, META_LINK_SEPARATOR};
pub use entry::{CrateEntry, LinkKind, MetaLink};
pub use index::Catalog;
#[cfg(feature = "fetch")]
pub use source::HttpSource;
pub use source::{load_catalog, load_tag_registry, CatalogSource, FileSource, Location};
pub use tags::TagRegistry;
