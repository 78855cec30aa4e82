//! Ecosystem catalog library exports

pub mod catalog;
pub mod config;
pub mod error;
pub mod filter;

pub use error::{CatalogError, Result};
