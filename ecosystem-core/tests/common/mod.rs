//! Test helper functions for integration tests
//!
//! Shared across the integration test files using the tests/common/ pattern.

#![allow(dead_code)]

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Once;

/// Initialize logging for tests (only once per test run)
static INIT: Once = Once::new();

pub fn init_test_logging() {
    INIT.call_once(|| {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let _ = tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_test_writer()
                    .with_target(true)
                    .with_level(true),
            )
            .with(tracing_subscriber::filter::EnvFilter::from_default_env())
            .try_init();
    });
}

/// A small catalog covering tagged, untagged and linked crates
pub const SAMPLE_CATALOG: &str = r#"{
  "iced": {
    "description": "A cross-platform GUI library inspired by Elm",
    "tags": ["gui", "elm"],
    "crates_io": "https://crates.io/crates/iced",
    "repo": "https://github.com/iced-rs/iced",
    "docs": "https://docs.rs/iced"
  },
  "druid": {
    "description": "Data-first Rust-native UI toolkit",
    "tags": ["gui"],
    "repo": "https://github.com/linebender/druid"
  },
  "reqwest": {
    "description": "Higher level HTTP client",
    "tags": ["async", "http"]
  },
  "clap": {
    "description": "Command line argument parser",
    "tags": ["cli"]
  },
  "anyhow": {
    "description": "Flexible concrete error type"
  }
}"#;

/// Tag descriptions, including one tag no sample crate uses
pub const SAMPLE_TAGS: &str = r#"{
  "gui": "Graphical user interfaces",
  "cli": "Command line tools",
  "web": "Runs in the browser"
}"#;

/// Write `content` to `name` inside `dir` and return the path
pub fn write_document(dir: &Path, name: &str, content: &str) -> Result<PathBuf> {
    let path = dir.join(name);
    fs::write(&path, content)?;
    Ok(path)
}
