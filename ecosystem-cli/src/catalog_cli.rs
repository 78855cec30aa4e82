//! Catalog commands
//!
//! Provides commands for listing, inspecting and filtering the crates in the
//! ecosystem catalog.

use anyhow::{Context, Result};
use clap::Subcommand;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

use ecosystem_core::catalog::{load_catalog, load_tag_registry, Card, Catalog, TagRegistry};
use ecosystem_core::config::Config;
use ecosystem_core::filter::{CatalogView, FilterEvent};

use crate::browse;

/// Longest description shown in tables
const MAX_DESCRIPTION_CHARS: usize = 50;

#[derive(Subcommand, Debug)]
pub enum CatalogSubcommand {
    /// List crates, optionally filtered by tag
    List {
        /// Only show crates carrying at least one of these tags (repeatable or comma-separated)
        #[clap(long = "tag", value_delimiter = ',')]
        tags: Vec<String>,

        /// Output results as JSON
        #[clap(long)]
        json: bool,
    },

    /// Show detailed information about a crate
    Show {
        /// Crate name
        name: String,

        /// Output as JSON
        #[clap(long)]
        json: bool,
    },

    /// List the tags available as filters
    Tags {
        /// Output as JSON
        #[clap(long)]
        json: bool,
    },

    /// Interactively toggle tag filters (reads commands from stdin)
    Browse {
        /// Filters active when the session starts
        #[clap(long = "tag", value_delimiter = ',')]
        tags: Vec<String>,
    },
}

impl CatalogSubcommand {
    pub async fn execute(self, config: &Config) -> Result<()> {
        let loaded = LoadedCatalog::load(config).await?;

        match self {
            CatalogSubcommand::List { tags, json } => execute_list(&loaded, &tags, json),
            CatalogSubcommand::Show { name, json } => execute_show(&loaded, &name, json),
            CatalogSubcommand::Tags { json } => execute_tags(&loaded, json),
            CatalogSubcommand::Browse { tags } => {
                let mut view = view_with_filters(&loaded.catalog, &tags);
                let stdin = tokio::io::BufReader::new(tokio::io::stdin());
                let mut stdout = std::io::stdout();
                browse::run_session(&mut view, &loaded.registry, stdin, &mut stdout).await
            }
        }
    }
}

/// The catalog plus the tags offered as filter controls
pub struct LoadedCatalog {
    pub catalog: Catalog,
    pub registry: TagRegistry,
}

impl LoadedCatalog {
    /// Load the catalog and, when configured, the tag descriptions
    pub async fn load(config: &Config) -> Result<Self> {
        let source = config.catalog_location().into_source(&config.fetch)?;
        let catalog = load_catalog(source.as_ref())
            .await
            .with_context(|| format!("Could not load the catalog from {}", config.catalog))?;

        let registry = match config.tags_location() {
            Some(location) => {
                let source = location.into_source(&config.fetch)?;
                let mut registry = load_tag_registry(source.as_ref())
                    .await
                    .context("Could not load tag descriptions")?;
                registry.merge_used(&catalog);
                registry
            }
            None => TagRegistry::from_catalog(&catalog),
        };

        Ok(Self { catalog, registry })
    }
}

/// Build a view with each tag set as a filter
pub fn view_with_filters<'a>(catalog: &'a Catalog, tags: &[String]) -> CatalogView<'a> {
    let mut view = CatalogView::new(catalog);
    for tag in tags.iter().map(|t| t.trim()).filter(|t| !t.is_empty()) {
        view.apply(FilterEvent::Set(tag.to_string()));
    }
    view
}

/// Shorten a description for table display
pub fn truncate_description(description: &str) -> String {
    if description.chars().count() > MAX_DESCRIPTION_CHARS {
        let head: String = description
            .chars()
            .take(MAX_DESCRIPTION_CHARS - 3)
            .collect();
        format!("{}...", head.trim_end())
    } else {
        description.to_string()
    }
}

/// Table row for crate listings
#[derive(Tabled)]
struct CrateRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Tags")]
    tags: String,
    #[tabled(rename = "Links")]
    links: String,
    #[tabled(rename = "Description")]
    description: String,
}

fn execute_list(loaded: &LoadedCatalog, tags: &[String], json_output: bool) -> Result<()> {
    let view = view_with_filters(&loaded.catalog, tags);
    let cards: Vec<Card> = view.visible().map(Card::from).collect();

    if json_output {
        println!("{}", serde_json::to_string_pretty(&cards)?);
        return Ok(());
    }

    if cards.is_empty() {
        println!("No crates match the active filters.");
        return Ok(());
    }

    if view.filters().is_empty() {
        println!("Found {} crate(s):\n", cards.len());
    } else {
        println!(
            "Found {} of {} crate(s) tagged {}:\n",
            cards.len(),
            loaded.catalog.len(),
            view.filters().iter().collect::<Vec<_>>().join(" or ")
        );
    }

    let table_rows: Vec<CrateRow> = cards
        .iter()
        .map(|card| CrateRow {
            name: card.name.to_string(),
            tags: card.tags.join(", "),
            links: card.meta_line(),
            description: truncate_description(
                card.description.lines().next().unwrap_or_default().trim(),
            ),
        })
        .collect();

    let table = Table::new(&table_rows)
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()))
        .to_string();

    println!("{table}");

    Ok(())
}

fn execute_show(loaded: &LoadedCatalog, name: &str, json_output: bool) -> Result<()> {
    let entry = loaded
        .catalog
        .get(name)
        .with_context(|| format!("Crate '{name}' not found in catalog"))?;
    let card = Card::from(entry);

    if json_output {
        println!("{}", serde_json::to_string_pretty(&card)?);
        return Ok(());
    }

    println!("Crate: {}", card.name);
    println!("Links: {}", card.meta_line());
    for link in &card.links {
        println!("  {}: {}", link.kind.label(), link.url);
    }

    if !card.tags.is_empty() {
        println!("Tags:  {}", card.tags.join(", "));
    }

    println!();
    println!("Description:");
    for line in card.description.lines() {
        println!("  {line}");
    }

    Ok(())
}

/// Table row for tag listings
#[derive(Tabled)]
struct TagRow {
    #[tabled(rename = "Tag")]
    tag: String,
    #[tabled(rename = "Crates")]
    count: usize,
    #[tabled(rename = "Description")]
    description: String,
}

fn execute_tags(loaded: &LoadedCatalog, json_output: bool) -> Result<()> {
    let view = CatalogView::new(&loaded.catalog);
    let controls = view.tag_controls(&loaded.registry);

    if json_output {
        println!("{}", serde_json::to_string_pretty(&controls)?);
        return Ok(());
    }

    if controls.is_empty() {
        println!("The catalog has no tags.");
        return Ok(());
    }

    let table_rows: Vec<TagRow> = controls
        .iter()
        .map(|control| TagRow {
            tag: control.tag.to_string(),
            count: control.count,
            description: control
                .description
                .map(truncate_description)
                .unwrap_or_default(),
        })
        .collect();

    let table = Table::new(&table_rows)
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()))
        .to_string();

    println!("{table}");

    Ok(())
}
