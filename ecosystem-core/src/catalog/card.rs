//! Display projection of a crate record

use serde::Serialize;

use super::{CrateEntry, MetaLink};
use crate::filter::tag_attribute;

/// Separator between meta links on a card
pub const META_LINK_SEPARATOR: &str = "·";

/// What one card shows: borrowed from the entry, never stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub tags: &'a [String],
    pub links: Vec<MetaLink<'a>>,
}

impl<'a> From<&'a CrateEntry> for Card<'a> {
    fn from(entry: &'a CrateEntry) -> Self {
        Self {
            name: &entry.name,
            description: &entry.description,
            tags: &entry.tags,
            links: entry.links(),
        }
    }
}

impl Card<'_> {
    /// Tags as the comma-separated attribute a rendered card carries
    pub fn tags_attribute(&self) -> String {
        tag_attribute(self.tags)
    }

    /// Link labels surrounded by brackets and separated by a dot,
    /// e.g. `[crate·repo·docs]`
    pub fn meta_line(&self) -> String {
        let labels: Vec<&str> = self.links.iter().map(|l| l.kind.label()).collect();
        format!("[{}]", labels.join(META_LINK_SEPARATOR))
    }
}

#[cfg(test)]
mod card_tests {
    use super::*;
    use crate::filter::parse_tag_attribute;

    fn entry() -> CrateEntry {
        let mut entry = CrateEntry::new("iced", "GUI library", &["gui", "elm"]);
        entry.crates_io = Some("https://crates.io/crates/iced".to_string());
        entry.repo = Some("https://github.com/iced-rs/iced".to_string());
        entry.docs = Some("https://docs.rs/iced".to_string());
        entry
    }

    #[test]
    fn test_meta_line() {
        let entry = entry();
        assert_eq!(Card::from(&entry).meta_line(), "[crate·repo·docs]");

        let bare = CrateEntry::new("clap", "Arguments", &[]);
        assert_eq!(Card::from(&bare).meta_line(), "[]");
    }

    #[test]
    fn test_tags_attribute_parses_back() {
        let entry = entry();
        let card = Card::from(&entry);
        assert_eq!(card.tags_attribute(), "gui,elm");
        assert_eq!(parse_tag_attribute(&card.tags_attribute()), entry.tags);
    }

    #[test]
    fn test_json_shape() {
        let entry = entry();
        let value = serde_json::to_value(Card::from(&entry)).unwrap();
        assert_eq!(value["name"], "iced");
        assert_eq!(value["links"][0]["label"], "crate");
        assert_eq!(value["links"][2]["url"], "https://docs.rs/iced");
        assert_eq!(value["tags"][1], "elm");
    }
}
