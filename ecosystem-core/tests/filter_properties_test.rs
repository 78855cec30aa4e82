//! Property-based tests for tag filtering
//!
//! These check the visibility rule and the filter set operations over
//! randomly generated tag sets.

use ecosystem_core::filter::{is_visible, parse_tag_attribute, tag_attribute, ActiveFilters};
use proptest::prelude::*;
use std::collections::BTreeSet;

// Strategy for generating tags as they appear in catalogs
fn tag() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9-]{0,11}"
}

fn tag_set() -> impl Strategy<Value = BTreeSet<String>> {
    prop::collection::btree_set(tag(), 0..6)
}

fn active(tags: &BTreeSet<String>) -> ActiveFilters {
    tags.iter().cloned().collect()
}

proptest! {
    #[test]
    fn empty_filters_show_everything(tags in tag_set()) {
        prop_assert!(is_visible(&tags, &ActiveFilters::new()));
    }

    #[test]
    fn shared_tag_means_visible(tags in tag_set(), filters in tag_set(), shared in tag()) {
        let mut tags = tags;
        let mut filters = filters;
        tags.insert(shared.clone());
        filters.insert(shared);
        prop_assert!(is_visible(&tags, &active(&filters)));
    }

    #[test]
    fn disjoint_tags_mean_hidden(tags in tag_set(), filters in tag_set()) {
        let filters: BTreeSet<String> = filters.difference(&tags).cloned().collect();
        prop_assume!(!filters.is_empty());
        prop_assert!(!is_visible(&tags, &active(&filters)));
    }

    #[test]
    fn visibility_ignores_order(tags in prop::collection::vec(tag(), 0..6), filters in tag_set()) {
        let filters = active(&filters);
        let mut reversed = tags.clone();
        reversed.reverse();
        prop_assert_eq!(is_visible(&tags, &filters), is_visible(&reversed, &filters));
    }

    #[test]
    fn double_toggle_is_identity(filters in tag_set(), tag in tag()) {
        let original = active(&filters);
        let mut toggled = original.clone();
        toggled.toggle(&tag);
        toggled.toggle(&tag);
        prop_assert_eq!(toggled, original);
    }

    #[test]
    fn set_is_idempotent(filters in tag_set(), tag in tag()) {
        let mut once = active(&filters);
        once.set(&tag);
        let mut twice = once.clone();
        twice.set(&tag);
        prop_assert_eq!(&once, &twice);
        prop_assert!(once.contains(&tag));
    }

    #[test]
    fn attribute_round_trips(tags in prop::collection::vec(tag(), 0..6)) {
        prop_assert_eq!(parse_tag_attribute(&tag_attribute(&tags)), tags);
    }
}

#[test]
fn documented_scenarios() {
    let package = ["async", "http"];

    assert!(is_visible(package, &ActiveFilters::new()));
    assert!(!is_visible(package, &["cli"].into_iter().collect::<ActiveFilters>()));
    assert!(is_visible(
        package,
        &["http", "cli"].into_iter().collect::<ActiveFilters>()
    ));

    let mut filters = ActiveFilters::new();
    filters.toggle("cli");
    assert_eq!(filters, ["cli"].into_iter().collect::<ActiveFilters>());
    filters.toggle("cli");
    assert_eq!(filters, ActiveFilters::new());
}
