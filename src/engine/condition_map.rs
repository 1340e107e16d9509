// src/engine/condition_map.rs
// Scan every label candidate on the page and attribute it to a listing id.

use crate::config::consts::{LABEL_TAG, MAX_ANCESTOR_DEPTH};
use crate::dom::query::select_all;
use crate::dom::{PageTree, Selector};
use crate::specs::{ident, labels};

use super::types::ConditionMap;

/// Build the id → {condition, location} map from the current tree.
/// Labels that resolve to no listing (page furniture) are dropped.
pub fn build_condition_map<T: PageTree + ?Sized>(tree: &T) -> ConditionMap {
    build_with_depth(tree, MAX_ANCESTOR_DEPTH)
}

pub fn build_with_depth<T: PageTree + ?Sized>(tree: &T, max_depth: usize) -> ConditionMap {
    let mut map = ConditionMap::default();
    let mut orphans = 0usize;

    for span in select_all(tree, tree.root(), &Selector::Tag(LABEL_TAG)) {
        let label = labels::classify(&tree.text_content(span));
        if label.is_empty() {
            continue;
        }
        match ident::resolve_listing_id(tree, span, max_depth) {
            Some(id) => map.merge(&id, label),
            None => orphans += 1,
        }
    }

    logd!("Built condition map with {} entries ({} unattributed labels)", map.len(), orphans);
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Tree;
    use crate::engine::types::{Condition, ConditionRecord};

    fn card(id: &str, spans: &[&str]) -> String {
        let spans: String = spans.iter().map(|s| format!("<span class=\"px-3\">{s}</span>")).collect();
        format!(
            r#"<div data-ax="item-card-container"><a data-ax="item-card-title-link" href="/p/Item/{id}"><h6>Item</h6></a><div>{spans}</div></div>"#
        )
    }

    #[test]
    fn condition_and_location_merge_per_listing() {
        let html = [card("1", &["North Las Vegas", "Used"]), card("2", &["Henderson"])].concat();
        let map = build_condition_map(&Tree::parse(&html));
        assert_eq!(
            map.lookup("1"),
            ConditionRecord { condition: Condition::Used, location: Some(s!("North Las Vegas")) }
        );
        assert_eq!(map.lookup("2").condition, Condition::None);
        assert_eq!(map.lookup("2").location.as_deref(), Some("Henderson"));
    }

    #[test]
    fn new_items_have_no_condition() {
        let html = [card("5", &["New", "Decatur"]), card("6", &[])].concat();
        let map = build_condition_map(&Tree::parse(&html));
        assert_eq!(map.lookup("5").condition, Condition::None);
        assert!(map.get("6").is_none());
    }

    #[test]
    fn last_condition_in_document_order_wins() {
        let map = build_condition_map(&Tree::parse(&card("9", &["Used", "Minor Damage"])));
        assert_eq!(map.lookup("9").condition, Condition::MinorDamage);
    }

    #[test]
    fn unattributed_labels_dropped() {
        let map = build_condition_map(&Tree::parse("<header><span>Used</span></header>"));
        assert!(map.is_empty());
    }
}
