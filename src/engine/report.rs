// src/engine/report.rs
// Read-only diagnostics: what the engine would see on this page.

use std::fmt;

use serde::Serialize;

use crate::config::consts::{LABEL_TAG, MAX_ANCESTOR_DEPTH};
use crate::config::Settings;
use crate::core::sanitize::truncate_chars;
use crate::dom::query::select_all;
use crate::dom::{PageTree, Selector};
use crate::specs::ident::{climb, listing_id_from_href};
use crate::specs::{labels, listings};

use super::condition_map::build_condition_map;
use super::types::{Condition, ConditionRecord};

const MAX_LABELS: usize = 10;
const MAX_CARDS: usize = 5;
const TITLE_PREVIEW: usize = 30;

#[derive(Clone, Debug, Serialize)]
pub struct LabelSighting {
    pub text: String,
    /// Address of the product link the label's ancestor walk reaches first.
    pub product_link: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct CardPreview {
    pub id: String,
    pub title: String,
    pub condition: Condition,
}

#[derive(Clone, Debug, Serialize)]
pub struct DebugReport {
    pub settings: Settings,
    pub label_count: usize,
    pub labels: Vec<LabelSighting>,
    pub map: Vec<(String, ConditionRecord)>,
    pub cards: Vec<CardPreview>,
}

/// Snapshot of labels, the condition map and the first few listings.
/// Does not touch the tree.
pub fn debug_report<T: PageTree + ?Sized>(tree: &T, settings: &Settings) -> DebugReport {
    let condition_like: Vec<T::Node> = select_all(tree, tree.root(), &Selector::Tag(LABEL_TAG))
        .into_iter()
        .filter(|&n| labels::looks_like_condition(&tree.text_content(n)))
        .collect();

    let labels = condition_like
        .iter()
        .take(MAX_LABELS)
        .map(|&n| LabelSighting { text: s!(tree.text_content(n).trim()), product_link: nearest_product_href(tree, n) })
        .collect();

    let map = build_condition_map(tree);
    let cards = listings::discover(tree)
        .into_iter()
        .take(MAX_CARDS)
        .map(|l| CardPreview {
            condition: map.lookup(&l.id).condition,
            title: s!(truncate_chars(&l.title, TITLE_PREVIEW)),
            id: l.id,
        })
        .collect();

    DebugReport {
        settings: settings.clone(),
        label_count: condition_like.len(),
        labels,
        map: map.sorted().into_iter().map(|(id, r)| (s!(id), r.clone())).collect(),
        cards,
    }
}

// unlike id resolution, a malformed address is still worth showing
fn nearest_product_href<T: PageTree + ?Sized>(tree: &T, node: T::Node) -> Option<String> {
    climb(tree, node, MAX_ANCESTOR_DEPTH, |h| Some(s!(h)))
}

impl fmt::Display for DebugReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Nellis Helper Debug ===")?;
        writeln!(f, "Settings: {:?}", self.settings)?;
        writeln!(f, "Found {} condition spans:", self.label_count)?;
        for (i, l) in self.labels.iter().enumerate() {
            writeln!(f, "  {}. \"{}\"", i + 1, l.text)?;
            if let Some(href) = &l.product_link {
                let id = listing_id_from_href(href).unwrap_or_default();
                writeln!(f, "     -> Product link: {href} (id {id})")?;
            }
        }
        writeln!(f, "\nCondition map ({} entries):", self.map.len())?;
        for (id, r) in &self.map {
            writeln!(f, "  {id}: \"{}\" {}", r.condition, r.location.as_deref().unwrap_or("-"))?;
        }
        writeln!(f, "\nFirst {} product cards:", self.cards.len())?;
        for (i, c) in self.cards.iter().enumerate() {
            writeln!(f, "  {}. ID={}, Title=\"{}...\", Condition=\"{}\"", i + 1, c.id, c.title, c.condition)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Tree;

    #[test]
    fn report_lists_labels_map_and_cards() {
        let t = Tree::parse(
            r#"<div data-ax="item-card-container"><a data-ax="item-card-title-link" href="/p/A-Very-Long-Product-Title-That-Goes-On/11"><h6>A Very Long Product Title That Goes On</h6></a><span>New</span><span>Henderson</span></div>
               <div data-ax="item-card-container"><a data-ax="item-card-title-link" href="/p/B/12"><h6>Bench</h6></a><span>Minor Damage</span></div>"#,
        );
        let r = debug_report(&t, &Settings::default());
        assert_eq!(r.label_count, 2);
        assert_eq!(r.labels[0].product_link.as_deref(), Some("/p/A-Very-Long-Product-Title-That-Goes-On/11"));
        assert_eq!(r.map.len(), 2);
        assert_eq!(r.cards[1].condition, Condition::MinorDamage);
        assert_eq!(r.cards[0].title.chars().count(), 30);
        assert!(r.to_string().contains("ID=12"));
    }

    #[test]
    fn report_json_shape() {
        let t = Tree::parse(
            r#"<div data-ax="item-card-container"><a data-ax="item-card-title-link" href="/p/Bench/12"><h6>Bench</h6></a><span>Minor Damage</span><span>Henderson</span></div>"#,
        );
        let json = serde_json::to_value(debug_report(&t, &Settings::default())).unwrap();
        assert_eq!(json["label_count"], 1);
        assert_eq!(json["labels"][0]["product_link"], "/p/Bench/12");
        assert_eq!(json["cards"][0]["id"], "12");
        assert_eq!(json["cards"][0]["condition"], "minorDamage");
        assert_eq!(json["map"][0][0], "12");
        assert_eq!(json["settings"]["showAmazonLinks"], true);
    }
}
