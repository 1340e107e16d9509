// src/engine/engine.rs
// One full reconciliation pass over the current page.

use crate::config::Settings;
use crate::dom::PageTreeMut;
use crate::specs::listings;

use super::annotate::annotate;
use super::condition_map::build_condition_map;
use super::filter::decide;
use super::markers;
use super::types::PassSummary;

/// Reset → rebuild the condition map → discover → decide + apply → mark.
///
/// `settings` is a snapshot for this pass only. The pass re-reads the tree
/// from scratch, so running it twice on an unchanged page is a no-op.
/// Listings without a resolvable id are left untouched.
pub fn apply_pass<T: PageTreeMut + ?Sized>(tree: &mut T, settings: &Settings) -> PassSummary {
    logd!("Applying filters...");

    markers::reset(tree);
    let map = build_condition_map(tree);
    let found = listings::discover(tree);

    let mut summary = PassSummary { listings: found.len(), map_entries: map.len(), ..Default::default() };

    for listing in &found {
        let rec = map.lookup(&listing.id);
        let visibility = decide(rec.condition, rec.location.as_deref(), settings);

        if visibility.is_hidden() {
            markers::hide(tree, listing.container);
            summary.hidden += 1;
            summary.hidden_ids.push(listing.id.clone());
            logd!("hide {} ({:?})", listing.id, visibility);
        } else {
            summary.shown += 1;
            summary.shown_ids.push(listing.id.clone());
            if settings.show_amazon_links && annotate(tree, listing).is_some() {
                summary.annotated += 1;
            }
        }

        markers::mark_processed(tree, listing.link);
    }

    logf!("{summary}");
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::query::{select_all, select_first};
    use crate::dom::{PageTree, Tree};

    const PAGE: &str = r#"
        <div data-ax="item-card-container"><a data-ax="item-card-title-link" href="/p/Desk-Lamp/1"><h6>Desk Lamp</h6></a><span>Used</span></div>
        <div data-ax="item-card-container"><a data-ax="item-card-title-link" href="/p/Office-Chair/2"><h6>Office Chair</h6></a></div>
        <div data-ax="item-card-container"><a data-ax="item-card-title-link" href="/p/no-id"><h6>Broken Card</h6></a><span>Used</span></div>
    "#;

    #[test]
    fn hides_marks_and_annotates() {
        let mut t = Tree::parse(PAGE);
        let s = Settings { hide_used: true, ..Settings::default() };
        let sum = apply_pass(&mut t, &s);
        assert_eq!((sum.listings, sum.shown, sum.hidden, sum.annotated), (2, 1, 1, 1));
        assert_eq!(sum.hidden_ids, vec![s!("1")]);
        assert_eq!(markers::annotations(&t).len(), 1);
        // the id-less card is neither hidden nor marked
        assert_eq!(select_all(&t, t.root(), &markers::PROCESSED).len(), 2);
    }

    #[test]
    fn settings_change_reverts_hidden_state() {
        let mut t = Tree::parse(PAGE);
        apply_pass(&mut t, &Settings { hide_used: true, ..Settings::default() });
        let sum = apply_pass(&mut t, &Settings::default());
        assert_eq!(sum.hidden, 0);
        assert!(select_first(&t, t.root(), &markers::HIDDEN).is_none());
    }

    #[test]
    fn links_off_means_no_links() {
        let mut t = Tree::parse(PAGE);
        let sum = apply_pass(&mut t, &Settings { show_amazon_links: false, ..Settings::default() });
        assert_eq!(sum.annotated, 0);
        assert!(markers::annotations(&t).is_empty());
    }
}
