// src/specs/listings.rs
// Listing cards: which elements they are, their one canonical link, a title.
//
// A card holds several product links (image, title, sometimes a "view"
// button). Only the title link counts, so one card is one listing.

use crate::config::consts::{CARD_CONTAINER, CARD_TITLE_LINK, DATA_AX};
use crate::core::sanitize::normalize_ws;
use crate::dom::query::{select_all, select_first};
use crate::dom::{PageTree, Selector};
use crate::engine::markers::is_processed;
use crate::engine::types::Listing;

use super::ident::{listing_id_from_href, title_from_href};

pub const CARD: Selector<'static> = Selector::AttrEq(DATA_AX, CARD_CONTAINER);
pub const TITLE_LINK: Selector<'static> =
    Selector::All(&[Selector::Tag("a"), Selector::AttrEq(DATA_AX, CARD_TITLE_LINK)]);
const TITLE_CLASS: Selector<'static> = Selector::ClassContainsCi(&["title", "name"]);

/// Unprocessed listings currently on the page, in document order.
///
/// Cards whose container or title link already carry the processed marker
/// are skipped, as are cards without a title link or without a parsable id.
pub fn discover<T: PageTree + ?Sized>(tree: &T) -> Vec<Listing<T::Node>> {
    let mut out = Vec::new();
    for container in select_all(tree, tree.root(), &CARD) {
        if is_processed(tree, container) {
            continue;
        }
        let Some(link) = select_first(tree, container, &TITLE_LINK) else {
            logd!("card without title link skipped");
            continue;
        };
        if is_processed(tree, link) {
            continue;
        }
        let Some(id) = tree.attr(link, "href").and_then(listing_id_from_href) else {
            logd!("card link without listing id skipped: {:?}", tree.attr(link, "href"));
            continue;
        };
        let title = extract_title(tree, link);
        out.push(Listing { container, link, id, title });
    }
    logd!("Found {} product cards", out.len());
    out
}

/// Best-effort title for a listing link, first non-empty of:
/// 1. heading inside the link
/// 2. element whose class mentions title/name
/// 3. the link's `aria-label`, then `title`
/// 4. the product slug from the address, hyphens as spaces
pub fn extract_title<T: PageTree + ?Sized>(tree: &T, link: T::Node) -> String {
    [
        text_of(tree, link, &Selector::Heading),
        text_of(tree, link, &TITLE_CLASS),
        tree.attr(link, "aria-label").map(normalize_ws),
        tree.attr(link, "title").map(normalize_ws),
        tree.attr(link, "href").and_then(title_from_href),
    ]
    .into_iter()
    .flatten()
    .find(|t| !t.is_empty())
    .unwrap_or_default()
}

fn text_of<T: PageTree + ?Sized>(tree: &T, scope: T::Node, sel: &Selector<'_>) -> Option<String> {
    select_first(tree, scope, sel).map(|n| normalize_ws(&tree.text_content(n)))
}
