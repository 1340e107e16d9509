// src/specs/ident.rs
// Label → listing id. Labels are not linked to their listing by any stable
// attribute, so we climb from the label until some ancestor's subtree holds a
// product link, and read the id out of that link's path.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::consts::{LISTING_PATH, MAX_ANCESTOR_DEPTH};
use crate::dom::query::select_first;
use crate::dom::{PageTree, Selector};

/// `a[href*="/p/"]`
pub const PRODUCT_LINK: Selector<'static> =
    Selector::All(&[Selector::Tag("a"), Selector::AttrContains("href", LISTING_PATH)]);

// /p/<slug>/<digits>
static LISTING_ID: Lazy<Regex> = Lazy::new(|| compile_regex(r"/p/[^/]+/(\d+)"));
// /p/<slug>
static LISTING_SLUG: Lazy<Regex> = Lazy::new(|| compile_regex(r"/p/([^/?#]+)"));

fn compile_regex(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|err| panic!("invalid regex literal {pattern}: {err}"))
}

/// Numeric listing id from a product address, e.g. `/p/Some-Thing/88336066` → `88336066`.
pub fn listing_id_from_href(href: &str) -> Option<String> {
    LISTING_ID.captures(href).and_then(|c| c.get(1)).map(|m| s!(m.as_str()))
}

/// The slug segment of a product address, hyphens turned into spaces.
pub fn title_from_href(href: &str) -> Option<String> {
    let slug = LISTING_SLUG.captures(href)?.get(1)?.as_str().replace('-', " ");
    let slug = slug.trim();
    if slug.is_empty() { None } else { Some(s!(slug)) }
}

/// Climb at most `max_depth` ancestors from `node`. At each one, the first
/// product link in its subtree (document order) is handed to `read`; the
/// first `Some` it returns ends the climb.
pub fn climb<T, R>(tree: &T, node: T::Node, max_depth: usize, mut read: impl FnMut(&str) -> Option<R>) -> Option<R>
where
    T: PageTree + ?Sized,
{
    let mut cur = tree.parent(node);
    for _ in 0..max_depth {
        let ancestor = cur?;
        let href = select_first(tree, ancestor, &PRODUCT_LINK).and_then(|link| tree.attr(link, "href"));
        if let Some(found) = href.and_then(&mut read) {
            return Some(found);
        }
        cur = tree.parent(ancestor);
    }
    None
}

/// Id of the listing `node` belongs to, looking at most `max_depth` ancestors up.
/// A link whose address does not parse does not stop the walk.
pub fn resolve_listing_id<T: PageTree + ?Sized>(tree: &T, node: T::Node, max_depth: usize) -> Option<String> {
    climb(tree, node, max_depth, listing_id_from_href)
}

/// [`resolve_listing_id`] with the standard depth bound.
pub fn resolve<T: PageTree + ?Sized>(tree: &T, node: T::Node) -> Option<String> {
    resolve_listing_id(tree, node, MAX_ANCESTOR_DEPTH)
}
