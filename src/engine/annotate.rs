// src/engine/annotate.rs
// Outbound search link per visible listing.

use once_cell::sync::Lazy;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use regex::Regex;

use crate::config::consts::{ANNOTATION_CLASS, MAX_QUERY_CHARS, MIN_TITLE_CHARS, SEARCH_URL_PREFIX};
use crate::core::sanitize::{normalize_ws, truncate_chars};
use crate::dom::query::{closest, has_class, select_first};
use crate::dom::{NewElement, PageTree, PageTreeMut, Selector};
use crate::host::Host;

use super::markers;
use super::types::Listing;

/// Same set `encodeURIComponent` leaves alone.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

static PACK_SIZE: Lazy<Regex> = Lazy::new(|| compile_regex(r"(?i)\d+\s*pack"));
static PARENTHETICAL: Lazy<Regex> = Lazy::new(|| compile_regex(r"\([^)]*\)"));

fn compile_regex(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|err| panic!("invalid regex literal {pattern}: {err}"))
}

/// Title → search terms: no pack sizes, no parentheticals, single spaces, ≤ 100 chars.
pub fn search_query(title: &str) -> String {
    let q = PACK_SIZE.replace_all(title, "");
    let q = PARENTHETICAL.replace_all(&q, "");
    let q = normalize_ws(&q);
    s!(truncate_chars(&q, MAX_QUERY_CHARS))
}

pub fn search_url(title: &str) -> String {
    let query = search_query(title);
    join!(SEARCH_URL_PREFIX, &utf8_percent_encode(&query, URI_COMPONENT).to_string())
}

/// Add the search link to `listing` unless it already has one or the title is
/// too short to search for. Returns the inserted link.
///
/// The link goes right after the heading inside the title link, or first in
/// the card when there is no heading.
pub fn annotate<T: PageTreeMut + ?Sized>(tree: &mut T, listing: &Listing<T::Node>) -> Option<T::Node> {
    if markers::has_annotation(tree, listing.container) {
        return None;
    }
    if listing.title.chars().count() < MIN_TITLE_CHARS {
        return None;
    }

    let url = search_url(&listing.title);
    let link = NewElement::new("a")
        .attr("href", &url)
        .attr("target", "_blank")
        .attr("rel", "noopener noreferrer")
        .attr("class", ANNOTATION_CLASS)
        .attr("title", &format!("Search Amazon for: {}", listing.title));

    let node = match select_first(tree, listing.link, &Selector::Heading) {
        Some(heading) => tree.insert_after(heading, link),
        None => tree.prepend_child(listing.container, link),
    };
    Some(node)
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClickOutcome {
    pub propagation_stopped: bool,
    pub default_prevented: bool,
    /// Address opened in a new browsing context.
    pub opened: Option<String>,
    /// Address this page navigated to.
    pub navigated: Option<String>,
}

const HREF_LINK: Selector<'static> = Selector::All(&[Selector::Tag("a"), Selector::HasAttr("href")]);

/// Route a click on `target` the way the page would.
///
/// Bubbling from the target, our annotation handler runs before anything on
/// the listing: it stops propagation, prevents the default action and opens
/// the search in a new context. Otherwise the nearest link's default action
/// (navigation to the listing) happens.
pub fn dispatch_click<T: PageTree + ?Sized, H: Host + ?Sized>(tree: &T, target: T::Node, host: &mut H) -> ClickOutcome {
    let mut cur = Some(target);
    while let Some(n) = cur {
        if has_class(tree, n, ANNOTATION_CLASS) {
            let href = s!(tree.attr(n, "href").unwrap_or_default());
            host.open_new_context(&href);
            return ClickOutcome {
                propagation_stopped: true,
                default_prevented: true,
                opened: Some(href),
                navigated: None,
            };
        }
        cur = tree.parent(n);
    }

    let mut outcome = ClickOutcome::default();
    if let Some(href) = closest(tree, target, &HREF_LINK).and_then(|a| tree.attr(a, "href")) {
        host.navigate(href);
        outcome.navigated = Some(s!(href));
    }
    outcome
}
