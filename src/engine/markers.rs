// src/engine/markers.rs
//! On-page markers are the engine's only memory between passes:
//!
//! | marker | on | written | cleared |
//! |---|---|---|---|
//! | `data-nellis-helper-processed` | title link | end of each listing's step | pass reset, navigation |
//! | `nellis-helper-hidden` class | card container | hidden decision | pass reset |
//! | `nellis-helper-amazon-link` class | our annotation `<a>` | annotation | pass reset, navigation |
//!
//! All reads and writes of those names go through this module.

use crate::config::consts::{ANNOTATION_CLASS, HIDDEN_CLASS, PROCESSED_ATTR};
use crate::dom::query::{add_class, has_class, remove_class, select_all, select_first};
use crate::dom::{PageTree, PageTreeMut, Selector};

pub const PROCESSED: Selector<'static> = Selector::HasAttr(PROCESSED_ATTR);
pub const HIDDEN: Selector<'static> = Selector::Class(HIDDEN_CLASS);
pub const ANNOTATION: Selector<'static> = Selector::Class(ANNOTATION_CLASS);

pub fn mark_processed<T: PageTreeMut + ?Sized>(tree: &mut T, node: T::Node) {
    tree.set_attr(node, PROCESSED_ATTR, "true");
}

pub fn is_processed<T: PageTree + ?Sized>(tree: &T, node: T::Node) -> bool {
    tree.attr(node, PROCESSED_ATTR).is_some()
}

pub fn any_processed<T: PageTree + ?Sized>(tree: &T) -> bool {
    select_first(tree, tree.root(), &PROCESSED).is_some()
}

/// Returns the number of markers removed.
pub fn clear_processed<T: PageTreeMut + ?Sized>(tree: &mut T) -> usize {
    let marked = select_all(tree, tree.root(), &PROCESSED);
    for &n in &marked {
        tree.remove_attr(n, PROCESSED_ATTR);
    }
    marked.len()
}

pub fn hide<T: PageTreeMut + ?Sized>(tree: &mut T, container: T::Node) {
    add_class(tree, container, HIDDEN_CLASS);
}

pub fn is_hidden<T: PageTree + ?Sized>(tree: &T, node: T::Node) -> bool {
    has_class(tree, node, HIDDEN_CLASS)
}

pub fn clear_hidden<T: PageTreeMut + ?Sized>(tree: &mut T) -> usize {
    let hidden = select_all(tree, tree.root(), &HIDDEN);
    for &n in &hidden {
        remove_class(tree, n, HIDDEN_CLASS);
    }
    hidden.len()
}

pub fn has_annotation<T: PageTree + ?Sized>(tree: &T, scope: T::Node) -> bool {
    select_first(tree, scope, &ANNOTATION).is_some()
}

pub fn annotations<T: PageTree + ?Sized>(tree: &T) -> Vec<T::Node> {
    select_all(tree, tree.root(), &ANNOTATION)
}

pub fn clear_annotations<T: PageTreeMut + ?Sized>(tree: &mut T) -> usize {
    let links = annotations(tree);
    for &n in &links {
        tree.remove(n);
    }
    links.len()
}

/// Full reset at the start of a pass: every annotation, hidden-state and
/// processed marker goes, so the pass rebuilds the page state from scratch.
pub fn reset<T: PageTreeMut + ?Sized>(tree: &mut T) {
    let links = clear_annotations(tree);
    let hidden = clear_hidden(tree);
    let processed = clear_processed(tree);
    logd!("reset: removed {links} links, {hidden} hidden, {processed} processed markers");
}

/// Navigation reset: listings become "new" again and stale links go at once.
/// Hidden-state stays until the settle pass recomputes it.
pub fn forget_processed<T: PageTreeMut + ?Sized>(tree: &mut T) {
    let processed = clear_processed(tree);
    let links = clear_annotations(tree);
    logd!("navigation: cleared {processed} processed markers, {links} links");
}
