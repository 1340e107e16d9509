// src/dom/mod.rs
//! # Structural query port
//!
//! The engine never talks to a concrete document. It reads the page through
//! [`PageTree`] and writes its markers/links through [`PageTreeMut`]; the
//! selector vocabulary in [`query`] is evaluated on top of those few
//! primitives, so any tree that can answer "parent / children / tag / attr /
//! text" can be filtered.
//!
//! [`Tree`] is the in-memory adapter: a tolerant HTML reader plus an arena.
//! It backs the CLI (saved page snapshots) and every test.
//!
//! Node handles are only valid for the pass that obtained them. The host page
//! can remove anything between passes, so nothing here caches handles.

use std::fmt::Debug;
use std::hash::Hash;

pub mod query;
pub mod tree;

pub use query::Selector;
pub use tree::{NodeId, Tree};

/// Read side of the document.
pub trait PageTree {
    type Node: Copy + Eq + Hash + Debug;

    fn root(&self) -> Self::Node;
    fn parent(&self, node: Self::Node) -> Option<Self::Node>;
    /// Element and text children, in document order.
    fn children(&self, node: Self::Node) -> Vec<Self::Node>;
    /// Lowercase tag name; `None` for text nodes.
    fn tag(&self, node: Self::Node) -> Option<&str>;
    fn attr(&self, node: Self::Node, name: &str) -> Option<&str>;
    /// Concatenated text of every descendant text node, untrimmed.
    fn text_content(&self, node: Self::Node) -> String;
}

/// An element to be inserted by the engine.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NewElement {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub text: Option<String>,
}

impl NewElement {
    pub fn new(tag: &str) -> Self {
        Self { tag: s!(tag), ..Default::default() }
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.push((s!(name), s!(value)));
        self
    }
}

/// Write side of the document.
pub trait PageTreeMut: PageTree {
    fn set_attr(&mut self, node: Self::Node, name: &str, value: &str);
    fn remove_attr(&mut self, node: Self::Node, name: &str);
    /// Insert as the next sibling of `anchor`.
    fn insert_after(&mut self, anchor: Self::Node, el: NewElement) -> Self::Node;
    /// Insert as the first child of `parent`.
    fn prepend_child(&mut self, parent: Self::Node, el: NewElement) -> Self::Node;
    /// Detach `node` (and its subtree) from the document.
    fn remove(&mut self, node: Self::Node);
}
