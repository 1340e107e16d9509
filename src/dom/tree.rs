// src/dom/tree.rs
// Arena-backed document. Removed nodes stay in the arena but are detached,
// so stale handles read as orphans instead of dangling.

use super::{NewElement, PageTree, PageTreeMut};
use crate::core::html::{is_raw_text, is_void};
use crate::core::sanitize::{escape_attr, escape_text};
use crate::core::{Token, Tokens};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Clone, Debug)]
enum Kind {
    Document,
    Element { tag: String, attrs: Vec<(String, String)> },
    Text(String),
    Doctype(String),
}

#[derive(Clone, Debug)]
struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    kind: Kind,
}

#[derive(Clone, Debug)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Default for Tree {
    fn default() -> Self {
        Self { nodes: vec![Node { parent: None, children: Vec::new(), kind: Kind::Document }] }
    }
}

impl Tree {
    const ROOT: NodeId = NodeId(0);

    /// Build a tree from an HTML document or fragment. Never fails: unknown
    /// close tags are dropped and unclosed elements end at EOF.
    pub fn parse(html: &str) -> Self {
        let mut tree = Tree::default();
        tree.graft(Self::ROOT, html);
        tree
    }

    /// Parse `html` and append the result to `parent`'s children.
    pub fn append_html(&mut self, parent: NodeId, html: &str) {
        self.graft(parent, html);
    }

    /// Drop every child of `parent`, then append `html`.
    pub fn replace_children(&mut self, parent: NodeId, html: &str) {
        for child in std::mem::take(&mut self.nodes[parent.0].children) {
            self.nodes[child.0].parent = None;
        }
        self.graft(parent, html);
    }

    /// `<body>` if present, else the document root.
    pub fn body(&self) -> NodeId {
        super::query::select_first(self, Self::ROOT, &super::Selector::Tag("body")).unwrap_or(Self::ROOT)
    }

    /// First element whose `id` attribute equals `id`.
    pub fn by_id(&self, id: &str) -> Option<NodeId> {
        super::query::select_first(self, Self::ROOT, &super::Selector::AttrEq("id", id))
    }

    fn graft(&mut self, parent: NodeId, html: &str) {
        let mut stack: Vec<NodeId> = vec![parent];
        for tok in Tokens::new(html) {
            let top = *stack.last().unwrap_or(&parent);
            match tok {
                Token::Text(t) => {
                    if !t.is_empty() {
                        self.push(top, Kind::Text(t));
                    }
                }
                Token::Open { name, attrs, self_closing } => {
                    let leaf = self_closing || is_void(&name);
                    let id = self.push(top, Kind::Element { tag: name, attrs });
                    if !leaf {
                        stack.push(id);
                    }
                }
                Token::Doctype(d) => {
                    self.push(top, Kind::Doctype(d));
                }
                Token::Close { name } => {
                    // pop back to the matching open element, if any; stack[0] is the graft point
                    if let Some(pos) = stack.iter().skip(1).rposition(|&n| self.tag(n) == Some(name.as_str())) {
                        stack.truncate(pos + 1);
                    }
                }
            }
        }
    }

    fn push(&mut self, parent: NodeId, kind: Kind) -> NodeId {
        let id = self.alloc(kind);
        self.nodes[id.0].parent = Some(parent);
        self.nodes[parent.0].children.push(id);
        id
    }

    fn alloc(&mut self, kind: Kind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node { parent: None, children: Vec::new(), kind });
        id
    }

    fn build(&mut self, el: NewElement) -> NodeId {
        let id = self.alloc(Kind::Element { tag: el.tag, attrs: el.attrs });
        if let Some(text) = el.text {
            let t = self.alloc(Kind::Text(text));
            self.nodes[t.0].parent = Some(id);
            self.nodes[id.0].children.push(t);
        }
        id
    }

    fn detach(&mut self, node: NodeId) {
        if let Some(p) = self.nodes[node.0].parent.take() {
            self.nodes[p.0].children.retain(|&c| c != node);
        }
    }

    /// Serialize the live document back to HTML.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_node(Self::ROOT, &mut out);
        out
    }

    /// Serialize one subtree (outer HTML).
    pub fn outer_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.write_node(node, &mut out);
        out
    }

    fn write_node(&self, node: NodeId, out: &mut String) {
        match &self.nodes[node.0].kind {
            Kind::Document => {}
            Kind::Doctype(d) => {
                out.push_str("<!");
                out.push_str(d);
                out.push('>');
                return;
            }
            Kind::Text(t) => {
                let raw = self.nodes[node.0].parent.and_then(|p| self.tag(p)).is_some_and(is_raw_text);
                out.push_str(&if raw { t.clone() } else { escape_text(t) });
                return;
            }
            Kind::Element { tag, attrs } => {
                out.push('<');
                out.push_str(tag);
                for (k, v) in attrs {
                    out.push(' ');
                    out.push_str(k);
                    out.push_str("=\"");
                    out.push_str(&escape_attr(v));
                    out.push('"');
                }
                out.push('>');
                if is_void(tag) {
                    return;
                }
            }
        }
        for &c in &self.nodes[node.0].children {
            self.write_node(c, out);
        }
        if let Kind::Element { tag, .. } = &self.nodes[node.0].kind {
            out.push_str("</");
            out.push_str(tag);
            out.push('>');
        }
    }

    fn attrs_mut(&mut self, node: NodeId) -> Option<&mut Vec<(String, String)>> {
        match &mut self.nodes[node.0].kind {
            Kind::Element { attrs, .. } => Some(attrs),
            _ => None,
        }
    }
}

impl PageTree for Tree {
    type Node = NodeId;

    fn root(&self) -> NodeId {
        Self::ROOT
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.nodes[node.0].children.clone()
    }

    fn tag(&self, node: NodeId) -> Option<&str> {
        match &self.nodes[node.0].kind {
            Kind::Element { tag, .. } => Some(tag),
            _ => None,
        }
    }

    fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        match &self.nodes[node.0].kind {
            Kind::Element { attrs, .. } => attrs.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str()),
            _ => None,
        }
    }

    fn text_content(&self, node: NodeId) -> String {
        let mut out = String::new();
        let mut stack = vec![node];
        while let Some(n) = stack.pop() {
            if let Kind::Text(t) = &self.nodes[n.0].kind {
                out.push_str(t);
            }
            stack.extend(self.nodes[n.0].children.iter().rev());
        }
        out
    }
}

impl PageTreeMut for Tree {
    fn set_attr(&mut self, node: NodeId, name: &str, value: &str) {
        let Some(attrs) = self.attrs_mut(node) else { return };
        match attrs.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => *v = s!(value),
            None => attrs.push((s!(name), s!(value))),
        }
    }

    fn remove_attr(&mut self, node: NodeId, name: &str) {
        if let Some(attrs) = self.attrs_mut(node) {
            attrs.retain(|(k, _)| k != name);
        }
    }

    fn insert_after(&mut self, anchor: NodeId, el: NewElement) -> NodeId {
        let id = self.build(el);
        // a detached anchor has no siblings; the new node stays detached too
        if let Some(p) = self.nodes[anchor.0].parent {
            let pos = self.nodes[p.0].children.iter().position(|&c| c == anchor).map_or(0, |i| i + 1);
            self.nodes[p.0].children.insert(pos, id);
            self.nodes[id.0].parent = Some(p);
        }
        id
    }

    fn prepend_child(&mut self, parent: NodeId, el: NewElement) -> NodeId {
        let id = self.build(el);
        self.nodes[parent.0].children.insert(0, id);
        self.nodes[id.0].parent = Some(parent);
        id
    }

    fn remove(&mut self, node: NodeId) {
        self.detach(node);
    }
}
