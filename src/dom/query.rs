// src/dom/query.rs
// The handful of selectors the engine needs, evaluated over any PageTree.

use super::{PageTree, PageTreeMut};
use crate::core::html::is_heading;

#[derive(Clone, Copy, Debug)]
pub enum Selector<'a> {
    Tag(&'a str),
    /// h1..h6
    Heading,
    AttrEq(&'a str, &'a str),
    /// `[name*=value]`
    AttrContains(&'a str, &'a str),
    HasAttr(&'a str),
    /// One whole class token.
    Class(&'a str),
    /// Any class token containing any of the needles, ASCII case-insensitive.
    ClassContainsCi(&'a [&'a str]),
    All(&'a [Selector<'a>]),
}

impl Selector<'_> {
    pub fn matches<T: PageTree + ?Sized>(&self, tree: &T, node: T::Node) -> bool {
        let Some(tag) = tree.tag(node) else { return false };
        match *self {
            Selector::Tag(t) => tag == t,
            Selector::Heading => is_heading(tag),
            Selector::AttrEq(k, v) => tree.attr(node, k) == Some(v),
            Selector::AttrContains(k, v) => tree.attr(node, k).is_some_and(|a| a.contains(v)),
            Selector::HasAttr(k) => tree.attr(node, k).is_some(),
            Selector::Class(c) => tree.attr(node, "class").is_some_and(|a| a.split_whitespace().any(|t| t == c)),
            Selector::ClassContainsCi(needles) => tree.attr(node, "class").is_some_and(|a| {
                let lc = a.to_ascii_lowercase();
                needles.iter().any(|n| lc.contains(&n.to_ascii_lowercase()))
            }),
            Selector::All(parts) => parts.iter().all(|p| p.matches(tree, node)),
        }
    }
}

/// Every descendant of `scope` (scope itself excluded) matching `sel`, in document order.
pub fn select_all<T: PageTree + ?Sized>(tree: &T, scope: T::Node, sel: &Selector) -> Vec<T::Node> {
    let mut out = Vec::new();
    let mut stack: Vec<T::Node> = tree.children(scope).into_iter().rev().collect();
    while let Some(n) = stack.pop() {
        if sel.matches(tree, n) {
            out.push(n);
        }
        stack.extend(tree.children(n).into_iter().rev());
    }
    out
}

/// First descendant of `scope` matching `sel`, in document order.
pub fn select_first<T: PageTree + ?Sized>(tree: &T, scope: T::Node, sel: &Selector) -> Option<T::Node> {
    let mut stack: Vec<T::Node> = tree.children(scope).into_iter().rev().collect();
    while let Some(n) = stack.pop() {
        if sel.matches(tree, n) {
            return Some(n);
        }
        stack.extend(tree.children(n).into_iter().rev());
    }
    None
}

/// Nearest inclusive ancestor of `node` matching `sel`.
pub fn closest<T: PageTree + ?Sized>(tree: &T, node: T::Node, sel: &Selector) -> Option<T::Node> {
    let mut cur = Some(node);
    while let Some(n) = cur {
        if sel.matches(tree, n) {
            return Some(n);
        }
        cur = tree.parent(n);
    }
    None
}

pub fn has_class<T: PageTree + ?Sized>(tree: &T, node: T::Node, class: &str) -> bool {
    Selector::Class(class).matches(tree, node)
}

pub fn add_class<T: PageTreeMut + ?Sized>(tree: &mut T, node: T::Node, class: &str) {
    if has_class(tree, node, class) {
        return;
    }
    let next = match tree.attr(node, "class") {
        Some(cur) if !cur.trim().is_empty() => join!(cur.trim(), " ", class),
        _ => s!(class),
    };
    tree.set_attr(node, "class", &next);
}

pub fn remove_class<T: PageTreeMut + ?Sized>(tree: &mut T, node: T::Node, class: &str) {
    let Some(cur) = tree.attr(node, "class") else { return };
    let kept: Vec<&str> = cur.split_whitespace().filter(|t| *t != class).collect();
    let next = kept.join(" ");
    if next.is_empty() {
        tree.remove_attr(node, "class");
    } else {
        tree.set_attr(node, "class", &next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Tree;

    const DOC: &str = r#"
        <div id="a" class="Card-Title big">
          <h3>One</h3>
          <span class="x">in</span>
          <a href="/p/thing/12">link</a>
        </div>
        <span class="x">out</span>
    "#;

    #[test]
    fn select_all_in_document_order() {
        let t = Tree::parse(DOC);
        let spans = select_all(&t, t.root(), &Selector::Tag("span"));
        let texts: Vec<String> = spans.iter().map(|&n| t.text_content(n)).collect();
        assert_eq!(texts, vec!["in", "out"]);
    }

    #[test]
    fn compound_and_contains() {
        let t = Tree::parse(DOC);
        let link = select_first(&t, t.root(), &Selector::All(&[Selector::Tag("a"), Selector::AttrContains("href", "/p/")]));
        assert!(link.is_some());
        let titled = select_first(&t, t.root(), &Selector::ClassContainsCi(&["title"]));
        assert_eq!(titled.and_then(|n| t.attr(n, "id")), Some("a"));
    }

    #[test]
    fn closest_includes_self_and_class_edits() {
        let mut t = Tree::parse(DOC);
        let h3 = select_first(&t, t.root(), &Selector::Heading).unwrap();
        let card = closest(&t, h3, &Selector::Class("big")).unwrap();
        assert_eq!(closest(&t, card, &Selector::Class("big")), Some(card));

        add_class(&mut t, card, "hidden");
        add_class(&mut t, card, "hidden");
        assert_eq!(t.attr(card, "class"), Some("Card-Title big hidden"));
        remove_class(&mut t, card, "hidden");
        assert_eq!(t.attr(card, "class"), Some("Card-Title big"));
    }
}
