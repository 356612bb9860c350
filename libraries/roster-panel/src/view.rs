//! Minimal virtual DOM.
//!
//! Rendering builds a [`Node`] tree; text is stored unescaped and only
//! escaped when the tree is serialized with [`Node::to_html`]. Tests compare
//! [`Node::text_content`] the way a browser test would compare
//! `textContent`.

use crate::action::Action;
use std::fmt::Write;

/// A node in the rendered tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// An element with attributes and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: &'static str,
    pub attrs: Vec<(&'static str, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    pub fn id(self, id: &str) -> Self {
        self.attr("id", id)
    }

    pub fn class(self, class: &str) -> Self {
        self.attr("class", class)
    }

    /// Add `d-none` to the class list when `hidden` is true.
    pub fn hidden_if(self, hidden: bool) -> Self {
        if hidden {
            self.attr("class", "d-none")
        } else {
            self
        }
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn children(mut self, nodes: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(nodes);
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    /// Bind an action to this element through `data-*` attributes.
    pub fn action(mut self, action: Action) -> Self {
        self.attrs.extend(action.attrs());
        self
    }

    /// Value of the first attribute with this name.
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Whether any `class` attribute contains `class` as a whole word.
    pub fn has_class(&self, class: &str) -> bool {
        self.attrs
            .iter()
            .filter(|(n, _)| *n == "class")
            .any(|(_, v)| v.split_whitespace().any(|c| c == class))
    }

    pub fn is_hidden(&self) -> bool {
        self.has_class("d-none")
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Node::Element(el)
    }
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        }
    }

    /// Concatenated text of this node and all descendants, unescaped.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Text(t) => out.push_str(t),
            Node::Element(el) => {
                for child in &el.children {
                    child.collect_text(out);
                }
            }
        }
    }

    /// Depth-first search for the element with this `id`.
    pub fn find_by_id(&self, id: &str) -> Option<&Element> {
        self.find(&|el: &Element| el.get_attr("id") == Some(id))
    }

    /// First element matching the predicate, depth-first.
    pub fn find(&self, pred: &dyn Fn(&Element) -> bool) -> Option<&Element> {
        let el = self.as_element()?;
        if pred(el) {
            return Some(el);
        }
        el.children.iter().find_map(|c| c.find(pred))
    }

    /// Every element matching the predicate, depth-first.
    pub fn find_all<'a>(&'a self, pred: &dyn Fn(&Element) -> bool) -> Vec<&'a Element> {
        let mut found = Vec::new();
        self.collect_matching(pred, &mut found);
        found
    }

    fn collect_matching<'a>(&'a self, pred: &dyn Fn(&Element) -> bool, found: &mut Vec<&'a Element>) {
        if let Node::Element(el) = self {
            if pred(el) {
                found.push(el);
            }
            for child in &el.children {
                child.collect_matching(pred, found);
            }
        }
    }

    /// Serialize to HTML. Text and attribute values are escaped.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Node::Text(t) => out.push_str(&escape_html(t)),
            Node::Element(el) => {
                out.push('<');
                out.push_str(el.tag);
                for (name, value) in merged_attrs(&el.attrs) {
                    // Writing to a String cannot fail
                    let _ = write!(out, " {}=\"{}\"", name, escape_html(&value));
                }
                out.push('>');
                if is_void(el.tag) {
                    return;
                }
                for child in &el.children {
                    child.write_html(out);
                }
                out.push_str("</");
                out.push_str(el.tag);
                out.push('>');
            }
        }
    }
}

impl Element {
    pub fn text_content(&self) -> String {
        self.children.iter().map(Node::text_content).collect()
    }
}

/// Repeated `class` attributes are joined into one on output.
fn merged_attrs(attrs: &[(&'static str, String)]) -> Vec<(&'static str, String)> {
    let mut merged: Vec<(&'static str, String)> = Vec::with_capacity(attrs.len());
    for (name, value) in attrs {
        match merged.iter_mut().find(|(n, _)| *n == "class" && *name == "class") {
            Some((_, existing)) => {
                existing.push(' ');
                existing.push_str(value);
            }
            None => merged.push((*name, value.clone())),
        }
    }
    merged
}

fn is_void(tag: &str) -> bool {
    matches!(tag, "input" | "br" | "hr" | "img" | "meta")
}

/// Escape the five characters that are significant in HTML text and
/// attribute values.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
