//! The owned node tree produced by [`load`](crate::load).
//!
//! Text and attribute values are kept exactly as authored, entities and all,
//! so that serializing an untouched tree gives back the input. Use
//! [`Node::text_content`] or [`Element::attr`] for decoded views, and the
//! setter [`Element::set_attr`] to add values that get escaped on the way
//! in.

use std::borrow::Cow;

use crate::elements::{is_non_prose, is_void};

/// A loaded document fragment.
///
/// The tree holds only what the markup contained: no `<html>`/`<body>`
/// wrapper or doctype is ever added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    pub children: Vec<Node>,
}

/// A node in the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    /// Character data in its escaped, as-authored form
    Text(String),
    /// Comment body, without the `<!--` and `-->` delimiters
    Comment(String),
}

/// An element with its attributes and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Lowercased tag name
    pub name: String,
    pub attributes: Vec<Attribute>,
    pub children: Vec<Node>,
}

/// An attribute; `value` is `None` for bare boolean attributes.
///
/// Values are stored escaped, ready to sit between double quotes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: Option<String>,
}

impl Tree {
    pub fn new(children: Vec<Node>) -> Self {
        Self { children }
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Decoded text of the whole tree; see [`Node::text_content`].
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.collect_text(&mut out);
        }
        out
    }
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }

    /// True when this is an element with the given (lowercase) name.
    pub fn is_element(&self, name: &str) -> bool {
        self.as_element().is_some_and(|e| e.name == name)
    }

    /// True for text nodes that decode to nothing but whitespace.
    pub fn is_blank_text(&self) -> bool {
        match self {
            Node::Text(text) => html_escape::decode_html_entities(text)
                .chars()
                .all(char::is_whitespace),
            _ => false,
        }
    }

    /// Decoded character data below this node.
    ///
    /// Comments and the content of `script`, `style` and `template` are not
    /// document text and are left out.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    /// True when [`text_content`](Self::text_content) has a non-whitespace
    /// character. Non-breaking spaces count as whitespace.
    pub fn has_meaningful_text(&self) -> bool {
        match self {
            Node::Text(text) => !html_escape::decode_html_entities(text)
                .chars()
                .all(char::is_whitespace),
            Node::Comment(_) => false,
            Node::Element(element) => element.has_meaningful_text(),
        }
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(&html_escape::decode_html_entities(text)),
            Node::Comment(_) => {}
            Node::Element(element) => element.collect_text(out),
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    pub fn is_void(&self) -> bool {
        is_void(&self.name)
    }

    /// Decoded value of an attribute. Boolean attributes decode to `""`.
    pub fn attr(&self, name: &str) -> Option<Cow<'_, str>> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| match &a.value {
                Some(value) => html_escape::decode_html_entities(value),
                None => Cow::Borrowed(""),
            })
    }

    /// Set an attribute from an unescaped value, replacing any existing one
    /// in place so attribute order stays stable.
    pub fn set_attr(&mut self, name: &str, value: &str) {
        let value = Some(html_escape::encode_double_quoted_attribute(value).into_owned());
        match self.attributes.iter_mut().find(|a| a.name == name) {
            Some(existing) => existing.value = value,
            None => self.attributes.push(Attribute {
                name: name.to_string(),
                value,
            }),
        }
    }

    /// Whitespace-separated entries of the `class` attribute.
    pub fn classes(&self) -> Vec<String> {
        self.attr("class")
            .map(|c| c.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// Append a class unless it is already present.
    pub fn add_class(&mut self, class: &str) {
        let mut classes = self.classes();
        if classes.iter().any(|c| c == class) {
            return;
        }
        classes.push(class.to_string());
        self.set_attr("class", &classes.join(" "));
    }

    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    pub fn has_meaningful_text(&self) -> bool {
        !is_non_prose(&self.name) && self.children.iter().any(Node::has_meaningful_text)
    }

    /// Depth-first search for a descendant node matching `predicate`.
    pub fn any_descendant(&self, predicate: &impl Fn(&Node) -> bool) -> bool {
        self.children.iter().any(|child| {
            predicate(child) || child.as_element().is_some_and(|e| e.any_descendant(predicate))
        })
    }

    fn collect_text(&self, out: &mut String) {
        if is_non_prose(&self.name) {
            return;
        }
        for child in &self.children {
            child.collect_text(out);
        }
    }
}
