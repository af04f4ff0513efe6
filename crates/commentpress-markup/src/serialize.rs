//! XHTML-style serialization.
//!
//! One pass over the tree, no reconstruction:
//!
//! - void elements (see [`VOID_ELEMENTS`](crate::elements::VOID_ELEMENTS))
//!   self-terminate as `<br />`
//! - every other element gets an explicit end tag, even when empty
//!   (`<span></span>`, never `<span/>`)
//! - attribute values are double-quoted; boolean attributes are bare
//! - text and comments are written exactly as stored
//!
//! Nothing is added around the output: no doctype, no `<html>`/`<body>`.

use std::fmt::{self, Write};

use crate::encoding::SourceEncoding;
use crate::tree::{Element, Node, Tree};

/// Serialize a whole tree.
pub fn serialize(tree: &Tree) -> String {
    tree.to_string()
}

/// Serialize a single node and its subtree.
pub fn serialize_node(node: &Node) -> String {
    node.to_string()
}

/// Serialize a list of sibling nodes.
pub fn serialize_nodes(nodes: &[Node]) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = write_nodes(&mut out, nodes);
    out
}

/// Serialize and re-encode to the source encoding the tree was loaded from.
pub fn serialize_encoded(tree: &Tree, encoding: SourceEncoding) -> Vec<u8> {
    encoding.encode(&serialize(tree))
}

fn write_nodes<W: Write>(out: &mut W, nodes: &[Node]) -> fmt::Result {
    for node in nodes {
        write_node(out, node)?;
    }
    Ok(())
}

fn write_node<W: Write>(out: &mut W, node: &Node) -> fmt::Result {
    match node {
        Node::Text(text) => out.write_str(text),
        Node::Comment(body) => write!(out, "<!--{body}-->"),
        Node::Element(element) => write_element(out, element),
    }
}

fn write_element<W: Write>(out: &mut W, element: &Element) -> fmt::Result {
    write!(out, "<{}", element.name)?;
    for attribute in &element.attributes {
        match &attribute.value {
            Some(value) => write!(out, " {}=\"{}\"", attribute.name, value)?,
            None => write!(out, " {}", attribute.name)?,
        }
    }

    // Children of a void element have nowhere to go and are not written.
    if element.is_void() {
        return out.write_str(" />");
    }

    out.write_char('>')?;
    write_nodes(out, &element.children)?;
    write!(out, "</{}>", element.name)
}

impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_nodes(f, &self.children)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_node(f, self)
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_element(f, self)
    }
}
