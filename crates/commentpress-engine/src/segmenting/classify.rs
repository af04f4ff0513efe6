//! Node classification for the segmentation walk.
//!
//! Local facts only: whether a node is a comment-block marker, whether it can
//! sit inside a run of inline content, whether an element hides a marker or
//! a line break somewhere below it.

use commentpress_markup::elements::is_non_prose;
use commentpress_markup::{Element, Node};

/// Body of the authored comment that forces a block boundary:
/// `<!--commentblock-->`.
pub const COMMENT_BLOCK_MARKER: &str = "commentblock";

/// Phrasing elements: content that flows inside a line of text.
const PHRASING: &[&str] = &[
    "a", "abbr", "acronym", "audio", "b", "bdi", "bdo", "big", "br", "button", "canvas", "cite",
    "code", "data", "del", "dfn", "em", "embed", "font", "i", "iframe", "img", "input", "ins",
    "kbd", "label", "mark", "math", "meter", "object", "output", "picture", "progress", "q",
    "ruby", "s", "samp", "select", "small", "span", "strike", "strong", "sub", "sup", "svg",
    "textarea", "time", "tt", "u", "var", "video", "wbr",
];

pub fn is_marker(node: &Node) -> bool {
    matches!(node, Node::Comment(body) if body.trim() == COMMENT_BLOCK_MARKER)
}

pub fn contains_marker(element: &Element) -> bool {
    element.any_descendant(&is_marker)
}

/// A `<br>` somewhere below `element`.
pub fn contains_line_break(element: &Element) -> bool {
    element.any_descendant(&|n| n.is_element("br"))
}

/// Elements whose children must stay rows, items or sections, so marked
/// partitions inside them cannot be wrapped.
pub fn holds_only_structure(name: &str) -> bool {
    matches!(
        name,
        "ul" | "ol" | "menu" | "dl" | "table" | "thead" | "tbody" | "tfoot" | "tr"
    )
}

fn is_phrasing(name: &str) -> bool {
    PHRASING.contains(&name)
}

/// True when the node can be part of a run of inline content.
///
/// Text, comments, and phrasing elements qualify unless they carry a
/// block-level descendant or a marker; `script`/`style`/`template` are
/// carried along with their neighbours.
pub fn is_inline(node: &Node) -> bool {
    match node {
        Node::Text(_) => true,
        Node::Comment(_) => !is_marker(node),
        Node::Element(element) if is_non_prose(&element.name) => true,
        Node::Element(element) => {
            is_phrasing(&element.name)
                && !contains_marker(element)
                && !element.any_descendant(&|n| {
                    n.as_element()
                        .is_some_and(|e| !is_phrasing(&e.name) && !is_non_prose(&e.name))
                })
        }
    }
}
