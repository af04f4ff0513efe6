//! Document-order traversal that decides where blocks begin and end.
//!
//! Every container is handled the same way: if comment-block markers sit
//! among its children, the children are partitioned at them; otherwise runs
//! of inline content are grouped and every block-level child is visited in
//! turn. Claimed subtrees are never re-entered, which is what makes the
//! outermost qualifying element win.

use std::mem;

use commentpress_markup::elements::is_non_prose;
use commentpress_markup::{Element, Node};

use super::builder::SegmentBuilder;
use super::classify::{
    contains_line_break, contains_marker, holds_only_structure, is_inline, is_marker,
};
use super::types::BlockKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Split {
    /// One block per qualifying element
    Prose,
    /// One block per `<br>`-delimited line
    Poetry,
}

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Scope {
    in_blockquote: bool,
}

impl Scope {
    fn line_kind(self) -> BlockKind {
        if self.in_blockquote {
            BlockKind::BlockquoteLine
        } else {
            BlockKind::Line
        }
    }
}

/// Segment the children of `parent`, or of the document root when `None`.
pub(crate) fn segment_container(
    children: Vec<Node>,
    parent: Option<&str>,
    split: Split,
    scope: Scope,
    builder: &mut SegmentBuilder<'_>,
) -> Vec<Node> {
    if children.iter().any(is_marker) {
        return segment_partitions(children, parent, split, scope, builder);
    }

    let mut out = Vec::with_capacity(children.len());
    let mut run = vec![];
    for child in children {
        // Poetry descends into inline wrappers that hold line breaks
        let splits_lines =
            split == Split::Poetry && child.as_element().is_some_and(contains_line_break);
        if is_inline(&child) && !splits_lines {
            run.push(child);
            continue;
        }
        flush_run(mem::take(&mut run), &mut out, split, scope, builder);
        match child {
            Node::Element(element) => {
                out.push(segment_element(element, split, scope, builder).into())
            }
            other => out.push(other),
        }
    }
    flush_run(run, &mut out, split, scope, builder);
    out
}

fn segment_element(
    mut element: Element,
    split: Split,
    scope: Scope,
    builder: &mut SegmentBuilder<'_>,
) -> Element {
    if is_non_prose(&element.name) || element.is_void() {
        return element;
    }

    let scope = if element.name == "blockquote" {
        Scope {
            in_blockquote: true,
        }
    } else {
        scope
    };

    if split == Split::Prose
        && let Some(kind) = BlockKind::for_tag(&element.name)
        && !contains_marker(&element)
    {
        if element.has_meaningful_text() {
            builder.claim_element(&mut element, kind);
        } else {
            log::debug!("skipping empty <{}>", element.name);
        }
        return element;
    }

    element.children = segment_container(
        mem::take(&mut element.children),
        Some(element.name.as_str()),
        split,
        scope,
        builder,
    );
    element
}

fn flush_run(
    run: Vec<Node>,
    out: &mut Vec<Node>,
    split: Split,
    scope: Scope,
    builder: &mut SegmentBuilder<'_>,
) {
    match split {
        Split::Prose => wrap_trimmed(run, "span", BlockKind::Paragraph, out, builder),
        Split::Poetry => split_lines_into(run, out, scope.line_kind(), builder),
    }
}

/// Poetry: each `<br>`-delimited stretch of the run becomes its own block.
fn split_lines_into(
    run: Vec<Node>,
    out: &mut Vec<Node>,
    kind: BlockKind,
    builder: &mut SegmentBuilder<'_>,
) {
    let mut line = vec![];
    for node in run {
        if node.is_element("br") {
            wrap_trimmed(mem::take(&mut line), "span", kind, out, builder);
            out.push(node);
        } else {
            line.push(node);
        }
    }
    wrap_trimmed(line, "span", kind, out, builder);
}

/// Children between two markers (or a marker and either end).
fn segment_partitions(
    children: Vec<Node>,
    parent: Option<&str>,
    split: Split,
    scope: Scope,
    builder: &mut SegmentBuilder<'_>,
) -> Vec<Node> {
    let mut out = Vec::with_capacity(children.len());
    let mut partition = vec![];
    for child in children {
        if is_marker(&child) {
            flush_marked(
                mem::take(&mut partition),
                &mut out,
                parent,
                split,
                scope,
                builder,
            );
            out.push(child);
        } else {
            partition.push(child);
        }
    }
    flush_marked(partition, &mut out, parent, split, scope, builder);
    out
}

fn flush_marked(
    partition: Vec<Node>,
    out: &mut Vec<Node>,
    parent: Option<&str>,
    split: Split,
    scope: Scope,
    builder: &mut SegmentBuilder<'_>,
) {
    // Markers further down take over: the partition is segmented normally so
    // they can split the element that holds them. Lists and tables only
    // admit their own item and row elements, so no wrapper goes there either.
    let nested = partition
        .iter()
        .any(|n| n.as_element().is_some_and(contains_marker));
    if nested || parent.is_some_and(holds_only_structure) {
        out.extend(segment_container(partition, parent, split, scope, builder));
        return;
    }

    let wrapper = if partition.iter().all(is_inline) {
        "span"
    } else {
        "div"
    };
    wrap_trimmed(partition, wrapper, BlockKind::Marked, out, builder);
}

/// Claim `nodes` as one block inside a new `wrapper`, leaving blank text at
/// either edge outside it. Nodes without meaningful text pass through as-is.
fn wrap_trimmed(
    mut nodes: Vec<Node>,
    wrapper: &str,
    kind: BlockKind,
    out: &mut Vec<Node>,
    builder: &mut SegmentBuilder<'_>,
) {
    if !nodes.iter().any(Node::has_meaningful_text) {
        out.extend(nodes);
        return;
    }

    let leading = nodes.iter().take_while(|n| n.is_blank_text()).count();
    let trailing = nodes.iter().rev().take_while(|n| n.is_blank_text()).count();
    let tail = nodes.split_off(nodes.len() - trailing);
    let body = nodes.split_off(leading);

    out.extend(nodes);
    out.push(builder.claim_run(body, wrapper, kind));
    out.extend(tail);
}
