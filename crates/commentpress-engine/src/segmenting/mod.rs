//! Splitting an entry into commentable blocks.
//!
//! [`segment`] walks a loaded [`Tree`] in document order and claims the nodes
//! that become blocks, numbering them from [`SegmentOptions::start_offset`].
//! Each claimed root is annotated in place; content that is not block-shaped
//! on its own (loose inline runs, poetry lines, marker partitions) is first
//! wrapped in a `span` or `div`.

mod annotate;
mod builder;
pub mod classify;
pub mod types;
mod walk;

#[cfg(test)]
mod tests;

use commentpress_markup::{Tree, load_str, serialize};

use crate::error::SegmentError;
use crate::formatter::FormatterMode;
use crate::signature::text_signature;

pub use annotate::{PLACEHOLDER_CLASS, TEXTBLOCK_CLASS};
pub use classify::COMMENT_BLOCK_MARKER;
pub use types::{Block, BlockKind, ManifestEntry};

use builder::SegmentBuilder;
use types::collapse_whitespace;
use walk::{Scope, Split, segment_container};

/// Prefix used when the caller has no entry id to scope identifiers with.
pub const DEFAULT_PREFIX: &str = "textblock";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentOptions {
    pub mode: FormatterMode,
    /// Identifiers are `{prefix}-{sequence_index}`
    pub prefix: String,
    /// Sequence index of the first block, at least 1
    pub start_offset: usize,
    /// Insert an empty comment-icon span as each block's first child
    pub placeholders: bool,
}

impl Default for SegmentOptions {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX)
    }
}

impl SegmentOptions {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            mode: FormatterMode::default(),
            prefix: prefix.into(),
            start_offset: 1,
            placeholders: true,
        }
    }

    /// Options scoped to one entry: identifiers become `textblock-{post_id}-N`.
    pub fn for_post(post_id: u64) -> Self {
        Self::new(textblock_prefix(post_id))
    }

    pub fn with_mode(mut self, mode: FormatterMode) -> Self {
        self.mode = mode;
        self
    }

    /// Continue numbering from an earlier page of the same entry.
    pub fn with_start_offset(mut self, start_offset: usize) -> Self {
        self.start_offset = start_offset.max(1);
        self
    }

    pub fn with_placeholders(mut self, placeholders: bool) -> Self {
        self.placeholders = placeholders;
        self
    }
}

pub fn textblock_prefix(post_id: u64) -> String {
    format!("{DEFAULT_PREFIX}-{post_id}")
}

/// Pure function of its inputs: the same prefix and index always give the
/// same identifier.
pub fn textblock_identifier(prefix: &str, sequence_index: usize) -> String {
    format!("{prefix}-{sequence_index}")
}

/// The annotated tree plus one [`Block`] per claimed node, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segmentation {
    pub annotated: Tree,
    pub blocks: Vec<Block>,
}

impl Segmentation {
    pub fn annotated_markup(&self) -> String {
        serialize(&self.annotated)
    }

    pub fn manifest(&self) -> Vec<ManifestEntry> {
        self.blocks.iter().map(Block::manifest_entry).collect()
    }

    /// Identifiers in document order. Empty in plain mode.
    pub fn identifiers(&self) -> Vec<&str> {
        self.blocks
            .iter()
            .filter_map(|b| b.identifier.as_deref())
            .collect()
    }
}

pub fn segment(tree: Tree, options: &SegmentOptions) -> Segmentation {
    let split = match options.mode {
        FormatterMode::Prose => Split::Prose,
        FormatterMode::Poetry => Split::Poetry,
        FormatterMode::Plain => return segment_plain(tree, options),
    };

    let mut builder = SegmentBuilder::new(options);
    let children = segment_container(tree.children, None, split, Scope::default(), &mut builder);
    let blocks = builder.finish();
    log::debug!(
        "segmented entry into {} {} block(s)",
        blocks.len(),
        options.mode
    );

    Segmentation {
        annotated: Tree::new(children),
        blocks,
    }
}

/// Load UTF-8 markup and segment it.
pub fn segment_markup(markup: &str, options: &SegmentOptions) -> Result<Segmentation, SegmentError> {
    let tree = load_str(markup)?;
    Ok(segment(tree, options))
}

fn segment_plain(tree: Tree, options: &SegmentOptions) -> Segmentation {
    let text = collapse_whitespace(&tree.text_content());
    let block = Block {
        sequence_index: options.start_offset,
        identifier: None,
        kind: BlockKind::Whole,
        inner_html: serialize(&tree),
        text_signature: text_signature(&text),
        text,
    };
    Segmentation {
        annotated: tree,
        blocks: vec![block],
    }
}
