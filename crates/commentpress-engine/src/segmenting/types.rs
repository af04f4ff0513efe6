use serde::Serialize;

/// Structural kind of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockKind {
    /// `<p>`, or loose inline content outside any block-level element
    Paragraph,
    /// `<h1>` through `<h6>`
    Heading,
    /// `<li>`, `<dt>`, `<dd>`
    ListItem,
    Blockquote,
    /// `<td>`, `<th>`
    TableCell,
    /// `<pre>`
    Preformatted,
    /// A poetry line
    Line,
    /// A poetry line inside a blockquote
    BlockquoteLine,
    /// A span delimited by comment-block markers
    Marked,
    /// The implicit block of an unsegmented entry
    Whole,
}

impl BlockKind {
    /// The kind a block-level tag becomes in prose mode, if it qualifies.
    pub fn for_tag(name: &str) -> Option<Self> {
        match name {
            "p" => Some(BlockKind::Paragraph),
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => Some(BlockKind::Heading),
            "li" | "dt" | "dd" => Some(BlockKind::ListItem),
            "blockquote" => Some(BlockKind::Blockquote),
            "td" | "th" => Some(BlockKind::TableCell),
            "pre" => Some(BlockKind::Preformatted),
            _ => None,
        }
    }
}

/// One commentable unit of an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Block {
    /// 1-based position in document order, shifted by the start offset
    pub sequence_index: usize,
    /// `prefix-sequence_index`; `None` only for [`BlockKind::Whole`]
    pub identifier: Option<String>,
    pub kind: BlockKind,
    /// Markup of the block's content as it was before annotation
    pub inner_html: String,
    /// Decoded text with whitespace runs collapsed to single spaces
    pub text: String,
    pub text_signature: String,
}

impl Block {
    /// Character count of [`text`](Self::text).
    pub fn inner_text_length(&self) -> usize {
        self.text.chars().count()
    }

    /// Zero-based counter used by clients for anchor navigation.
    pub fn paragraph_number(&self) -> usize {
        self.sequence_index.saturating_sub(1)
    }

    pub fn manifest_entry(&self) -> ManifestEntry {
        ManifestEntry {
            sequence_index: self.sequence_index,
            identifier: self.identifier.clone(),
            kind: self.kind,
            inner_text_length: self.inner_text_length(),
            text_signature: self.text_signature.clone(),
        }
    }
}

/// What a comment store needs to fetch counts for every block in one batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestEntry {
    pub sequence_index: usize,
    pub identifier: Option<String>,
    pub kind: BlockKind,
    pub inner_text_length: usize,
    pub text_signature: String,
}

pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
