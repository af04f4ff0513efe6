//! Paragraph-level comment anchoring for CommentPress entries.
//!
//! ```
//! use commentpress_engine::{SegmentOptions, segment_markup};
//!
//! let options = SegmentOptions::for_post(7).with_placeholders(false);
//! let segmentation = segment_markup("<p>First</p><p>Second</p>", &options).unwrap();
//! assert_eq!(segmentation.identifiers(), ["textblock-7-1", "textblock-7-2"]);
//! ```

pub mod error;
pub mod formatter;
pub mod policy;
pub mod segmenting;
pub mod signature;

// Re-export key types for easier usage
pub use error::SegmentError;
pub use formatter::FormatterMode;
pub use policy::{EntryState, ParsePolicy};
pub use segmenting::{
    Block, BlockKind, COMMENT_BLOCK_MARKER, DEFAULT_PREFIX, ManifestEntry, SegmentOptions,
    Segmentation, segment, segment_markup, textblock_identifier, textblock_prefix,
};
pub use signature::{SignatureRegistry, text_signature};
