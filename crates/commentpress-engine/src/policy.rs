//! Caller-side pre-check for skipping segmentation.
//!
//! Sites can choose not to anchor entries that have no comments and are
//! closed to new ones: there is nothing to show and nothing to attach. The
//! decision belongs to the caller, which runs it before calling
//! [`segment`](crate::segment); the segmenter never consults it.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsePolicy {
    /// Skip entries with zero comments whose comments are closed.
    pub skip_uncommented_closed: bool,
}

/// Comment facts about an entry, supplied by the comment store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryState {
    pub comment_count: usize,
    pub comments_open: bool,
}

impl ParsePolicy {
    pub fn should_segment(&self, entry: &EntryState) -> bool {
        !(self.skip_uncommented_closed && entry.comment_count == 0 && !entry.comments_open)
    }
}
