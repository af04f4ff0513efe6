/// Markup the loader cannot recover from.
///
/// Unbalanced or stray tags are not errors; they are corrected while the tree
/// is built. Byte offsets refer to the UTF-8 text after source-encoding
/// normalization.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Unterminated tag at byte {offset}")]
    UnterminatedTag { offset: usize },
    #[error("Element nesting exceeds the limit of {limit}")]
    NestingTooDeep { limit: usize },
}
