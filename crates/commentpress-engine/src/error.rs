use commentpress_markup::ParseError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SegmentError {
    #[error("Failed to parse entry markup: {0}")]
    Parse(#[from] ParseError),
    /// Only surfaced by [`FormatterMode::from_str`](std::str::FromStr);
    /// the segmenter itself falls back to plain.
    #[error("Unknown formatter mode: {0:?}")]
    UnknownFormatterMode(String),
}
