use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SegmentError;

/// Which nodes of an entry become commentable blocks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatterMode {
    /// One block per block-level element (paragraph, heading, list item, ...)
    #[default]
    Prose,
    /// One block per line, split at `<br>` inside block-level elements
    Poetry,
    /// No segmentation: the whole entry is one implicit block
    Plain,
}

impl FormatterMode {
    /// Parse a mode name, degrading to [`FormatterMode::Plain`] for anything
    /// unrecognized so an entry always renders.
    pub fn resolve(name: &str) -> Self {
        name.parse().unwrap_or_else(|err| {
            log::warn!("{err}; falling back to plain formatting");
            FormatterMode::Plain
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FormatterMode::Prose => "prose",
            FormatterMode::Poetry => "poetry",
            FormatterMode::Plain => "plain",
        }
    }
}

impl FromStr for FormatterMode {
    type Err = SegmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "prose" => Ok(FormatterMode::Prose),
            "poetry" => Ok(FormatterMode::Poetry),
            "plain" => Ok(FormatterMode::Plain),
            _ => Err(SegmentError::UnknownFormatterMode(s.to_string())),
        }
    }
}

impl fmt::Display for FormatterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("prose", FormatterMode::Prose)]
    #[case("Poetry", FormatterMode::Poetry)]
    #[case(" plain ", FormatterMode::Plain)]
    fn parses_known_modes(#[case] name: &str, #[case] expected: FormatterMode) {
        assert_eq!(name.parse::<FormatterMode>(), Ok(expected));
    }

    #[test]
    fn unknown_mode_is_an_error_from_parse() {
        assert_eq!(
            "bogus".parse::<FormatterMode>(),
            Err(SegmentError::UnknownFormatterMode("bogus".into()))
        );
    }

    #[test]
    fn unknown_mode_resolves_to_plain() {
        assert_eq!(FormatterMode::resolve("bogus"), FormatterMode::Plain);
        assert_eq!(FormatterMode::resolve("poetry"), FormatterMode::Poetry);
    }

    #[test]
    fn display_matches_parse() {
        for mode in [
            FormatterMode::Prose,
            FormatterMode::Poetry,
            FormatterMode::Plain,
        ] {
            assert_eq!(mode.to_string().parse::<FormatterMode>(), Ok(mode));
        }
    }
}
