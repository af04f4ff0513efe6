//! Source-encoding normalization.
//!
//! Everything inside the crate is UTF-8. Input is decoded from its source
//! encoding before tokenizing and re-encoded on the way out, so an entry
//! stored as Latin-1 survives a load/serialize cycle byte for byte.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// Encoding of the raw markup handed to [`load`](crate::load).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SourceEncoding {
    /// Invalid sequences become U+FFFD; a leading byte-order mark is dropped.
    #[default]
    Utf8,
    /// ISO-8859-1: every byte is the code point of the same value.
    Latin1,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown source encoding: {0:?}")]
pub struct UnknownEncoding(pub String);

impl SourceEncoding {
    /// Decode raw bytes to UTF-8 text. Never fails.
    pub fn decode(self, bytes: &[u8]) -> Cow<'_, str> {
        match self {
            SourceEncoding::Utf8 => {
                let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
                String::from_utf8_lossy(bytes)
            }
            SourceEncoding::Latin1 => Cow::Owned(bytes.iter().map(|&b| char::from(b)).collect()),
        }
    }

    /// Encode UTF-8 text back to this encoding.
    ///
    /// Characters Latin-1 cannot hold are written as numeric character
    /// references (`&#8217;`).
    pub fn encode(self, text: &str) -> Vec<u8> {
        match self {
            SourceEncoding::Utf8 => text.as_bytes().to_vec(),
            SourceEncoding::Latin1 => {
                let mut out = Vec::with_capacity(text.len());
                for c in text.chars() {
                    match u8::try_from(u32::from(c)) {
                        Ok(byte) => out.push(byte),
                        Err(_) => out.extend_from_slice(format!("&#{};", u32::from(c)).as_bytes()),
                    }
                }
                out
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SourceEncoding::Utf8 => "utf-8",
            SourceEncoding::Latin1 => "iso-8859-1",
        }
    }
}

impl FromStr for SourceEncoding {
    type Err = UnknownEncoding;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" => Ok(SourceEncoding::Utf8),
            "iso-8859-1" | "latin1" | "latin-1" => Ok(SourceEncoding::Latin1),
            _ => Err(UnknownEncoding(s.to_string())),
        }
    }
}

impl fmt::Display for SourceEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
