//! Start-tag interior parsing.
//!
//! The markup lexer hands over a whole start tag (`<img src="a.png" alt=x />`);
//! this module splits it into a name, attributes and the self-closing flag
//! with a second, tiny Logos lexer. Malformed pieces (a value without a name,
//! an `=` with nothing after it) are dropped rather than reported.

use logos::Logos;

use crate::lexer::tag_name;
use crate::tree::Attribute;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f]+")]
enum AttrToken {
    #[token("=")]
    Equals,

    #[token("/")]
    Slash,

    #[regex(r#""[^"]*""#)]
    DoubleQuoted,

    #[regex(r"'[^']*'")]
    SingleQuoted,

    /// Attribute name or unquoted value
    #[regex(r#"[^\s"'=/>][^\s"'=>]*"#)]
    Word,
}

/// A parsed start tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartTag {
    pub name: String,
    pub attributes: Vec<Attribute>,
    pub self_closing: bool,
}

/// Parse the full text of a start tag, `<` through `>`.
pub fn parse_start_tag(tag: &str) -> StartTag {
    let name = tag_name(tag);
    let inner = tag
        .strip_prefix('<')
        .unwrap_or(tag)
        .strip_suffix('>')
        .unwrap_or(tag);
    let interior = inner
        .find(|c: char| c.is_ascii_whitespace() || c == '/')
        .map_or("", |at| &inner[at..]);

    let mut attributes: Vec<Attribute> = Vec::new();
    let mut pending: Option<Attribute> = None;
    let mut awaiting_value = false;
    let mut self_closing = false;

    let mut lexer = AttrToken::lexer(interior);
    while let Some(result) = lexer.next() {
        let slice = lexer.slice();
        self_closing = false;

        match result {
            Ok(AttrToken::Word) if awaiting_value => {
                if let Some(mut attribute) = pending.take() {
                    attribute.value = Some(slice.to_string());
                    push_unique(&mut attributes, attribute);
                }
                awaiting_value = false;
            }
            Ok(AttrToken::DoubleQuoted) if awaiting_value => {
                if let Some(mut attribute) = pending.take() {
                    attribute.value = Some(slice[1..slice.len() - 1].to_string());
                    push_unique(&mut attributes, attribute);
                }
                awaiting_value = false;
            }
            Ok(AttrToken::SingleQuoted) if awaiting_value => {
                if let Some(mut attribute) = pending.take() {
                    attribute.value = Some(slice[1..slice.len() - 1].replace('"', "&quot;"));
                    push_unique(&mut attributes, attribute);
                }
                awaiting_value = false;
            }
            Ok(AttrToken::Word) => {
                if let Some(attribute) = pending.take() {
                    push_unique(&mut attributes, attribute);
                }
                let (word, slashed) = match slice.strip_suffix('/') {
                    Some(word) => (word, true),
                    None => (slice, false),
                };
                pending = Some(Attribute {
                    name: word.to_ascii_lowercase(),
                    value: None,
                });
                self_closing = slashed;
            }
            Ok(AttrToken::Equals) if pending.is_some() => awaiting_value = true,
            Ok(AttrToken::Slash) => {
                awaiting_value = false;
                self_closing = true;
            }
            _ => log::debug!("Dropping malformed attribute text {slice:?} in <{name}>"),
        }
    }

    if let Some(attribute) = pending {
        push_unique(&mut attributes, attribute);
    }

    StartTag {
        name,
        attributes,
        self_closing,
    }
}

/// The first occurrence of an attribute wins, as in browsers.
fn push_unique(attributes: &mut Vec<Attribute>, attribute: Attribute) {
    if !attributes.iter().any(|a| a.name == attribute.name) {
        attributes.push(attribute);
    }
}
