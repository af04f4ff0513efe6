//! # Lexer - Tokenizing HTML Source
//!
//! The first stage of loading: break markup into a flat sequence of tokens
//! using the [Logos] lexer generator.
//!
//! [Logos]: https://docs.rs/logos
//!
//! ## The Lossless Guarantee
//!
//! Every byte of the input appears in exactly one token. Nothing is skipped,
//! so concatenating token texts reproduces the input:
//!
//! ```
//! use commentpress_markup::lexer::lex;
//!
//! let input = "<p class=\"a\">Hello <em>world</em></p><!-- note -->";
//! let tokens = lex(input).unwrap();
//!
//! let reconstructed: String = tokens.iter().map(|t| t.text).collect();
//! assert_eq!(input, reconstructed);
//! ```
//!
//! ## Two Token Enums
//!
//! [`TokenKind`] is the enum Logos derives on. [`MarkupKind`] is what the rest
//! of the crate sees: it adds [`MarkupKind::RawText`], which Logos never
//! produces because raw text (`<script>` and friends) depends on the tag
//! that opened it. The tokenizer loop switches into raw-text scanning by hand
//! after such a start tag.
//!
//! ## Permissiveness
//!
//! A `<` that does not open a tag, comment or declaration is plain text,
//! the same way a browser treats `a < b`. The only lexing failure is a start
//! or end tag that runs off the end of the input.

use std::ops::Range;

use logos::{Lexer, Logos};

use crate::elements::is_raw_text;
use crate::error::ParseError;

/// Token kinds produced by the Logos lexer.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// `<!-- ... -->`; an unterminated comment runs to end of input
    #[token("<!--", comment)]
    Comment,

    /// `<!DOCTYPE ...>` or `<![CDATA[...]>`-style declarations
    #[regex(r"<![A-Za-z\[][^>]*>")]
    Declaration,

    /// `<?xml ...?>` processing instructions
    #[regex(r"<\?[^>]*>")]
    ProcessingInstruction,

    /// `<name ...>`, attributes scanned by the callback
    #[regex(r"<[A-Za-z][^\s/>]*", start_tag)]
    StartTag,

    /// `</name>`
    #[regex(r"</[A-Za-z][^>]*", end_tag)]
    EndTag,

    /// Character data between tags
    #[regex(r"[^<]+")]
    Text,
}

impl TokenKind {
    /// Convert to MarkupKind.
    pub fn to_markup_kind(self) -> MarkupKind {
        match self {
            TokenKind::Comment => MarkupKind::Comment,
            TokenKind::Declaration => MarkupKind::Declaration,
            TokenKind::ProcessingInstruction => MarkupKind::ProcessingInstruction,
            TokenKind::StartTag => MarkupKind::StartTag,
            TokenKind::EndTag => MarkupKind::EndTag,
            TokenKind::Text => MarkupKind::Text,
        }
    }
}

/// Token kinds seen by the tree builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkupKind {
    Comment,
    Declaration,
    ProcessingInstruction,
    StartTag,
    EndTag,
    Text,
    /// Unparsed content of `script`, `style`, `textarea` or `title`
    RawText,
}

/// A lexed token with its kind, text slice and byte span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: MarkupKind,
    pub text: &'a str,
    pub span: Range<usize>,
}

/// Lex the input into a sequence of tokens.
///
/// Guarantees that all bytes from the input appear in the output tokens.
pub fn lex(input: &str) -> Result<Vec<Token<'_>>, ParseError> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(input);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let text = lexer.slice();
        let kind = match result {
            Ok(token_kind) => token_kind.to_markup_kind(),
            Err(()) if is_truncated_tag(text) => {
                return Err(ParseError::UnterminatedTag { offset: span.start });
            }
            // A stray `<` (or `<!-`, `</ `) is character data
            Err(()) => MarkupKind::Text,
        };
        tokens.push(Token { kind, text, span });

        if kind == MarkupKind::StartTag
            && let Some(name) = raw_text_element(text)
        {
            if let Some(raw) = scan_raw_text(&mut lexer, &name) {
                tokens.push(raw);
            }
        }
    }

    Ok(tokens)
}

/// A start or end tag opener that never found its `>`.
fn is_truncated_tag(text: &str) -> bool {
    let Some(rest) = text.strip_prefix('<') else {
        return false;
    };
    let rest = rest.strip_prefix('/').unwrap_or(rest);
    rest.starts_with(|c: char| c.is_ascii_alphabetic())
}

/// Returns the lowercased element name when `tag` opens a raw-text element
/// that is not self-closed.
fn raw_text_element(tag: &str) -> Option<String> {
    let name = tag_name(tag);
    if is_raw_text(&name) && !tag.trim_end_matches('>').ends_with('/') {
        Some(name)
    } else {
        None
    }
}

/// Consume everything up to the matching `</name` as a single raw-text token.
fn scan_raw_text<'a>(lexer: &mut Lexer<'a, TokenKind>, name: &str) -> Option<Token<'a>> {
    let rest = lexer.remainder();
    let needle = format!("</{name}");
    // ASCII lowercasing keeps byte offsets intact.
    let len = rest
        .to_ascii_lowercase()
        .find(&needle)
        .unwrap_or(rest.len());
    if len == 0 {
        return None;
    }

    let start = lexer.span().end;
    lexer.bump(len);
    Some(Token {
        kind: MarkupKind::RawText,
        text: &rest[..len],
        span: start..start + len,
    })
}

/// Extract the lowercased element name from a start or end tag's text.
pub fn tag_name(tag: &str) -> String {
    tag.trim_start_matches('<')
        .trim_start_matches('/')
        .split(|c: char| c.is_ascii_whitespace() || c == '/' || c == '>')
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase()
}

fn comment(lex: &mut Lexer<TokenKind>) -> bool {
    let rest = lex.remainder();
    match rest.find("-->") {
        Some(end) => lex.bump(end + 3),
        None => lex.bump(rest.len()),
    }
    true
}

/// Scan to the closing `>`, skipping any `>` inside quoted attribute values.
fn start_tag(lex: &mut Lexer<TokenKind>) -> bool {
    let mut quote: Option<char> = None;
    let mut after_equals = false;

    for (i, c) in lex.remainder().char_indices() {
        if let Some(q) = quote {
            if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '>' => {
                lex.bump(i + 1);
                return true;
            }
            '"' | '\'' if after_equals => quote = Some(c),
            '=' => after_equals = true,
            c if c.is_whitespace() => {}
            _ => after_equals = false,
        }
    }
    false
}

fn end_tag(lex: &mut Lexer<TokenKind>) -> bool {
    if lex.remainder().starts_with('>') {
        lex.bump(1);
        true
    } else {
        false
    }
}
