//! # Parser - Token Stream to Node Tree
//!
//! Loading runs in three steps:
//!
//! ```text
//! bytes → SourceEncoding::decode → lexer::lex → TreeBuilder → Tree
//! ```
//!
//! The [`TreeBuilder`](builder::TreeBuilder) keeps a stack of open elements
//! and corrects markup the way a browser would, without the full HTML5
//! insertion-mode machinery:
//!
//! - start tags close elements they imply an end for (`<p>` closes an open
//!   `<p>`, `<li>` closes the previous `<li>`, and so on)
//! - end tags with no matching open element are dropped
//! - an end tag closes every element opened after its match
//! - elements still open at the end of input are closed
//! - `<x/>` on a non-void element yields an empty element
//! - doctypes, `<?xml?>` and other declarations are dropped
//!
//! Nothing is ever wrapped: loading `<p>a</p>` gives a tree whose only child
//! is that paragraph.
//!
//! ## Public API
//!
//! ```
//! use commentpress_markup::{load_str, serialize};
//!
//! let tree = load_str("<p>One<p>Two").unwrap();
//! assert_eq!(serialize(&tree), "<p>One</p><p>Two</p>");
//! ```

pub mod builder;

use crate::encoding::SourceEncoding;
use crate::error::ParseError;
use crate::lexer::lex;
use crate::tree::Tree;
use builder::TreeBuilder;

/// Default maximum element nesting depth.
pub const DEFAULT_NESTING_LIMIT: usize = 512;

/// Knobs for [`load_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    /// Deepest element nesting accepted before [`ParseError::NestingTooDeep`].
    pub nesting_limit: usize,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            nesting_limit: DEFAULT_NESTING_LIMIT,
        }
    }
}

/// Load raw markup in the given source encoding.
pub fn load(markup: &[u8], encoding: SourceEncoding) -> Result<Tree, ParseError> {
    load_with(markup, encoding, LoadOptions::default())
}

/// Load markup that is already UTF-8 text.
pub fn load_str(markup: &str) -> Result<Tree, ParseError> {
    parse(markup, LoadOptions::default())
}

pub fn load_with(
    markup: &[u8],
    encoding: SourceEncoding,
    options: LoadOptions,
) -> Result<Tree, ParseError> {
    let text = encoding.decode(markup);
    parse(&text, options)
}

fn parse(text: &str, options: LoadOptions) -> Result<Tree, ParseError> {
    let tokens = lex(text)?;
    let mut builder = TreeBuilder::new(options.nesting_limit);
    for token in &tokens {
        builder.push(token)?;
    }
    Ok(builder.finish())
}
