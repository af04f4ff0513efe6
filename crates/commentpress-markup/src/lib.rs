//! # commentpress-markup
//!
//! Loads rendered HTML into an owned node tree and serializes it back as
//! XHTML-style markup, without the encoding and wrapper quirks of a
//! browser-grade DOM.
//!
//! ## Architecture Overview
//!
//! ```text
//! bytes → SourceEncoding → Lexer → Tokens → TreeBuilder → Tree → serialize
//!         (normalize)      (Logos)          (permissive)         (one pass)
//! ```
//!
//! ### 1. Encoding ([`encoding`] module)
//!
//! Input is decoded to UTF-8 up front and never fails: invalid UTF-8 is
//! replaced, Latin-1 maps byte for byte. [`serialize_encoded`] reverses the
//! step for callers that store entries in Latin-1.
//!
//! ### 2. Lexer ([`lexer`] module)
//!
//! A [Logos] lexer splits the text into tags, comments, declarations and
//! character data. Every byte lands in exactly one token.
//!
//! ### 3. Tree construction ([`parser`] module)
//!
//! A stack of open elements turns tokens into a [`Tree`], closing elements
//! that browsers would close implicitly and dropping stray end tags. Only a
//! truncated tag or runaway nesting is a [`ParseError`].
//!
//! ### 4. Serialization ([`serialize`](mod@serialize) module)
//!
//! Void elements self-terminate (`<br />`); all other elements always carry
//! an end tag. Text is written as stored, so for markup already in that
//! canonical form `serialize(load(m)) == m`.
//!
//! ## Quick Start
//!
//! ```
//! use commentpress_markup::{load_str, serialize};
//!
//! let mut tree = load_str("<p>Hello<br>world</p>").unwrap();
//! if let Some(p) = tree.children[0].as_element_mut() {
//!     p.set_attr("id", "textblock-1");
//! }
//! assert_eq!(serialize(&tree), r#"<p id="textblock-1">Hello<br />world</p>"#);
//! ```
//!
//! [Logos]: https://docs.rs/logos

pub mod attributes;
pub mod elements;
pub mod encoding;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod serialize;
pub mod tree;

pub use encoding::{SourceEncoding, UnknownEncoding};
pub use error::ParseError;
pub use parser::{DEFAULT_NESTING_LIMIT, LoadOptions, load, load_str, load_with};
pub use serialize::{serialize, serialize_encoded, serialize_node, serialize_nodes};
pub use tree::{Attribute, Element, Node, Tree};
