//! Stack-of-open-elements tree construction.

use crate::attributes::parse_start_tag;
use crate::elements::{ImpliedEnd, implied_ends, is_void};
use crate::error::ParseError;
use crate::lexer::{MarkupKind, Token, tag_name};
use crate::tree::{Element, Node, Tree};

/// Builds a [`Tree`] from tokens, correcting unbalanced markup as it goes.
pub struct TreeBuilder {
    /// Top-level nodes completed so far.
    root: Vec<Node>,
    /// Open elements, outermost first. Each owns the children seen so far.
    open: Vec<Element>,
    nesting_limit: usize,
}

impl TreeBuilder {
    pub fn new(nesting_limit: usize) -> Self {
        Self {
            root: Vec::new(),
            open: Vec::new(),
            nesting_limit,
        }
    }

    pub fn push(&mut self, token: &Token<'_>) -> Result<(), ParseError> {
        match token.kind {
            // Text tokens only hold `<` when the lexer recovered a stray one
            MarkupKind::Text => self.append(Node::Text(token.text.replace('<', "&lt;"))),
            MarkupKind::RawText => self.append(Node::Text(token.text.to_string())),
            MarkupKind::Comment => {
                let body = token.text.trim_start_matches("<!--");
                let body = body.strip_suffix("-->").unwrap_or(body);
                self.append(Node::Comment(body.to_string()));
            }
            MarkupKind::StartTag => self.start_element(token.text)?,
            MarkupKind::EndTag => self.end_element(token.text),
            MarkupKind::Declaration | MarkupKind::ProcessingInstruction => {
                log::debug!("Dropping declaration {:?}", token.text);
            }
        }
        Ok(())
    }

    pub fn finish(mut self) -> Tree {
        while !self.open.is_empty() {
            self.close_top();
        }
        Tree::new(self.root)
    }

    fn start_element(&mut self, text: &str) -> Result<(), ParseError> {
        let tag = parse_start_tag(text);

        for implied in implied_ends(&tag.name) {
            if let Some(index) = self.find_open(implied) {
                self.close_from(index);
            }
        }

        let element = Element {
            name: tag.name,
            attributes: tag.attributes,
            children: Vec::new(),
        };

        if is_void(&element.name) || tag.self_closing {
            self.append(Node::Element(element));
            return Ok(());
        }

        if self.open.len() >= self.nesting_limit {
            return Err(ParseError::NestingTooDeep {
                limit: self.nesting_limit,
            });
        }
        self.open.push(element);
        Ok(())
    }

    fn end_element(&mut self, text: &str) {
        let name = tag_name(text);
        match self.open.iter().rposition(|e| e.name == name) {
            Some(index) => self.close_from(index),
            None => log::debug!("Dropping stray end tag </{name}>"),
        }
    }

    fn find_open(&self, implied: ImpliedEnd) -> Option<usize> {
        for (index, element) in self.open.iter().enumerate().rev() {
            if implied.closes.contains(&element.name.as_str()) {
                return Some(index);
            }
            if implied.stops_at.contains(&element.name.as_str()) {
                return None;
            }
        }
        None
    }

    /// Close the open element at `index` and everything opened after it.
    fn close_from(&mut self, index: usize) {
        while self.open.len() > index {
            self.close_top();
        }
    }

    fn close_top(&mut self) {
        if let Some(element) = self.open.pop() {
            self.append(Node::Element(element));
        }
    }

    fn append(&mut self, node: Node) {
        match self.open.last_mut() {
            Some(parent) => parent.children.push(node),
            None => self.root.push(node),
        }
    }
}
