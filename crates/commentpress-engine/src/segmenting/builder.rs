use commentpress_markup::{Element, Node, serialize_nodes};

use super::{
    SegmentOptions,
    annotate::annotate,
    textblock_identifier,
    types::{Block, BlockKind, collapse_whitespace},
};
use crate::signature::{SignatureRegistry, text_signature};

/// Hands out sequence numbers and records blocks as the walk claims them.
pub(crate) struct SegmentBuilder<'o> {
    options: &'o SegmentOptions,
    next_index: usize,
    signatures: SignatureRegistry,
    blocks: Vec<Block>,
}

impl<'o> SegmentBuilder<'o> {
    pub fn new(options: &'o SegmentOptions) -> Self {
        Self {
            options,
            next_index: options.start_offset,
            signatures: SignatureRegistry::new(),
            blocks: vec![],
        }
    }

    /// Make `element` a block root. The caller has checked that it carries
    /// meaningful text.
    pub fn claim_element(&mut self, element: &mut Element, kind: BlockKind) {
        let block = self.record(kind, element);
        annotate(element, &block, self.options.placeholders);
        self.blocks.push(block);
    }

    /// Wrap a run of sibling nodes in a fresh `wrapper` element and claim it.
    pub fn claim_run(&mut self, nodes: Vec<Node>, wrapper: &str, kind: BlockKind) -> Node {
        let mut element = Element::new(wrapper).with_children(nodes);
        self.claim_element(&mut element, kind);
        element.into()
    }

    pub fn finish(self) -> Vec<Block> {
        self.blocks
    }

    fn record(&mut self, kind: BlockKind, element: &Element) -> Block {
        let sequence_index = self.next_index;
        self.next_index += 1;

        let text = collapse_whitespace(&element.text_content());
        let text_signature = self.signatures.register(text_signature(&text));
        log::trace!("block {sequence_index} ({kind:?}): {text_signature}");

        Block {
            sequence_index,
            identifier: Some(textblock_identifier(&self.options.prefix, sequence_index)),
            kind,
            inner_html: serialize_nodes(&element.children),
            text,
            text_signature,
        }
    }
}
