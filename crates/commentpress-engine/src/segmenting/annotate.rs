//! Attribute injection on a block's root element.
//!
//! Clients find blocks by `id`, navigate by `data-para-num`, and drop the
//! comment icon into the `commenticonbox` placeholder span.

use commentpress_markup::{Element, Node};

use super::types::Block;

pub const TEXTBLOCK_CLASS: &str = "textblock";
pub const PLACEHOLDER_CLASS: &str = "commenticonbox";

pub(crate) fn annotate(element: &mut Element, block: &Block, placeholders: bool) {
    let Some(identifier) = block.identifier.as_deref() else {
        return;
    };

    // An authored id would otherwise be lost.
    let authored_id = element.attr("id").map(|id| id.into_owned());
    if let Some(authored_id) = authored_id.filter(|id| id != identifier) {
        element.set_attr("data-original-id", &authored_id);
    }

    element.set_attr("id", identifier);
    element.set_attr("data-textblock", &block.sequence_index.to_string());
    element.set_attr("data-para-num", &block.paragraph_number().to_string());
    if !block.text_signature.is_empty() {
        element.set_attr("data-textsig", &block.text_signature);
    }
    element.add_class(TEXTBLOCK_CLASS);

    if placeholders {
        element.children.insert(0, placeholder(identifier));
    }
}

fn placeholder(identifier: &str) -> Node {
    let mut span = Element::new("span");
    span.set_attr("class", PLACEHOLDER_CLASS);
    span.set_attr("data-textblock-id", identifier);
    span.into()
}
