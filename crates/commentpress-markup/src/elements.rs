//! Element tables used while loading and serializing.

/// Elements that never have content and serialize as `<name />`.
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "keygen", "link", "meta", "param",
    "source", "track", "wbr",
];

/// Elements whose content is unparsed text up to the matching end tag.
pub const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style", "textarea", "title"];

/// Elements whose text is never rendered as document prose.
pub const NON_PROSE_ELEMENTS: &[&str] = &["script", "style", "template"];

/// Start tags that close an open `<p>`.
const CLOSES_PARAGRAPH: &[&str] = &[
    "address", "article", "aside", "blockquote", "dd", "details", "div", "dl", "dt", "fieldset",
    "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr",
    "li", "main", "menu", "nav", "ol", "p", "pre", "section", "table", "ul",
];

const PARAGRAPH_SCOPE: &[&str] = &["button", "caption", "object", "table", "td", "template", "th"];

pub fn is_void(name: &str) -> bool {
    VOID_ELEMENTS.contains(&name)
}

pub fn is_raw_text(name: &str) -> bool {
    RAW_TEXT_ELEMENTS.contains(&name)
}

pub fn is_non_prose(name: &str) -> bool {
    NON_PROSE_ELEMENTS.contains(&name)
}

/// An end tag implied by a start tag: close the nearest open element named in
/// `closes`, unless an element in `stops_at` is found first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ImpliedEnd {
    pub closes: &'static [&'static str],
    pub stops_at: &'static [&'static str],
}

/// The implied end tags for a start tag, applied in order.
pub(crate) fn implied_ends(name: &str) -> impl Iterator<Item = ImpliedEnd> {
    let paragraph = CLOSES_PARAGRAPH.contains(&name).then_some(ImpliedEnd {
        closes: &["p"],
        stops_at: PARAGRAPH_SCOPE,
    });

    let own = match name {
        "li" => Some(ImpliedEnd {
            closes: &["li"],
            stops_at: &["menu", "ol", "table", "ul"],
        }),
        "dt" | "dd" => Some(ImpliedEnd {
            closes: &["dt", "dd"],
            stops_at: &["dl", "table"],
        }),
        "tr" => Some(ImpliedEnd {
            closes: &["tr"],
            stops_at: &["table", "tbody", "tfoot", "thead"],
        }),
        "td" | "th" => Some(ImpliedEnd {
            closes: &["td", "th"],
            stops_at: &["table", "tr"],
        }),
        "tbody" | "tfoot" | "thead" => Some(ImpliedEnd {
            closes: &["tbody", "tfoot", "thead"],
            stops_at: &["table"],
        }),
        "option" => Some(ImpliedEnd {
            closes: &["option"],
            stops_at: &["datalist", "select"],
        }),
        _ => None,
    };

    paragraph.into_iter().chain(own)
}
