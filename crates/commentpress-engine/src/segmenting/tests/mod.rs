//! Behavioural tests for the segmentation walk.
//!
//! Each case runs the invariant checks in [`invariants`] before asserting on
//! the specific output.


use commentpress_markup::{ParseError, load_str, serialize};
use insta::assert_snapshot;
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::error::SegmentError;
use crate::formatter::FormatterMode;
use crate::segmenting::{
    BlockKind, SegmentOptions, Segmentation, segment, segment_markup, textblock_identifier,
};

fn run(markup: &str, options: &SegmentOptions) -> Segmentation {
    let tree = load_str(markup).unwrap();
    let result = segment(tree.clone(), options);
    invariants::check(&tree, options, &result);
    result
}

fn prose() -> SegmentOptions {
    SegmentOptions::for_post(7).with_placeholders(false)
}

fn poetry() -> SegmentOptions {
    prose().with_mode(FormatterMode::Poetry)
}

fn kinds(result: &Segmentation) -> Vec<BlockKind> {
    result.blocks.iter().map(|b| b.kind).collect()
}

// Prose

#[test]
fn paragraphs_become_blocks() {
    let result = run("<p>First paragraph.</p><p>Second one.</p>", &prose());
    assert_snapshot!(result.annotated_markup(), @r#"<p id="textblock-7-1" data-textblock="1" data-para-num="0" data-textsig="Fp" class="textblock">First paragraph.</p><p id="textblock-7-2" data-textblock="2" data-para-num="1" data-textsig="So" class="textblock">Second one.</p>"#);
    assert_eq!(result.identifiers(), ["textblock-7-1", "textblock-7-2"]);
}

#[test]
fn placeholder_span_is_first_child() {
    let result = run("<p>Hi</p>", &SegmentOptions::default());
    assert_snapshot!(result.annotated_markup(), @r#"<p id="textblock-1" data-textblock="1" data-para-num="0" data-textsig="H" class="textblock"><span class="commenticonbox" data-textblock-id="textblock-1"></span>Hi</p>"#);
}

#[rstest]
#[case("<p>x</p>", BlockKind::Paragraph)]
#[case("<h2>x</h2>", BlockKind::Heading)]
#[case("<ul><li>x</li></ul>", BlockKind::ListItem)]
#[case("<dl><dt>x</dt></dl>", BlockKind::ListItem)]
#[case("<blockquote>x</blockquote>", BlockKind::Blockquote)]
#[case("<table><tr><th>x</th></tr></table>", BlockKind::TableCell)]
#[case("<pre>x</pre>", BlockKind::Preformatted)]
#[case("<div>x</div>", BlockKind::Paragraph)]
fn qualifying_elements(#[case] markup: &str, #[case] expected: BlockKind) {
    let result = run(markup, &prose());
    assert_eq!(kinds(&result), [expected]);
}

#[test]
fn nested_qualifying_elements_are_one_block() {
    let result = run(
        "<blockquote><p>Quoted</p><p>More</p></blockquote>",
        &prose(),
    );
    assert_eq!(kinds(&result), [BlockKind::Blockquote]);
    assert_eq!(result.blocks[0].inner_html, "<p>Quoted</p><p>More</p>");
}

#[test]
fn containers_are_descended() {
    let result = run(
        r#"<div class="entry"><h2>Title</h2><ul><li>One</li><li>Two</li></ul></div>"#,
        &prose(),
    );
    assert_eq!(
        kinds(&result),
        [BlockKind::Heading, BlockKind::ListItem, BlockKind::ListItem]
    );
    let div = result.annotated.children[0].as_element().unwrap();
    assert_eq!(div.attr("id"), None);
}

#[test]
fn loose_inline_runs_are_wrapped() {
    let result = run("Intro text <em>here</em>\n<p>Para</p>\ntail", &prose());
    assert_eq!(
        result.annotated_markup(),
        concat!(
            r#"<span id="textblock-7-1" data-textblock="1" data-para-num="0" data-textsig="Ith" class="textblock">Intro text <em>here</em></span>"#,
            "\n",
            r#"<p id="textblock-7-2" data-textblock="2" data-para-num="1" data-textsig="P" class="textblock">Para</p>"#,
            r#"<span id="textblock-7-3" data-textblock="3" data-para-num="2" data-textsig="t" class="textblock">"#,
            "\ntail</span>",
        )
    );
    assert_eq!(
        kinds(&result),
        [BlockKind::Paragraph, BlockKind::Paragraph, BlockKind::Paragraph]
    );
}

#[test]
fn blank_blocks_do_not_consume_indices() {
    let result = run(
        "<p>One</p><p> &nbsp; </p><p></p><p><!-- draft --></p><p>Two</p>",
        &SegmentOptions::default().with_placeholders(false),
    );
    assert_eq!(result.identifiers(), ["textblock-1", "textblock-2"]);
    assert!(result
        .annotated_markup()
        .contains("<p> &nbsp; </p><p></p><p><!-- draft --></p>"));
}

#[test]
fn script_content_is_not_text() {
    let result = run("<p><script>var x = 1;</script></p><p>Real</p>", &prose());
    assert_eq!(result.identifiers(), ["textblock-7-1"]);
    assert_eq!(result.blocks[0].text, "Real");
}

#[test]
fn authored_id_is_kept_aside() {
    let result = run(r#"<p id="intro" class="lead">Hi</p>"#, &prose());
    assert_snapshot!(result.annotated_markup(), @r#"<p id="textblock-7-1" class="lead textblock" data-original-id="intro" data-textblock="1" data-para-num="0" data-textsig="H">Hi</p>"#);
}

#[test]
fn start_offset_continues_numbering() {
    let result = run("<p>a</p><p>b</p>", &prose().with_start_offset(5));
    assert_eq!(result.identifiers(), ["textblock-7-5", "textblock-7-6"]);
    assert_eq!(result.blocks[0].paragraph_number(), 4);
    assert!(result.annotated_markup().contains(r#"data-para-num="5""#));
}

#[test]
fn zero_offset_is_clamped() {
    let options = prose().with_start_offset(0);
    assert_eq!(options.start_offset, 1);
}

#[test]
fn repeated_signatures_are_numbered() {
    let result = run("<p>Same words</p><p>Some wit</p><p>Sly wink</p>", &prose());
    let signatures: Vec<_> = result
        .blocks
        .iter()
        .map(|b| b.text_signature.as_str())
        .collect();
    assert_eq!(signatures, ["Sw", "Sw@2", "Sw@3"]);
}

#[test]
fn block_text_is_decoded_and_collapsed() {
    let result = run("<p>Fish &amp;\n   chips</p>", &prose());
    let block = &result.blocks[0];
    assert_eq!(block.text, "Fish & chips");
    assert_eq!(block.inner_html, "Fish &amp;\n   chips");
    assert_eq!(block.inner_text_length(), 12);
}

// Poetry

#[test]
fn poetry_splits_lines() {
    let result = run("<p>Line one<br/>Line two<br/>Line three</p>", &poetry());
    assert_snapshot!(result.annotated_markup(), @r#"<p><span id="textblock-7-1" data-textblock="1" data-para-num="0" data-textsig="Lo" class="textblock">Line one</span><br /><span id="textblock-7-2" data-textblock="2" data-para-num="1" data-textsig="Lt" class="textblock">Line two</span><br /><span id="textblock-7-3" data-textblock="3" data-para-num="2" data-textsig="Lt@2" class="textblock">Line three</span></p>"#);
    assert_eq!(kinds(&result), [BlockKind::Line; 3]);
}

#[test]
fn poetry_in_blockquote() {
    let result = run(
        "<blockquote><p>One<br>Two</p></blockquote><p>Three</p>",
        &poetry(),
    );
    assert_eq!(
        kinds(&result),
        [
            BlockKind::BlockquoteLine,
            BlockKind::BlockquoteLine,
            BlockKind::Line
        ]
    );
}

#[test]
fn poetry_skips_blank_lines() {
    let result = run("<p>One<br><br> <br>Two</p>", &poetry());
    assert_eq!(result.identifiers(), ["textblock-7-1", "textblock-7-2"]);
    assert!(result.annotated_markup().contains("<br /><br /> <br />"));
}

#[test]
fn poetry_keeps_inline_markup_in_line() {
    let result = run("<p><em>Bold</em> start<br>end</p>", &poetry());
    assert_eq!(result.blocks[0].inner_html, "<em>Bold</em> start");
    assert_eq!(result.blocks[1].inner_html, "end");
}

#[test]
fn poetry_splits_lines_inside_inline_wrappers() {
    let result = run("<p><em>Line one<br/>Line two</em></p>", &poetry());
    assert_snapshot!(result.annotated_markup(), @r#"<p><em><span id="textblock-7-1" data-textblock="1" data-para-num="0" data-textsig="Lo" class="textblock">Line one</span><br /><span id="textblock-7-2" data-textblock="2" data-para-num="1" data-textsig="Lt" class="textblock">Line two</span></em></p>"#);
    assert_eq!(kinds(&result), [BlockKind::Line; 2]);
}

#[test]
fn poetry_lines_around_a_broken_wrapper() {
    let result = run("<p>Lead <em>a<br>b</em> tail</p>", &poetry());
    let texts: Vec<_> = result.blocks.iter().map(|b| b.text.as_str()).collect();
    assert_eq!(texts, ["Lead", "a", "b", "tail"]);
}

#[test]
fn poetry_wraps_without_identifying_the_enclosing_element() {
    let result = run(r#"<p class="verse">Only line</p>"#, &poetry());
    let p = result.annotated.children[0].as_element().unwrap();
    assert_eq!(p.attr("id"), None);
    assert_eq!(p.attr("class").as_deref(), Some("verse"));
    assert!(p.children[0].is_element("span"));
}

// Comment-block markers

#[test]
fn markers_split_a_paragraph() {
    let result = run(
        "<p>A<!--commentblock-->B<!--commentblock-->C</p>",
        &prose(),
    );
    assert_snapshot!(result.annotated_markup(), @r#"<p><span id="textblock-7-1" data-textblock="1" data-para-num="0" data-textsig="A" class="textblock">A</span><!--commentblock--><span id="textblock-7-2" data-textblock="2" data-para-num="1" data-textsig="B" class="textblock">B</span><!--commentblock--><span id="textblock-7-3" data-textblock="3" data-para-num="2" data-textsig="C" class="textblock">C</span></p>"#);
    assert_eq!(kinds(&result), [BlockKind::Marked; 3]);
}

#[test]
fn markers_group_block_level_content() {
    let result = run(
        "<p>One</p>\n<p>Two</p>\n<!--commentblock-->\n<p>Three</p>",
        &prose(),
    );
    assert_eq!(kinds(&result), [BlockKind::Marked, BlockKind::Marked]);
    assert_eq!(result.blocks[0].inner_html, "<p>One</p>\n<p>Two</p>");
    assert_eq!(result.blocks[1].inner_html, "<p>Three</p>");
    assert!(result.annotated_markup().starts_with(r#"<div id="textblock-7-1""#));
    assert!(result.annotated_markup().contains("</div>\n<!--commentblock-->\n<div"));
}

#[test]
fn markers_apply_in_poetry() {
    let result = run("<p>A<br>B<!--commentblock-->C</p>", &poetry());
    assert_eq!(kinds(&result), [BlockKind::Marked, BlockKind::Marked]);
    assert_eq!(result.blocks[0].inner_html, "A<br />B");
}

#[test]
fn markers_inside_inline_elements() {
    let result = run("<p>Lead <em>a<!--commentblock-->b</em></p>", &prose());
    assert_eq!(
        kinds(&result),
        [BlockKind::Paragraph, BlockKind::Marked, BlockKind::Marked]
    );
    assert_eq!(result.blocks[0].text, "Lead");
}

#[test]
fn markers_between_list_items_add_no_wrapper() {
    let result = run("<ul><li>a</li><!--commentblock--><li>b</li></ul>", &prose());
    assert_eq!(kinds(&result), [BlockKind::ListItem, BlockKind::ListItem]);
    let markup = result.annotated_markup();
    assert!(!markup.contains("<div"));
    assert!(markup.contains("</li><!--commentblock--><li"));
}

#[test]
fn markers_between_table_rows_add_no_wrapper() {
    let result = run(
        "<table><tr><td>a</td></tr><!--commentblock--><tr><td>b</td></tr></table>",
        &prose(),
    );
    assert_eq!(kinds(&result), [BlockKind::TableCell, BlockKind::TableCell]);
    let markup = result.annotated_markup();
    assert!(!markup.contains("<div"));
    assert!(markup.contains("</tr><!--commentblock--><tr>"));
}

#[test]
fn leading_marker_creates_no_empty_block() {
    let result = run("<!--commentblock--><p>Only</p>", &prose());
    assert_eq!(result.identifiers(), ["textblock-7-1"]);
}

#[test]
fn other_comments_are_not_markers() {
    let result = run("<p>A<!--more-->B</p>", &prose());
    assert_eq!(kinds(&result), [BlockKind::Paragraph]);
}

// Plain and unknown modes

#[rstest]
#[case(FormatterMode::Plain)]
#[case(FormatterMode::resolve("bogus"))]
fn plain_mode_is_one_whole_block(#[case] mode: FormatterMode) {
    let markup = "<p>Hello world</p><p>Again</p>";
    let result = run(markup, &prose().with_mode(mode).with_start_offset(3));
    assert_eq!(result.annotated_markup(), markup);
    assert_eq!(kinds(&result), [BlockKind::Whole]);
    assert_eq!(result.blocks[0].sequence_index, 3);
    assert!(result.identifiers().is_empty());
}

// Entry points and properties

#[test]
fn segment_markup_propagates_parse_errors() {
    assert_eq!(
        segment_markup("<p>Broken <em", &prose()),
        Err(SegmentError::Parse(ParseError::UnterminatedTag { offset: 10 }))
    );
}

#[test]
fn empty_entry_has_no_blocks() {
    let result = run("", &prose());
    assert!(result.blocks.is_empty());
    assert_eq!(result.annotated_markup(), "");
}

#[test]
fn segmentation_is_deterministic() {
    let markup = "<h1>T</h1><p>A<!--commentblock-->B</p><ul><li>x</li></ul>";
    let first = segment_markup(markup, &prose()).unwrap();
    let second = segment_markup(markup, &prose()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn identifiers_are_pure() {
    assert_eq!(textblock_identifier("textblock-7", 3), "textblock-7-3");
    assert_eq!(
        textblock_identifier("textblock-7", 3),
        textblock_identifier("textblock-7", 3)
    );
}

#[test]
fn annotated_markup_reloads_unchanged() {
    let result = run(
        "<h1>Title</h1><p>Some <strong>bold</strong> text</p><ul><li>One</li></ul>",
        &SegmentOptions::default(),
    );
    let markup = result.annotated_markup();
    assert_eq!(serialize(&load_str(&markup).unwrap()), markup);
}

#[test]
fn manifest_serializes_for_the_comment_store() {
    let result = run("<p>Hello world</p>", &SegmentOptions::for_post(3));
    let json = serde_json::to_value(result.manifest()).unwrap();
    assert_eq!(
        json,
        serde_json::json!([{
            "sequence_index": 1,
            "identifier": "textblock-3-1",
            "kind": "paragraph",
            "inner_text_length": 11,
            "text_signature": "Hw",
        }])
    );
}
