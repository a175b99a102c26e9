//! Integration tests for block segmentation and classification

use leafmark_core::block::{heading_level, Segmenter};
use leafmark_core::{classify, segment, Block, BlockKind, SourceSpan};

// ============================================================================
// Classification Tests
// ============================================================================

#[test]
fn test_classify_each_kind() {
    let cases = [
        (BlockKind::Heading, "# This is a heading"),
        (
            BlockKind::Code,
            "```\nthis is a code block\nhere continues the code block\n```",
        ),
        (
            BlockKind::Quote,
            "> This is a quote block\n> This continues the quote block",
        ),
        (
            BlockKind::UnorderedList,
            "- This is the first list item\n- This is a list item",
        ),
        (BlockKind::OrderedList, "1. abcd\n2. efgh\n3. ijkl"),
        (
            BlockKind::Paragraph,
            "This is a paragraph of text. It has some **bold** words.",
        ),
    ];

    for (expected, text) in cases {
        assert_eq!(classify(text), expected, "classifying {:?}", text);
    }
}

#[test]
fn test_heading_levels() {
    for level in 1..=6 {
        let text = format!("{} Heading", "#".repeat(level));
        assert_eq!(classify(&text), BlockKind::Heading);
        assert_eq!(heading_level(&text), Some(level as u8));
    }
}

#[test]
fn test_heading_level_too_high() {
    assert_eq!(classify("####### too many"), BlockKind::Paragraph);
    assert_eq!(heading_level("####### too many"), None);
}

#[test]
fn test_heading_needs_space_and_text() {
    assert_eq!(classify(" # leading space"), BlockKind::Paragraph);
    assert_eq!(classify("#NoSpace"), BlockKind::Paragraph);
    assert_eq!(heading_level("#"), None);
    assert_eq!(heading_level("# "), None);
}

#[test]
fn test_code_fence_whole_block() {
    assert_eq!(classify("```code```"), BlockKind::Code);
    assert_eq!(classify("```\nmulti-line\ncode block\n```"), BlockKind::Code);
    assert_eq!(classify("```unterminated"), BlockKind::Paragraph);
    assert_eq!(classify(" ```indented```"), BlockKind::Paragraph);
}

#[test]
fn test_quote_every_line() {
    assert_eq!(classify(">no space\n>still quote"), BlockKind::Quote);
    assert_eq!(classify("> one\nbroken"), BlockKind::Paragraph);
    assert_eq!(classify(" > indented"), BlockKind::Paragraph);
}

#[test]
fn test_unordered_list_every_line() {
    assert_eq!(classify("- a\n- b"), BlockKind::UnorderedList);
    assert_eq!(classify("-a"), BlockKind::Paragraph);
    assert_eq!(classify("- a\n-b"), BlockKind::Paragraph);
    assert_eq!(classify(" - a"), BlockKind::Paragraph);
}

#[test]
fn test_ordered_list_sequence() {
    assert_eq!(classify("1. a\n2. b\n3. c"), BlockKind::OrderedList);
    assert_eq!(classify("1. a\n3. b"), BlockKind::Paragraph);
    assert_eq!(classify("2. starts late"), BlockKind::Paragraph);
    assert_eq!(classify("1.no space"), BlockKind::Paragraph);
    assert_eq!(classify(" 1. indented"), BlockKind::Paragraph);
}

#[test]
fn test_ordered_list_past_nine() {
    let text = (1..=11)
        .map(|i| format!("{}. item", i))
        .collect::<Vec<_>>()
        .join("\n");
    assert_eq!(classify(&text), BlockKind::OrderedList);
}

#[test]
fn test_heading_wins_over_other_rules() {
    assert_eq!(classify("# title ```"), BlockKind::Heading);
}

// ============================================================================
// Segmentation Tests
// ============================================================================

#[test]
fn test_segment_blocks() {
    let text = "
# This is a heading

This is a paragraph of text. It has some **bold** and _italic_ words inside of it.

- This is the first list item in a list block
- This is a list item
- This is another list item
";
    let blocks = segment(text);
    let contents: Vec<_> = blocks.iter().map(|b| b.content).collect();
    assert_eq!(
        contents,
        [
            "# This is a heading",
            "This is a paragraph of text. It has some **bold** and _italic_ words inside of it.",
            "- This is the first list item in a list block\n- This is a list item\n- This is another list item",
        ]
    );
    let kinds: Vec<_> = blocks.iter().map(|b| b.kind).collect();
    assert_eq!(
        kinds,
        [
            BlockKind::Heading,
            BlockKind::Paragraph,
            BlockKind::UnorderedList
        ]
    );
}

#[test]
fn test_segment_drops_blank_blocks() {
    let blocks = segment("\n\n\n\nfirst\n\n   \n\n\tsecond\t\n\n\n");
    let contents: Vec<_> = blocks.iter().map(|b| b.content).collect();
    assert_eq!(contents, ["first", "second"]);
}

#[test]
fn test_segment_empty_document() {
    assert!(segment("").is_empty());
    assert!(segment("\n\n  \n").is_empty());
}

#[test]
fn test_segment_spans_point_into_document() {
    let text = "  # Title\n\n  body text  ";
    let blocks = segment(text);
    assert_eq!(blocks[0].span, SourceSpan::new(2, 9));
    assert_eq!(blocks[1].span, SourceSpan::new(13, 22));
    for block in &blocks {
        assert_eq!(block.span.slice(text), Some(block.content));
    }
}

#[test]
fn test_segment_rejoin_reconstructs_trimmed_input() {
    let text = "# Title\n\nFirst paragraph\nwith two lines\n\n> quote\n\n1. one\n2. two";
    let rejoined = segment(text)
        .iter()
        .map(|b| b.content)
        .collect::<Vec<_>>()
        .join("\n\n");
    assert_eq!(rejoined, text.trim());
}

#[test]
fn test_segmenter_is_lazy_iterator() {
    let mut segmenter = Segmenter::new("a\n\nb\n\nc");
    assert_eq!(segmenter.next().map(|b| b.content), Some("a"));
    assert_eq!(segmenter.count(), 2);
}

#[test]
fn test_block_from_text() {
    let block = Block::from_text("1. This is a single-line item list");
    assert_eq!(block.kind, BlockKind::OrderedList);
    assert_eq!(block.span, SourceSpan::new(0, 34));
    assert_eq!(block.lines().count(), 1);
}
