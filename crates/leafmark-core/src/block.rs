//! Block segmentation and classification.
//!
//! A document is cut into blocks at every blank line (`"\n\n"`). Each block
//! is trimmed, empty ones are dropped, and the rest are classified by a fixed
//! list of rules where the first match wins.
//!
//! # Performance
//!
//! - Zero-copy: block content borrows directly from the document
//! - Blank-line boundaries are located with `memchr::memmem`

use memchr::memmem;

use crate::location::SourceSpan;

/// Opening and closing marker of a code block.
pub const CODE_FENCE: &str = "```";

/// Deepest heading level.
pub const MAX_HEADING_LEVEL: usize = 6;

const BLOCK_SEPARATOR: &[u8] = b"\n\n";

/// Block classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    /// Anything that matches no other rule.
    Paragraph,
    /// `# Title` through `###### Title`.
    Heading,
    /// Text fenced by triple backticks.
    Code,
    /// Every line starts with `>`.
    Quote,
    /// Every line starts with `- `.
    UnorderedList,
    /// Lines numbered `1. `, `2. `, ... without gaps.
    OrderedList,
}

impl BlockKind {
    /// Snake-case name, as used in JSON output.
    pub const fn as_str(self) -> &'static str {
        match self {
            BlockKind::Paragraph => "paragraph",
            BlockKind::Heading => "heading",
            BlockKind::Code => "code",
            BlockKind::Quote => "quote",
            BlockKind::UnorderedList => "unordered_list",
            BlockKind::OrderedList => "ordered_list",
        }
    }
}

/// A classified block of document text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block<'a> {
    /// Trimmed block text.
    pub content: &'a str,
    pub kind: BlockKind,
    /// Byte range of `content` in the document.
    pub span: SourceSpan,
}

impl<'a> Block<'a> {
    /// Classify `content` and record where it came from.
    pub fn new(content: &'a str, span: SourceSpan) -> Self {
        Self {
            content,
            kind: classify(content),
            span,
        }
    }

    /// Classify a standalone piece of text.
    pub fn from_text(content: &'a str) -> Self {
        Self::new(content, SourceSpan::new(0, content.len() as u32))
    }

    /// Lines of the block, split on `\n` only.
    #[inline]
    pub fn lines(&self) -> std::str::Split<'a, char> {
        self.content.split('\n')
    }
}

/// Split a document into classified blocks.
///
/// ```rust
/// use leafmark_core::block::{segment, BlockKind};
///
/// let blocks = segment("# Title\n\nSome text\n\n- a\n- b\n");
/// let kinds: Vec<_> = blocks.iter().map(|b| b.kind).collect();
/// assert_eq!(kinds, [BlockKind::Heading, BlockKind::Paragraph, BlockKind::UnorderedList]);
/// ```
pub fn segment(document: &str) -> Vec<Block<'_>> {
    Segmenter::new(document).collect()
}

/// Iterator over the blocks of a document.
pub struct Segmenter<'a> {
    input: &'a str,
    offset: usize,
    finished: bool,
}

impl<'a> Segmenter<'a> {
    #[inline]
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            offset: 0,
            finished: false,
        }
    }

    /// Trim the chunk `[start, end)` and turn it into a block, unless it is
    /// blank.
    fn block_at(&self, start: usize, end: usize) -> Option<Block<'a>> {
        let chunk = &self.input[start..end];
        let content = chunk.trim();
        if content.is_empty() {
            return None;
        }

        let content_start = start + (chunk.len() - chunk.trim_start().len());
        let span = SourceSpan::new(
            content_start as u32,
            (content_start + content.len()) as u32,
        );
        let block = Block::new(content, span);
        log::debug!(
            "block {:?} at bytes {}..{}",
            block.kind,
            span.start,
            span.end
        );
        Some(block)
    }
}

impl<'a> Iterator for Segmenter<'a> {
    type Item = Block<'a>;

    fn next(&mut self) -> Option<Block<'a>> {
        while !self.finished {
            let start = self.offset;
            let end = match memmem::find(&self.input.as_bytes()[start..], BLOCK_SEPARATOR) {
                Some(pos) => {
                    self.offset = start + pos + BLOCK_SEPARATOR.len();
                    start + pos
                }
                None => {
                    self.finished = true;
                    self.input.len()
                }
            };

            if let Some(block) = self.block_at(start, end) {
                return Some(block);
            }
        }
        None
    }
}

/// Classify a trimmed block.
///
/// Rules, in priority order:
/// heading, code, quote, unordered list, ordered list, paragraph.
pub fn classify(text: &str) -> BlockKind {
    if heading_level(text).is_some() {
        BlockKind::Heading
    } else if text.starts_with(CODE_FENCE) && text.ends_with(CODE_FENCE) {
        BlockKind::Code
    } else if text.split('\n').all(|line| line.starts_with('>')) {
        BlockKind::Quote
    } else if text.split('\n').all(|line| line.starts_with("- ")) {
        BlockKind::UnorderedList
    } else if is_ordered_list(text) {
        BlockKind::OrderedList
    } else {
        BlockKind::Paragraph
    }
}

/// Level of a heading block: one to six `#`, a space, then at least one more
/// character.
pub fn heading_level(text: &str) -> Option<u8> {
    let level = text.bytes().take_while(|&b| b == b'#').count();
    if level == 0 || level > MAX_HEADING_LEVEL {
        return None;
    }
    let rest = &text[level..];
    if rest.len() > 1 && rest.starts_with(' ') {
        Some(level as u8)
    } else {
        None
    }
}

fn is_ordered_list(text: &str) -> bool {
    text.split('\n').enumerate().all(|(i, line)| {
        let number = (i + 1).to_string();
        line.strip_prefix(number.as_str())
            .is_some_and(|rest| rest.starts_with(". "))
    })
}
