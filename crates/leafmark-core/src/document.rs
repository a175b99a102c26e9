//! Block-to-HTML transformation and document assembly.
//!
//! Every block becomes one parent node; a document becomes a `div` wrapping
//! the nodes of all its blocks, in order. Blocks are converted independently
//! of each other, so a content error in one block never affects another.

use std::borrow::Cow;

use crate::block::{segment, Block, BlockKind, CODE_FENCE};
use crate::error::{ConvertError, ConvertErrorKind, ConvertErrors};
use crate::inline::{tokenize, Span};
use crate::location::SourceSpan;
use crate::node::{Node, Tag};

/// Tag of the node wrapping a whole document.
pub const ROOT_TAG: &str = "div";

const HEADING_TAGS: [&str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];

impl Block<'_> {
    /// Convert the block into its HTML subtree.
    ///
    /// Content errors carry the block's source span.
    pub fn to_node(&self) -> Result<Node, ConvertError> {
        self.build_node().map_err(|e| e.with_span(self.span))
    }

    fn build_node(&self) -> Result<Node, ConvertError> {
        match self.kind {
            BlockKind::Paragraph => {
                let text = self.lines().collect::<Vec<_>>().join(" ");
                Ok(Node::parent("p", inline_nodes(&text)?))
            }
            BlockKind::Heading => {
                let (marks, title) = self
                    .content
                    .split_once("# ")
                    .unwrap_or(("", self.content));
                Ok(Node::parent(
                    heading_tag(marks.len() + 1),
                    inline_nodes(title)?,
                ))
            }
            BlockKind::Code => {
                // Code is emitted verbatim, never tokenized.
                let inner = self
                    .content
                    .strip_prefix(CODE_FENCE)
                    .and_then(|rest| rest.strip_suffix(CODE_FENCE))
                    .unwrap_or("");
                let code = inner
                    .split('\n')
                    .filter(|line| !line.is_empty())
                    .collect::<Vec<_>>()
                    .join("\n");
                Ok(Node::parent("pre", vec![Node::leaf("code", code)]))
            }
            BlockKind::Quote => {
                let text = self
                    .lines()
                    .map(|line| line.strip_prefix('>').unwrap_or(line))
                    .collect::<Vec<_>>()
                    .join("\n");
                Ok(Node::parent("blockquote", inline_nodes(&text)?))
            }
            BlockKind::UnorderedList => list_node(
                "ul",
                self.lines()
                    .map(|line| line.strip_prefix("- ").unwrap_or(line)),
            ),
            BlockKind::OrderedList => list_node(
                "ol",
                self.lines()
                    .map(|line| line.split_once(". ").map_or(line, |(_, item)| item)),
            ),
        }
    }
}

fn inline_nodes(text: &str) -> Result<Vec<Node>, ConvertError> {
    Ok(tokenize(text)?.iter().map(Span::to_node).collect())
}

fn list_node<'a>(
    tag: &'static str,
    items: impl Iterator<Item = &'a str>,
) -> Result<Node, ConvertError> {
    let children = items
        .map(|item| Ok(Node::parent("li", inline_nodes(item)?)))
        .collect::<Result<Vec<_>, ConvertError>>()?;
    Ok(Node::parent(tag, children))
}

fn heading_tag(level: usize) -> Tag {
    match HEADING_TAGS.get(level.wrapping_sub(1)) {
        Some(tag) => Cow::Borrowed(*tag),
        None => Cow::Owned(format!("h{}", level)),
    }
}

/// A segmented document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document<'a> {
    /// Classified blocks in document order.
    pub blocks: Vec<Block<'a>>,
    /// Source span covering the entire document.
    pub span: SourceSpan,
}

impl<'a> Document<'a> {
    /// Segment and classify `input`.
    pub fn parse(input: &'a str) -> Self {
        Self {
            blocks: segment(input),
            span: SourceSpan::new(0, input.len() as u32),
        }
    }

    /// Convert every block and wrap the results in the root `div`.
    ///
    /// Stops at the first failing block.
    pub fn to_node(&self) -> Result<Node, ConvertError> {
        let children = self
            .blocks
            .iter()
            .map(Block::to_node)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Node::parent(ROOT_TAG, children))
    }

    /// Convert and serialize every block, collecting all errors instead of
    /// stopping at the first.
    ///
    /// The result is empty exactly when [`markdown_to_html`] would succeed.
    pub fn validate(&self) -> ConvertErrors {
        let mut errors = ConvertErrors::new();

        if self.blocks.is_empty() {
            errors.push(
                ConvertError::invalid_node("document without blocks").with_span(self.span),
            );
        }

        for block in &self.blocks {
            let result = block
                .to_node()
                .and_then(|node| node.to_html().map_err(|e| e.with_span(block.span)));
            if let Err(error) = result {
                log::debug!(
                    "block at {}..{} failed: {}",
                    block.span.start,
                    block.span.end,
                    error
                );
                errors.push(error);
            }
        }

        errors
    }
}

/// Convert a document into its root node.
pub fn document_to_node(text: &str) -> Result<Node, ConvertError> {
    Document::parse(text).to_node()
}

/// Convert a document straight to HTML.
///
/// ```rust
/// use leafmark_core::markdown_to_html;
///
/// let html = markdown_to_html("# Title\n\nSome **bold** text.").unwrap();
/// assert_eq!(html, "<div><h1>Title</h1><p>Some <b>bold</b> text.</p></div>");
/// ```
pub fn markdown_to_html(text: &str) -> Result<String, ConvertError> {
    let html = document_to_node(text)?.to_html()?;
    log::debug!("rendered {} bytes into {} bytes of html", text.len(), html.len());
    Ok(html)
}

/// Inline HTML of the root's first `h1` child.
///
/// Fails with [`ConvertErrorKind::MissingHeading`] when there is none.
pub fn extract_title(root: &Node) -> Result<String, ConvertError> {
    root.find_child("h1")
        .ok_or_else(ConvertError::missing_heading)?
        .inner_html()
}

/// A converted document: the HTML plus the page title, when there is one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub html: String,
    pub title: Option<String>,
}

impl Page {
    /// The title, or a `MissingHeading` error for drivers that need one.
    pub fn require_title(&self) -> Result<&str, ConvertError> {
        self.title.as_deref().ok_or_else(ConvertError::missing_heading)
    }
}

/// Convert a document and look up its title in one go.
pub fn convert(text: &str) -> Result<Page, ConvertError> {
    let root = document_to_node(text)?;
    let html = root.to_html()?;
    let title = match extract_title(&root) {
        Ok(title) => Some(title),
        Err(e) if e.kind == ConvertErrorKind::MissingHeading => None,
        Err(e) => return Err(e),
    };
    Ok(Page { html, title })
}
