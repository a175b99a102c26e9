//! # Leafmark Core
//!
//! Converts a small Markdown dialect into HTML.
//!
//! Conversion runs in two stages. The document is first cut into blocks at
//! blank lines and each block is classified (heading, code, quote, lists,
//! paragraph). Each block's text is then tokenized into inline spans (bold,
//! italic, code, links, images) and turned into a tree of HTML nodes, which
//! serializes to markup.
//!
//! ## Quick Start
//!
//! ```rust
//! use leafmark_core::markdown_to_html;
//!
//! let html = markdown_to_html("# Hello\n\nThis is a **paragraph**.").unwrap();
//! assert_eq!(html, "<div><h1>Hello</h1><p>This is a <b>paragraph</b>.</p></div>");
//! ```
//!
//! ## Page titles
//!
//! Drivers that publish pages usually need the first level-1 heading:
//!
//! ```rust
//! use leafmark_core::convert;
//!
//! let page = convert("# Welcome\n\nHello.").unwrap();
//! assert_eq!(page.title.as_deref(), Some("Welcome"));
//!
//! let untitled = convert("Just text.").unwrap();
//! assert!(untitled.require_title().is_err());
//! ```
//!
//! ## Errors
//!
//! Unpaired `` ` ``, `_` or `**` delimiters make the whole conversion fail.
//! [`Document::validate`] reports every failing block at once.

pub mod block;
pub mod document;
pub mod error;
pub mod inline;
pub mod location;
pub mod node;

pub use block::{classify, segment, Block, BlockKind};
pub use document::{convert, document_to_node, extract_title, markdown_to_html, Document, Page};
pub use error::{ConvertError, ConvertErrorKind, ConvertErrors};
pub use inline::{tokenize, Span, SpanKind};
pub use location::SourceSpan;
pub use node::{AttrValue, Node};
