use crate::location::SourceSpan;
use std::fmt;

/// Error kinds for categorizing conversion errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvertErrorKind {
    /// Odd number of a bold, italic or code delimiter in plain text
    UnmatchedDelimiter,
    /// A parent node without a tag or without children reached serialization
    InvalidNode,
    /// No level-1 heading to take a page title from
    MissingHeading,
}

/// A conversion error with optional source location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertError {
    /// Human-readable error message
    pub message: String,
    /// Byte range of the block the error was raised in, when known
    pub span: Option<SourceSpan>,
    /// Error categorization
    pub kind: ConvertErrorKind,
}

impl ConvertError {
    /// Create an error for a delimiter that has no closing partner.
    pub fn unmatched_delimiter(delimiter: &str) -> Self {
        Self {
            message: format!("unmatched delimiter `{}`", delimiter),
            span: None,
            kind: ConvertErrorKind::UnmatchedDelimiter,
        }
    }

    /// Create an error for a node that cannot be serialized.
    pub fn invalid_node(reason: &str) -> Self {
        Self {
            message: format!("invalid node: {}", reason),
            span: None,
            kind: ConvertErrorKind::InvalidNode,
        }
    }

    /// Create an error for a document without a level-1 heading.
    pub fn missing_heading() -> Self {
        Self {
            message: "missing h1 heading".to_string(),
            span: None,
            kind: ConvertErrorKind::MissingHeading,
        }
    }

    /// Attach a source location, keeping an existing one.
    pub fn with_span(mut self, span: SourceSpan) -> Self {
        self.span.get_or_insert(span);
        self
    }

    /// Whether this error signals a broken internal invariant rather than a
    /// defect in the document.
    pub fn is_internal(&self) -> bool {
        matches!(self.kind, ConvertErrorKind::InvalidNode)
    }
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(span) = self.span {
            write!(f, " at bytes {}..{}", span.start, span.end)?;
        }
        Ok(())
    }
}

impl std::error::Error for ConvertError {}

/// A collection of conversion errors, one per failing block.
#[derive(Debug, Clone, Default)]
pub struct ConvertErrors {
    errors: Vec<ConvertError>,
}

impl ConvertErrors {
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Add an error to the collection.
    pub fn push(&mut self, error: ConvertError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Iterate over the errors in document order.
    pub fn iter(&self) -> impl Iterator<Item = &ConvertError> {
        self.errors.iter()
    }

    /// Check if any error comes from a broken invariant.
    pub fn has_internal(&self) -> bool {
        self.errors.iter().any(ConvertError::is_internal)
    }
}

impl IntoIterator for ConvertErrors {
    type Item = ConvertError;
    type IntoIter = std::vec::IntoIter<ConvertError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}
