//! Source location tracking for blocks.
//!
//! Every [`Block`](crate::block::Block) records the byte range it was cut
//! from so that content errors can point back into the document.

/// A byte range in the source document.
///
/// Offsets are bytes, not characters. The range is half-open: `[start, end)`.
///
/// # Example
///
/// ```rust
/// use leafmark_core::location::SourceSpan;
///
/// let span = SourceSpan::new(4, 10);
/// assert_eq!(span.len(), 6);
/// assert!(span.contains(4));
/// assert!(!span.contains(10));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceSpan {
    /// Starting byte offset (inclusive).
    pub start: u32,
    /// Ending byte offset (exclusive).
    pub end: u32,
}

impl SourceSpan {
    /// Create a new span from byte offsets.
    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Length of the span in bytes.
    #[inline]
    pub const fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Check if this span contains a byte offset.
    #[inline]
    pub const fn contains(&self, offset: u32) -> bool {
        offset >= self.start && offset < self.end
    }

    /// Slice the spanned text out of the document it was produced from.
    ///
    /// Returns `None` if the span does not fall on char boundaries of `source`.
    #[inline]
    pub fn slice<'a>(&self, source: &'a str) -> Option<&'a str> {
        source.get(self.start as usize..self.end as usize)
    }
}
