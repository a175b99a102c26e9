//! Inline span tokenizer.
//!
//! Text is cut into typed spans by five passes run in a fixed order. Each
//! pass only looks at spans that are still plain, so styles never nest:
//!
//! 1. `` `code` ``
//! 2. `_italic_`
//! 3. `**bold**`
//! 4. `![alt](url)`
//! 5. `[text](url)`
//!
//! Images are matched before links because both share the bracket syntax.
//! All scanning borrows from the input; no pass allocates new text.

use std::borrow::Cow;

use memchr::{memchr, memchr_iter, memmem};

use crate::error::ConvertError;

/// Borrowed or owned string type for zero-copy tokenizing.
pub type CowStr<'a> = Cow<'a, str>;

/// Inline span classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpanKind {
    /// Unstyled text.
    Plain,
    /// `**bold**`
    Bold,
    /// `_italic_`
    Italic,
    /// `` `code` ``
    Code,
    /// `[text](url)`
    Link,
    /// `![alt](url)`
    Image,
}

impl SpanKind {
    /// Lowercase name, as used in JSON output.
    pub const fn as_str(self) -> &'static str {
        match self {
            SpanKind::Plain => "plain",
            SpanKind::Bold => "bold",
            SpanKind::Italic => "italic",
            SpanKind::Code => "code",
            SpanKind::Link => "link",
            SpanKind::Image => "image",
        }
    }
}

/// A typed fragment of inline text.
///
/// For links `content` is the link text, for images it is the alt text.
/// `target` carries the url and is only set for links and images.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span<'a> {
    pub content: CowStr<'a>,
    pub kind: SpanKind,
    pub target: Option<CowStr<'a>>,
}

impl<'a> Span<'a> {
    /// Create a plain text span.
    pub fn plain(content: impl Into<CowStr<'a>>) -> Self {
        Self::styled(content, SpanKind::Plain)
    }

    /// Create a span of the given kind without a target.
    pub fn styled(content: impl Into<CowStr<'a>>, kind: SpanKind) -> Self {
        Self {
            content: content.into(),
            kind,
            target: None,
        }
    }

    /// Create a link span.
    pub fn link(text: impl Into<CowStr<'a>>, url: impl Into<CowStr<'a>>) -> Self {
        Self {
            content: text.into(),
            kind: SpanKind::Link,
            target: Some(url.into()),
        }
    }

    /// Create an image span.
    pub fn image(alt: impl Into<CowStr<'a>>, url: impl Into<CowStr<'a>>) -> Self {
        Self {
            content: alt.into(),
            kind: SpanKind::Image,
            target: Some(url.into()),
        }
    }

    /// Detach the span from the text it was tokenized from.
    pub fn into_owned(self) -> Span<'static> {
        Span {
            content: Cow::Owned(self.content.into_owned()),
            kind: self.kind,
            target: self.target.map(|t| Cow::Owned(t.into_owned())),
        }
    }
}

/// Tokenize inline text into spans.
///
/// Fails with [`ConvertErrorKind::UnmatchedDelimiter`](crate::ConvertErrorKind)
/// when a plain stretch of text holds an odd number of one of the pair
/// delimiters.
///
/// ```rust
/// use leafmark_core::inline::{tokenize, Span, SpanKind};
///
/// let spans = tokenize("a **b** c").unwrap();
/// assert_eq!(
///     spans,
///     vec![Span::plain("a "), Span::styled("b", SpanKind::Bold), Span::plain(" c")]
/// );
/// ```
pub fn tokenize(text: &str) -> Result<Vec<Span<'_>>, ConvertError> {
    let mut pieces = vec![Piece::plain(text)];

    pieces = split_delimiter(pieces, "`", SpanKind::Code)?;
    pieces = split_delimiter(pieces, "_", SpanKind::Italic)?;
    pieces = split_delimiter(pieces, "**", SpanKind::Bold)?;
    pieces = split_pattern(pieces, Marker::Image);
    pieces = split_pattern(pieces, Marker::Link);

    log::trace!("tokenized {} bytes into {} spans", text.len(), pieces.len());

    Ok(pieces.into_iter().map(Piece::into_span).collect())
}

/// Working representation while the passes run: every slice borrows the
/// original text.
#[derive(Debug, Clone, Copy)]
struct Piece<'a> {
    text: &'a str,
    kind: SpanKind,
    target: Option<&'a str>,
}

impl<'a> Piece<'a> {
    #[inline]
    fn plain(text: &'a str) -> Self {
        Self {
            text,
            kind: SpanKind::Plain,
            target: None,
        }
    }

    #[inline]
    fn into_span(self) -> Span<'a> {
        Span {
            content: Cow::Borrowed(self.text),
            kind: self.kind,
            target: self.target.map(Cow::Borrowed),
        }
    }
}

#[inline]
fn push_fragment<'a>(out: &mut Vec<Piece<'a>>, text: &'a str, kind: SpanKind) {
    if !text.is_empty() {
        out.push(Piece {
            text,
            kind,
            target: None,
        });
    }
}

/// Split plain pieces on a fixed delimiter. Fragments alternate between plain
/// and `kind`, starting with plain.
fn split_delimiter<'a>(
    pieces: Vec<Piece<'a>>,
    delimiter: &str,
    kind: SpanKind,
) -> Result<Vec<Piece<'a>>, ConvertError> {
    let finder = memmem::Finder::new(delimiter);
    let mut out = Vec::with_capacity(pieces.len() * 2);

    for piece in pieces {
        if piece.kind != SpanKind::Plain {
            out.push(piece);
            continue;
        }

        let hits: Vec<usize> = finder.find_iter(piece.text.as_bytes()).collect();
        if hits.is_empty() {
            out.push(piece);
            continue;
        }
        if hits.len() % 2 != 0 {
            return Err(ConvertError::unmatched_delimiter(delimiter));
        }

        let mut start = 0;
        for (i, &hit) in hits.iter().enumerate() {
            let fragment_kind = if i % 2 == 0 { SpanKind::Plain } else { kind };
            push_fragment(&mut out, &piece.text[start..hit], fragment_kind);
            start = hit + delimiter.len();
        }
        push_fragment(&mut out, &piece.text[start..], SpanKind::Plain);
    }

    log::trace!("{:?} pass on `{}` produced {} pieces", kind, delimiter, out.len());
    Ok(out)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Marker {
    Image,
    Link,
}

impl Marker {
    const fn kind(self) -> SpanKind {
        match self {
            Marker::Image => SpanKind::Image,
            Marker::Link => SpanKind::Link,
        }
    }
}

/// A located `[label](url)` construct, with byte offsets relative to the
/// scanned text.
struct Found<'a> {
    start: usize,
    end: usize,
    label: &'a str,
    url: &'a str,
}

/// Split plain pieces on image or link markers, leftmost match first.
fn split_pattern(pieces: Vec<Piece<'_>>, marker: Marker) -> Vec<Piece<'_>> {
    let mut out = Vec::with_capacity(pieces.len());

    for piece in pieces {
        if piece.kind != SpanKind::Plain {
            out.push(piece);
            continue;
        }

        let mut rest = piece.text;
        while !rest.is_empty() {
            match find_marker(rest, marker) {
                Some(found) => {
                    push_fragment(&mut out, &rest[..found.start], SpanKind::Plain);
                    out.push(Piece {
                        text: found.label,
                        kind: marker.kind(),
                        target: Some(found.url),
                    });
                    rest = &rest[found.end..];
                }
                None => {
                    out.push(Piece::plain(rest));
                    break;
                }
            }
        }
    }

    out
}

fn find_marker(text: &str, marker: Marker) -> Option<Found<'_>> {
    let bytes = text.as_bytes();
    match marker {
        Marker::Image => memmem::find_iter(bytes, b"![")
            .find_map(|start| match_brackets(text, start, start + 2)),
        Marker::Link => memchr_iter(b'[', bytes)
            .filter(|&start| start == 0 || bytes[start - 1] != b'!')
            .find_map(|start| match_brackets(text, start, start + 1)),
    }
}

/// Match `label](url)` with the label starting at `open`. The label runs to
/// the first `]`, which must be followed directly by `(`; the url runs to the
/// first `)`.
#[inline]
fn match_brackets(text: &str, start: usize, open: usize) -> Option<Found<'_>> {
    let bytes = text.as_bytes();
    let close = open + memchr(b']', &bytes[open..])?;
    if bytes.get(close + 1) != Some(&b'(') {
        return None;
    }
    let url_start = close + 2;
    let url_end = url_start + memchr(b')', &bytes[url_start..])?;

    Some(Found {
        start,
        end: url_end + 1,
        label: &text[open..close],
        url: &text[url_start..url_end],
    })
}
