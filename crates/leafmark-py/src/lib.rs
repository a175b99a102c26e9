//! Python bindings for the Leafmark converter.

use leafmark_core::{
    classify as core_classify, convert as core_convert, document_to_node,
    extract_title as core_extract_title, markdown_to_html as core_markdown_to_html,
    tokenize as core_tokenize, Block, BlockKind, ConvertError, ConvertErrorKind, Document, Page,
    SourceSpan, Span, SpanKind,
};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

fn value_error(e: ConvertError) -> PyErr {
    PyValueError::new_err(e.to_string())
}

// ============================================================================
// SourceSpan
// ============================================================================

/// Source location in the input text (byte offsets).
#[pyclass(frozen, get_all, name = "SourceSpan")]
#[derive(Clone)]
pub struct PySourceSpan {
    pub start: u32,
    pub end: u32,
}

#[pymethods]
impl PySourceSpan {
    fn __repr__(&self) -> String {
        format!("SourceSpan({}, {})", self.start, self.end)
    }

    #[getter]
    fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }
}

impl From<SourceSpan> for PySourceSpan {
    fn from(s: SourceSpan) -> Self {
        PySourceSpan {
            start: s.start,
            end: s.end,
        }
    }
}

// ============================================================================
// Enums
// ============================================================================

/// Inline span kind.
#[pyclass(frozen, eq, eq_int, name = "SpanKind")]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PySpanKind {
    Plain,
    Bold,
    Italic,
    Code,
    Link,
    Image,
}

impl From<SpanKind> for PySpanKind {
    fn from(k: SpanKind) -> Self {
        match k {
            SpanKind::Plain => PySpanKind::Plain,
            SpanKind::Bold => PySpanKind::Bold,
            SpanKind::Italic => PySpanKind::Italic,
            SpanKind::Code => PySpanKind::Code,
            SpanKind::Link => PySpanKind::Link,
            SpanKind::Image => PySpanKind::Image,
        }
    }
}

/// Block kind.
#[pyclass(frozen, eq, eq_int, name = "BlockKind")]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PyBlockKind {
    Paragraph,
    Heading,
    Code,
    Quote,
    UnorderedList,
    OrderedList,
}

impl From<BlockKind> for PyBlockKind {
    fn from(k: BlockKind) -> Self {
        match k {
            BlockKind::Paragraph => PyBlockKind::Paragraph,
            BlockKind::Heading => PyBlockKind::Heading,
            BlockKind::Code => PyBlockKind::Code,
            BlockKind::Quote => PyBlockKind::Quote,
            BlockKind::UnorderedList => PyBlockKind::UnorderedList,
            BlockKind::OrderedList => PyBlockKind::OrderedList,
        }
    }
}

/// Conversion error category.
#[pyclass(frozen, eq, eq_int, name = "ConvertErrorKind")]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PyConvertErrorKind {
    UnmatchedDelimiter,
    InvalidNode,
    MissingHeading,
}

impl From<ConvertErrorKind> for PyConvertErrorKind {
    fn from(k: ConvertErrorKind) -> Self {
        match k {
            ConvertErrorKind::UnmatchedDelimiter => PyConvertErrorKind::UnmatchedDelimiter,
            ConvertErrorKind::InvalidNode => PyConvertErrorKind::InvalidNode,
            ConvertErrorKind::MissingHeading => PyConvertErrorKind::MissingHeading,
        }
    }
}

/// A conversion error, as reported by `validate`.
#[pyclass(frozen, get_all, name = "ConvertError")]
#[derive(Clone)]
pub struct PyConvertError {
    pub message: String,
    pub span: Option<PySourceSpan>,
    pub kind: PyConvertErrorKind,
}

#[pymethods]
impl PyConvertError {
    fn __repr__(&self) -> String {
        format!("ConvertError({:?}, {:?})", self.message, self.kind)
    }

    fn __str__(&self) -> String {
        match &self.span {
            Some(s) => format!("{} at bytes {}..{}", self.message, s.start, s.end),
            None => self.message.clone(),
        }
    }
}

impl From<ConvertError> for PyConvertError {
    fn from(e: ConvertError) -> Self {
        PyConvertError {
            message: e.message,
            span: e.span.map(PySourceSpan::from),
            kind: e.kind.into(),
        }
    }
}

// ============================================================================
// Spans and blocks
// ============================================================================

/// Inline fragment. `target` is the url of links and images.
#[pyclass(frozen, get_all, name = "Span")]
pub struct PySpan {
    pub content: String,
    pub kind: PySpanKind,
    pub target: Option<String>,
}

#[pymethods]
impl PySpan {
    fn __repr__(&self) -> String {
        match &self.target {
            Some(t) => format!("Span({:?}, {:?}, {:?})", self.content, self.kind, t),
            None => format!("Span({:?}, {:?})", self.content, self.kind),
        }
    }
}

impl From<Span<'_>> for PySpan {
    fn from(s: Span<'_>) -> Self {
        PySpan {
            content: s.content.into_owned(),
            kind: s.kind.into(),
            target: s.target.map(|t| t.into_owned()),
        }
    }
}

/// Classified block of document text.
#[pyclass(frozen, get_all, name = "Block")]
pub struct PyBlock {
    pub content: String,
    pub kind: PyBlockKind,
    pub span: PySourceSpan,
}

#[pymethods]
impl PyBlock {
    fn __repr__(&self) -> String {
        format!(
            "Block({:?}, {}..{})",
            self.kind, self.span.start, self.span.end
        )
    }
}

impl From<Block<'_>> for PyBlock {
    fn from(b: Block<'_>) -> Self {
        PyBlock {
            content: b.content.to_string(),
            kind: b.kind.into(),
            span: b.span.into(),
        }
    }
}

/// Converted page: HTML plus the first level-1 heading, if any.
#[pyclass(frozen, get_all, name = "Page")]
pub struct PyPage {
    pub html: String,
    pub title: Option<String>,
}

#[pymethods]
impl PyPage {
    fn __repr__(&self) -> String {
        format!("Page(title={:?}, html_len={})", self.title, self.html.len())
    }
}

impl From<Page> for PyPage {
    fn from(p: Page) -> Self {
        PyPage {
            html: p.html,
            title: p.title,
        }
    }
}

// ============================================================================
// Module functions
// ============================================================================

/// Split inline text into typed spans.
///
/// Raises:
///     ValueError: On an unmatched delimiter
#[pyfunction]
#[pyo3(text_signature = "(text)")]
fn tokenize(text: &str) -> PyResult<Vec<PySpan>> {
    let spans = core_tokenize(text).map_err(value_error)?;
    Ok(spans.into_iter().map(PySpan::from).collect())
}

/// Cut a document into classified blocks.
#[pyfunction]
#[pyo3(text_signature = "(document)")]
fn segment(document: &str) -> Vec<PyBlock> {
    Document::parse(document)
        .blocks
        .into_iter()
        .map(PyBlock::from)
        .collect()
}

/// Classify a single block of text.
#[pyfunction]
#[pyo3(text_signature = "(text)")]
fn classify(text: &str) -> PyBlockKind {
    core_classify(text).into()
}

/// Convert a document to HTML.
///
/// Raises:
///     ValueError: On an unmatched delimiter or an empty document
#[pyfunction]
#[pyo3(text_signature = "(document)")]
fn markdown_to_html(document: &str) -> PyResult<String> {
    core_markdown_to_html(document).map_err(value_error)
}

/// Return the inner HTML of the document's first level-1 heading.
///
/// Raises:
///     ValueError: When conversion fails or there is no level-1 heading
#[pyfunction]
#[pyo3(text_signature = "(document)")]
fn extract_title(document: &str) -> PyResult<String> {
    let root = document_to_node(document).map_err(value_error)?;
    core_extract_title(&root).map_err(value_error)
}

/// Convert a document into a Page with its title.
#[pyfunction]
#[pyo3(text_signature = "(document)")]
fn convert(document: &str) -> PyResult<PyPage> {
    core_convert(document).map(PyPage::from).map_err(value_error)
}

/// Check every block and return all errors. Never raises.
#[pyfunction]
#[pyo3(text_signature = "(document)")]
fn validate(document: &str) -> Vec<PyConvertError> {
    Document::parse(document)
        .validate()
        .into_iter()
        .map(PyConvertError::from)
        .collect()
}

// ============================================================================
// Module
// ============================================================================

/// Leafmark - small Markdown dialect to HTML converter.
#[pymodule]
fn pylm(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PySourceSpan>()?;
    m.add_class::<PySpanKind>()?;
    m.add_class::<PyBlockKind>()?;
    m.add_class::<PyConvertErrorKind>()?;
    m.add_class::<PyConvertError>()?;
    m.add_class::<PySpan>()?;
    m.add_class::<PyBlock>()?;
    m.add_class::<PyPage>()?;
    m.add_function(wrap_pyfunction!(tokenize, m)?)?;
    m.add_function(wrap_pyfunction!(segment, m)?)?;
    m.add_function(wrap_pyfunction!(classify, m)?)?;
    m.add_function(wrap_pyfunction!(markdown_to_html, m)?)?;
    m.add_function(wrap_pyfunction!(extract_title, m)?)?;
    m.add_function(wrap_pyfunction!(convert, m)?)?;
    m.add_function(wrap_pyfunction!(validate, m)?)?;
    Ok(())
}
