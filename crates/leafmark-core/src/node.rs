//! HTML node tree.
//!
//! A [`Node`] is either a childless [`Node::Leaf`] or a [`Node::Parent`]
//! holding other nodes. The tree exists only to be serialized with
//! [`Node::to_html`].

use std::borrow::Cow;
use std::fmt::Write as _;

use crate::error::ConvertError;
use crate::inline::{Span, SpanKind};

/// Tag name of a node. Tags produced by the converter are static strings.
pub type Tag = Cow<'static, str>;

/// Attribute values.
///
/// - `Str(v)` → `name="v"`
/// - `Bool(true)` → `name`
/// - `Bool(false)` → omitted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    /// String value, written inside double quotes.
    Str(String),
    /// Boolean flag.
    Bool(bool),
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Str(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Str(value)
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Bool(value)
    }
}

/// Attributes in insertion order.
pub type Attributes = Vec<(String, AttrValue)>;

/// An HTML tree element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Element without children. A `None` tag renders the bare value.
    Leaf {
        tag: Option<Tag>,
        value: String,
        attributes: Attributes,
    },
    /// Element wrapping child nodes.
    Parent {
        tag: Tag,
        children: Vec<Node>,
        attributes: Attributes,
    },
}

impl Node {
    /// Untagged text leaf.
    pub fn text(value: impl Into<String>) -> Self {
        Node::Leaf {
            tag: None,
            value: value.into(),
            attributes: Vec::new(),
        }
    }

    /// Tagged leaf, e.g. `<b>value</b>`.
    pub fn leaf(tag: impl Into<Tag>, value: impl Into<String>) -> Self {
        Node::Leaf {
            tag: Some(tag.into()),
            value: value.into(),
            attributes: Vec::new(),
        }
    }

    /// Parent node wrapping `children`.
    pub fn parent(tag: impl Into<Tag>, children: Vec<Node>) -> Self {
        Node::Parent {
            tag: tag.into(),
            children,
            attributes: Vec::new(),
        }
    }

    /// Append an attribute.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        match &mut self {
            Node::Leaf { attributes, .. } | Node::Parent { attributes, .. } => {
                attributes.push((name.into(), value.into()));
            }
        }
        self
    }

    /// The tag, if any.
    pub fn tag(&self) -> Option<&str> {
        match self {
            Node::Leaf { tag, .. } => tag.as_deref(),
            Node::Parent { tag, .. } => Some(tag.as_ref()),
        }
    }

    /// Child nodes; empty for leaves.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Leaf { .. } => &[],
            Node::Parent { children, .. } => children.as_slice(),
        }
    }

    pub fn attributes(&self) -> &[(String, AttrValue)] {
        match self {
            Node::Leaf { attributes, .. } | Node::Parent { attributes, .. } => {
                attributes.as_slice()
            }
        }
    }

    /// First direct child carrying `tag`.
    pub fn find_child(&self, tag: &str) -> Option<&Node> {
        self.children().iter().find(|child| child.tag() == Some(tag))
    }

    /// Serialize the node and its subtree.
    ///
    /// ```rust
    /// use leafmark_core::node::Node;
    ///
    /// let node = Node::parent("p", vec![Node::text("Hi "), Node::leaf("b", "there")]);
    /// assert_eq!(node.to_html().unwrap(), "<p>Hi <b>there</b></p>");
    /// ```
    pub fn to_html(&self) -> Result<String, ConvertError> {
        let mut out = String::new();
        self.write_html(&mut out)?;
        Ok(out)
    }

    /// Serialize only what sits between this node's tags: the children of a
    /// parent, or the value of a leaf.
    pub fn inner_html(&self) -> Result<String, ConvertError> {
        match self {
            Node::Leaf { value, .. } => Ok(value.clone()),
            Node::Parent { children, .. } => {
                let mut out = String::new();
                for child in children {
                    child.write_html(&mut out)?;
                }
                Ok(out)
            }
        }
    }

    fn write_html(&self, out: &mut String) -> Result<(), ConvertError> {
        match self {
            Node::Leaf {
                tag: None, value, ..
            } => out.push_str(value),
            Node::Leaf {
                tag: Some(tag),
                value,
                attributes,
            } => {
                open_tag(out, tag, attributes);
                out.push_str(value);
                close_tag(out, tag);
            }
            Node::Parent {
                tag,
                children,
                attributes,
            } => {
                if tag.is_empty() {
                    return Err(ConvertError::invalid_node("parent node without tag"));
                }
                if children.is_empty() {
                    return Err(ConvertError::invalid_node(&format!(
                        "<{}> without children",
                        tag
                    )));
                }
                open_tag(out, tag, attributes);
                for child in children {
                    child.write_html(out)?;
                }
                close_tag(out, tag);
            }
        }
        Ok(())
    }
}

#[inline]
fn open_tag(out: &mut String, tag: &str, attributes: &[(String, AttrValue)]) {
    out.push('<');
    out.push_str(tag);
    write_attributes(out, attributes);
    out.push('>');
}

#[inline]
fn close_tag(out: &mut String, tag: &str) {
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

/// Render attributes in insertion order, each with a leading space.
pub fn write_attributes(out: &mut String, attributes: &[(String, AttrValue)]) {
    for (name, value) in attributes {
        match value {
            AttrValue::Str(v) => {
                let _ = write!(out, " {}=\"{}\"", name, v);
            }
            AttrValue::Bool(true) => {
                out.push(' ');
                out.push_str(name);
            }
            AttrValue::Bool(false) => {}
        }
    }
}

impl Span<'_> {
    /// Map the span onto its HTML leaf.
    pub fn to_node(&self) -> Node {
        let target = self.target.as_deref().unwrap_or("");
        match self.kind {
            SpanKind::Plain => Node::text(&*self.content),
            SpanKind::Bold => Node::leaf("b", &*self.content),
            SpanKind::Italic => Node::leaf("i", &*self.content),
            SpanKind::Code => Node::leaf("code", &*self.content),
            SpanKind::Link => Node::leaf("a", &*self.content).with_attr("href", target),
            SpanKind::Image => Node::leaf("img", "")
                .with_attr("alt", &*self.content)
                .with_attr("src", target),
        }
    }
}
