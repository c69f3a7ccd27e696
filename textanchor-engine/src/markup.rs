//! Markup tree adapter
//!
//! The span marker never depends on a concrete document model. Anything
//! that can answer the [`MarkupNode`] questions can be marked; [`Node`] is
//! the serde-friendly tree used by the API and CLI.

use serde::{Deserialize, Serialize};

/// Identity and flags of one generated marker element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker<'a> {
    /// Element tag, e.g. `mark`
    pub tag: &'a str,
    /// Span range identifier
    pub id: &'a str,
    /// Span range category
    pub category: &'a str,
    /// This fragment opens the span
    pub first: bool,
    /// This fragment closes the span
    pub last: bool,
}

impl Marker<'_> {
    /// Attributes written on the marker element, in order
    pub fn attributes(&self) -> Vec<(String, String)> {
        let mut attrs = vec![
            ("data-span-id".to_string(), self.id.to_string()),
            ("data-category".to_string(), self.category.to_string()),
        ];
        if self.first {
            attrs.push(("data-span-first".to_string(), "true".to_string()));
        }
        if self.last {
            attrs.push(("data-span-last".to_string(), "true".to_string()));
        }
        attrs
    }
}

/// Operations the span marker needs from a tree node
pub trait MarkupNode: Clone {
    /// Whether this node is a text leaf
    fn is_text(&self) -> bool;

    /// Text of a leaf, `None` for elements
    fn text(&self) -> Option<&str>;

    /// Children of an element; empty for leaves
    fn children(&self) -> &[Self];

    /// Copy of this element with its children replaced
    fn with_children(&self, children: Vec<Self>) -> Self;

    /// New text leaf
    fn text_node(text: String) -> Self;

    /// New marker element wrapping `children`
    fn marker_node(marker: &Marker<'_>, children: Vec<Self>) -> Self;
}

/// Element of a [`Node`] tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    /// Tag name
    pub tag: String,
    /// Attributes in document order
    #[serde(default)]
    pub attrs: Vec<(String, String)>,
    /// Child nodes
    #[serde(default)]
    pub children: Vec<Node>,
}

/// Minimal document tree of text runs and elements
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    /// Text run
    Text {
        /// Text content
        value: String,
    },
    /// Element with children
    Element(Element),
}

impl Node {
    /// Text leaf
    pub fn text(value: impl Into<String>) -> Self {
        Node::Text {
            value: value.into(),
        }
    }

    /// Element without attributes
    pub fn element(tag: impl Into<String>, children: Vec<Node>) -> Self {
        Node::Element(Element {
            tag: tag.into(),
            attrs: Vec::new(),
            children,
        })
    }

    /// Concatenated text of every leaf in document order
    pub fn flatten_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Text { value } => out.push_str(value),
            Node::Element(element) => {
                for child in &element.children {
                    child.collect_text(out);
                }
            }
        }
    }

    /// Render as HTML
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Node::Text { value } => escape_into(value, out),
            Node::Element(element) => {
                out.push('<');
                out.push_str(&element.tag);
                for (name, value) in &element.attrs {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    escape_into(value, out);
                    out.push('"');
                }
                out.push('>');
                for child in &element.children {
                    child.write_html(out);
                }
                out.push_str("</");
                out.push_str(&element.tag);
                out.push('>');
            }
        }
    }
}

fn escape_into(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
}

impl MarkupNode for Node {
    fn is_text(&self) -> bool {
        matches!(self, Node::Text { .. })
    }

    fn text(&self) -> Option<&str> {
        match self {
            Node::Text { value } => Some(value),
            Node::Element(_) => None,
        }
    }

    fn children(&self) -> &[Self] {
        match self {
            Node::Text { .. } => &[],
            Node::Element(element) => &element.children,
        }
    }

    fn with_children(&self, children: Vec<Self>) -> Self {
        match self {
            Node::Text { .. } => self.clone(),
            Node::Element(element) => Node::Element(Element {
                tag: element.tag.clone(),
                attrs: element.attrs.clone(),
                children,
            }),
        }
    }

    fn text_node(text: String) -> Self {
        Node::Text { value: text }
    }

    fn marker_node(marker: &Marker<'_>, children: Vec<Self>) -> Self {
        Node::Element(Element {
            tag: marker.tag.to_string(),
            attrs: marker.attributes(),
            children,
        })
    }
}
