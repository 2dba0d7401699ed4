//! Flattener - collapses rendered markup into paragraphs and images.
//!
//! The walk keeps two pieces of state: the finished segments and the pending
//! inline text of the paragraph being built. Text is appended to the pending
//! run; `span` keeps the run going; `div` and `p` close it before descending;
//! `img` closes it and emits an image. Every other element is skipped along
//! with its whole subtree.

use std::fmt;

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::node::{DomNode, NodeType};

/// One unit of flattened output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Inline text fragments, joined with a single space when rendered
    Paragraph(Vec<String>),
    /// An image and its source
    Image(String),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Paragraph(fragments) => {
                write!(f, "<p>{}</p>", encode_text(&fragments.join(" ")))
            }
            Segment::Image(src) => {
                write!(f, "<img src=\"{}\"/>", encode_double_quoted_attribute(src))
            }
        }
    }
}

/// Accumulator threaded through the walk
#[derive(Debug, Default)]
struct Flattener {
    segments: Vec<Segment>,
    pending: Vec<String>,
}

impl Flattener {
    fn visit(&mut self, node: &DomNode) {
        match node.node_type {
            NodeType::Text => self.pending.push(node.value().to_string()),
            NodeType::Element => {
                let tag = node.tag_name();
                match tag.as_str() {
                    "img" => {
                        self.flush();
                        let src = node.attr("src").unwrap_or_default().to_string();
                        self.segments.push(Segment::Image(src));
                    }
                    "span" => self.visit_children(node),
                    "div" | "p" => {
                        self.flush();
                        self.visit_children(node);
                    }
                    _ => log::trace!("flatten: dropping <{tag}> and its content"),
                }
            }
            // The preview container holding the rendered markup
            NodeType::Document | NodeType::DocumentFragment => self.visit_children(node),
            NodeType::Comment => {}
        }
    }

    fn visit_children(&mut self, node: &DomNode) {
        for child in node.children() {
            self.visit(child);
        }
    }

    /// Close the pending run; an empty run emits nothing
    fn flush(&mut self) {
        if !self.pending.is_empty() {
            let fragments = std::mem::take(&mut self.pending);
            self.segments.push(Segment::Paragraph(fragments));
        }
    }

    fn finish(mut self) -> Vec<Segment> {
        self.flush();
        self.segments
    }
}

/// Flatten a rendered tree into its ordered segments
pub fn flatten_segments(root: &DomNode) -> Vec<Segment> {
    let mut flattener = Flattener::default();
    flattener.visit(root);
    flattener.finish()
}

/// Flatten a rendered tree into markup.
///
/// Paragraph text and image sources are HTML-escaped, so text holding `&` or
/// `<` comes out as `&amp;` or `&lt;` rather than verbatim. Parsing the
/// result again yields the same text.
pub fn flatten(root: &DomNode) -> String {
    flatten_segments(root)
        .iter()
        .map(Segment::to_string)
        .collect()
}

/// Parse markup, then flatten it
#[cfg(feature = "html")]
pub fn flatten_html(markup: &str) -> String {
    flatten(&crate::html::parse_fragment(markup))
}
