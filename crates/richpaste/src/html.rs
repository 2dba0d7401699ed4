//! HTML parsing support.
//!
//! This module parses HTML strings with scraper and converts the result into
//! the [`DomNode`] tree the deserializer and the flattener walk.

use scraper::{ElementRef, Html, Node as ScraperNode};

use crate::node::DomNode;

/// Parse an HTML fragment into a document-fragment node.
///
/// The parser's implicit `<html>` wrapper is dropped; the returned fragment
/// holds the top-level nodes of `html` in order.
///
/// # Example
///
/// ```rust
/// use richpaste::parse_fragment;
///
/// let fragment = parse_fragment("<p>Hello</p><img src=\"x.png\">");
/// assert_eq!(fragment.children.len(), 2);
/// assert_eq!(fragment.children[1].attr("src"), Some("x.png"));
/// ```
pub fn parse_fragment(html: &str) -> DomNode {
    let document = Html::parse_fragment(html);
    let mut fragment = DomNode::document_fragment();
    append_children(&mut fragment, document.root_element());
    fragment
}

/// Convert a scraper ElementRef to our DomNode structure
fn convert_element(element: ElementRef) -> DomNode {
    let attrs: Vec<(&str, &str)> = element.value().attrs().collect();
    let mut node = DomNode::element_with_attrs(element.value().name(), attrs);
    append_children(&mut node, element);
    node
}

fn append_children(parent: &mut DomNode, element: ElementRef) {
    for child in element.children() {
        match child.value() {
            ScraperNode::Text(text) => parent.add_child(DomNode::text(&text.text)),
            ScraperNode::Comment(comment) => {
                parent.add_child(DomNode::comment(&comment.comment))
            }
            ScraperNode::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    parent.add_child(convert_element(child_element));
                }
            }
            _ => {}
        }
    }
}
