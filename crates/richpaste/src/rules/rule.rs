//! Rule and Filter types for markup deserialization.

use richpaste_core::Node;

use crate::classify::{classify, TagClass};
use crate::deserialize::Next;
use crate::node::DomNode;

/// Type alias for rule bodies.
///
/// A body returns the document node for a matched DOM node, or `None` to drop
/// the node. `Next` deserializes child nodes on demand.
pub type DeserializeFn = Box<dyn Fn(&DomNode, &Next) -> Option<Node> + Send + Sync>;

/// A filter determines which DOM nodes a rule applies to
pub enum Filter {
    /// Match a single tag name
    TagName(String),
    /// Match any of multiple tag names
    TagNames(Vec<String>),
    /// Match every element of a tag class
    Class(TagClass),
    /// Match text nodes
    Text,
    /// Match using a predicate function
    Predicate(Box<dyn Fn(&DomNode) -> bool + Send + Sync>),
}

impl Filter {
    /// Create a filter for a single tag
    pub fn tag(name: &str) -> Self {
        Filter::TagName(name.to_lowercase())
    }

    /// Create a filter for multiple tags
    pub fn tags(names: &[&str]) -> Self {
        Filter::TagNames(names.iter().map(|s| s.to_lowercase()).collect())
    }

    /// Create a filter for a tag class
    pub fn class(class: TagClass) -> Self {
        Filter::Class(class)
    }

    /// Create a filter with a predicate
    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(&DomNode) -> bool + Send + Sync + 'static,
    {
        Filter::Predicate(Box::new(f))
    }

    /// Check if this filter matches a node
    pub fn matches(&self, node: &DomNode) -> bool {
        match self {
            Filter::TagName(t) => node.is_element() && node.tag_name() == *t,
            Filter::TagNames(tags) => node.is_element() && tags.contains(&node.tag_name()),
            Filter::Class(class) => node.is_element() && classify(&node.tag_name()) == *class,
            Filter::Text => node.is_text(),
            Filter::Predicate(f) => f(node),
        }
    }
}

/// A rule defines how a matched DOM node becomes a document node
pub struct Rule {
    /// Filter to determine which nodes this rule applies to
    pub filter: Filter,
    /// Body that builds the document node
    pub deserialize: DeserializeFn,
}

impl Rule {
    /// Create a new rule
    pub fn new<F>(filter: Filter, deserialize: F) -> Self
    where
        F: Fn(&DomNode, &Next) -> Option<Node> + Send + Sync + 'static,
    {
        Self {
            filter,
            deserialize: Box::new(deserialize),
        }
    }

    /// Create a rule that matches a single tag
    pub fn for_tag<F>(tag: &str, deserialize: F) -> Self
    where
        F: Fn(&DomNode, &Next) -> Option<Node> + Send + Sync + 'static,
    {
        Self::new(Filter::tag(tag), deserialize)
    }

    /// Create a rule that matches a whole tag class
    pub fn for_class<F>(class: TagClass, deserialize: F) -> Self
    where
        F: Fn(&DomNode, &Next) -> Option<Node> + Send + Sync + 'static,
    {
        Self::new(Filter::class(class), deserialize)
    }

    /// Apply this rule's body
    pub fn apply(&self, node: &DomNode, next: &Next) -> Option<Node> {
        (self.deserialize)(node, next)
    }
}
