//! DOM-like input tree.
//!
//! This is the read-only view of parsed markup the deserializer and the
//! flattener walk: node kind, tag name, attributes and ordered children.
//! Any parser (html5ever, a browser bridge, hand-built trees in tests) can
//! produce it.

use indexmap::IndexMap;

/// Node types matching DOM nodeType values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    /// Element node (nodeType = 1)
    Element = 1,
    /// Text node (nodeType = 3)
    Text = 3,
    /// Comment node (nodeType = 8)
    Comment = 8,
    /// Document node (nodeType = 9)
    Document = 9,
    /// Document fragment node (nodeType = 11)
    DocumentFragment = 11,
}

impl NodeType {
    /// Documents and fragments only group children
    pub fn is_container(self) -> bool {
        matches!(self, NodeType::Document | NodeType::DocumentFragment)
    }
}

/// A node of parsed markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomNode {
    /// Node type (element, text, ...)
    pub node_type: NodeType,

    /// Node name (uppercase for elements, e.g. "DIV"; "#text" for text nodes)
    pub node_name: String,

    /// Text content for text and comment nodes
    pub node_value: Option<String>,

    /// Attributes in source order, names lowercased
    pub attributes: IndexMap<String, String>,

    /// Child nodes
    pub children: Vec<DomNode>,
}

impl DomNode {
    fn new(node_type: NodeType, node_name: String, node_value: Option<String>) -> Self {
        Self {
            node_type,
            node_name,
            node_value,
            attributes: IndexMap::new(),
            children: Vec::new(),
        }
    }

    /// Create a new element node
    pub fn element(tag_name: &str) -> Self {
        Self::new(NodeType::Element, tag_name.to_uppercase(), None)
    }

    /// Create a new element node with attributes
    pub fn element_with_attrs(tag_name: &str, attrs: Vec<(&str, &str)>) -> Self {
        let mut node = Self::element(tag_name);
        for (name, value) in attrs {
            node.set_attr(name, value);
        }
        node
    }

    /// Create a new text node
    pub fn text(content: &str) -> Self {
        Self::new(NodeType::Text, "#text".to_string(), Some(content.to_string()))
    }

    /// Create a new comment node
    pub fn comment(content: &str) -> Self {
        Self::new(
            NodeType::Comment,
            "#comment".to_string(),
            Some(content.to_string()),
        )
    }

    /// Create a document fragment node
    pub fn document_fragment() -> Self {
        Self::new(
            NodeType::DocumentFragment,
            "#document-fragment".to_string(),
            None,
        )
    }

    /// Builder-style [`add_child`](Self::add_child)
    pub fn with_child(mut self, child: DomNode) -> Self {
        self.add_child(child);
        self
    }

    /// Builder-style append of several children
    pub fn with_children(mut self, children: impl IntoIterator<Item = DomNode>) -> Self {
        self.children.extend(children);
        self
    }

    /// Check if this is an element node
    pub fn is_element(&self) -> bool {
        self.node_type == NodeType::Element
    }

    /// Check if this is a text node
    pub fn is_text(&self) -> bool {
        self.node_type == NodeType::Text
    }

    /// Get the tag name (lowercase); empty for non-elements
    pub fn tag_name(&self) -> String {
        if self.is_element() {
            self.node_name.to_lowercase()
        } else {
            String::new()
        }
    }

    /// Text value of a text or comment node
    pub fn value(&self) -> &str {
        self.node_value.as_deref().unwrap_or("")
    }

    /// Get an attribute value by name
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .get(&name.to_lowercase())
            .map(String::as_str)
    }

    /// Check if an attribute is present
    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    /// Iterate over child nodes in order
    pub fn children(&self) -> impl Iterator<Item = &DomNode> {
        self.children.iter()
    }

    /// Append a child node
    pub fn add_child(&mut self, child: DomNode) {
        self.children.push(child);
    }

    /// Set an attribute, replacing any previous value
    pub fn set_attr(&mut self, name: &str, value: &str) {
        self.attributes
            .insert(name.to_lowercase(), value.to_string());
    }

    /// Get all text content from this node and descendants
    pub fn text_content(&self) -> String {
        match self.node_type {
            NodeType::Text => self.value().to_string(),
            NodeType::Comment => String::new(),
            _ => self.children().map(DomNode::text_content).collect(),
        }
    }
}
