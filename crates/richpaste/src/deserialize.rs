//! Deserializer - turns a DOM-like tree into an editor document.
//!
//! Nodes are visited depth-first. For each node the rules are evaluated in a
//! fixed order and the first matching rule builds the document node. A node
//! no rule matches is unwrapped: its children take its place in the parent.

use richpaste_core::{Block, BlockType, Document, Node, Schema};

use crate::node::DomNode;
use crate::rules::{Rule, Rules};

/// Options for deserialization
#[derive(Debug, Clone)]
pub struct DeserializeOptions {
    /// Block used to wrap top-level inline and text runs
    pub default_block: BlockType,

    /// Void block types, which are left childless
    pub schema: Schema,
}

impl Default for DeserializeOptions {
    fn default() -> Self {
        Self {
            default_block: BlockType::Paragraph,
            schema: Schema::default(),
        }
    }
}

/// Handle given to rule bodies for deserializing child nodes
pub struct Next<'a> {
    deserializer: &'a Deserializer,
}

impl Next<'_> {
    /// Deserialize the children of `node`
    pub fn children(&self, node: &DomNode) -> Vec<Node> {
        self.deserializer.deserialize_nodes(&node.children)
    }
}

/// Rule-driven markup deserializer
pub struct Deserializer {
    rules: Rules,
    options: DeserializeOptions,
}

impl Deserializer {
    /// Create a Deserializer with the built-in rules and default options
    pub fn new() -> Self {
        Self::with_options(DeserializeOptions::default())
    }

    /// Create a Deserializer with custom options
    pub fn with_options(options: DeserializeOptions) -> Self {
        Self {
            rules: Rules::new(),
            options,
        }
    }

    /// Add a custom rule, checked before the built-in ones
    pub fn add_rule(&mut self, key: &str, rule: Rule) -> &mut Self {
        self.rules.add(key, rule);
        self
    }

    /// Remove a custom rule
    pub fn remove_rule(&mut self, key: &str) -> &mut Self {
        self.rules.remove(key);
        self
    }

    pub fn options(&self) -> &DeserializeOptions {
        &self.options
    }

    pub(crate) fn next(&self) -> Next<'_> {
        Next { deserializer: self }
    }

    /// Deserialize a whole tree into a document.
    ///
    /// Document and fragment roots contribute their children; any other root
    /// is deserialized as a node itself. Top-level inline and text runs are
    /// wrapped in the default block, and an empty result becomes a single
    /// empty default block.
    pub fn deserialize(&self, root: &DomNode) -> Document {
        let nodes = if root.node_type.is_container() {
            self.deserialize_nodes(&root.children)
        } else {
            self.deserialize_node(root)
        };
        Document::new(self.wrap_top_level(nodes))
    }

    /// Parse an HTML string and deserialize it
    #[cfg(feature = "html")]
    pub fn deserialize_html(&self, html: &str) -> Document {
        self.deserialize(&crate::html::parse_fragment(html))
    }

    /// Deserialize a single node; unmatched nodes yield their children.
    ///
    /// A childless non-void block or inline produced by a rule gets a single
    /// empty text leaf, the shape an editor normalizes it to.
    pub fn deserialize_node(&self, node: &DomNode) -> Vec<Node> {
        match self.rules.for_node(node) {
            Some(rule) => rule
                .apply(node, &self.next())
                .map(|node| self.fill_empty(node))
                .into_iter()
                .collect(),
            None => self.deserialize_nodes(&node.children),
        }
    }

    /// Deserialize a run of sibling nodes
    pub fn deserialize_nodes(&self, nodes: &[DomNode]) -> Vec<Node> {
        nodes
            .iter()
            .filter(|node| !is_cruft_newline(node))
            .flat_map(|node| self.deserialize_node(node))
            .collect()
    }

    fn wrap_top_level(&self, nodes: Vec<Node>) -> Vec<Node> {
        let mut blocks: Vec<Node> = Vec::with_capacity(nodes.len());
        let mut in_run = false;

        for node in nodes {
            if node.is_block() {
                blocks.push(node);
                in_run = false;
                continue;
            }

            match blocks.last_mut() {
                Some(Node::Block(block)) if in_run => block.nodes.push(node),
                _ => blocks.push(self.default_block(vec![node])),
            }
            in_run = true;
        }

        if blocks.is_empty() {
            blocks.push(self.default_block(vec![Node::text("")]));
        }
        blocks
    }

    fn fill_empty(&self, mut node: Node) -> Node {
        match &mut node {
            Node::Block(block) if !self.options.schema.is_void(&block.block_type) => {
                if block.nodes.is_empty() {
                    block.nodes.push(Node::text(""));
                }
            }
            Node::Inline(inline) if inline.nodes.is_empty() => inline.nodes.push(Node::text("")),
            _ => {}
        }
        node
    }

    fn default_block(&self, nodes: Vec<Node>) -> Node {
        Block::new(self.options.default_block.clone(), nodes).into()
    }
}

impl Default for Deserializer {
    fn default() -> Self {
        Self::new()
    }
}

/// Bare newlines between tags carry no content
fn is_cruft_newline(node: &DomNode) -> bool {
    node.is_text() && node.value() == "\n"
}
