//! Editor document tree
//!
//! This module defines the nodes the rich-text editor works on. A document is
//! a strict tree: blocks and inlines own their children, text leaves own their
//! string. Nodes are built once (by the deserializer or by the editor) and
//! replaced wholesale, never patched in place.

use std::fmt;

use indexmap::IndexMap;

/// Typed data attached to a block or inline (`src` for images, `href` for links)
pub type Data = IndexMap<String, String>;

/// Key holding an image's source URL
pub const SRC: &str = "src";

/// Key holding a link's target URL
pub const HREF: &str = "href";

macro_rules! string_tag {
    ($name:ident { $($variant:ident => $tag:literal),* $(,)? }) => {
        impl $name {
            /// The editor's name for this type
            pub fn as_str(&self) -> &str {
                match self {
                    $($name::$variant => $tag,)*
                    $name::Other(tag) => tag.as_str(),
                }
            }
        }

        impl From<&str> for $name {
            fn from(tag: &str) -> Self {
                match tag {
                    $($tag => $name::$variant,)*
                    other => $name::Other(other.to_string()),
                }
            }
        }

        impl From<String> for $name {
            fn from(tag: String) -> Self {
                match tag.as_str() {
                    $($tag => $name::$variant,)*
                    _ => $name::Other(tag),
                }
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                match value {
                    $name::Other(tag) => tag,
                    known => known.as_str().to_string(),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

/// Type of a block node
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "String", into = "String")
)]
pub enum BlockType {
    Paragraph,
    Div,
    /// Void block carrying `src` in its data
    Image,
    /// Any type the editor produced that has no markup rule
    Other(String),
}

string_tag!(BlockType {
    Paragraph => "paragraph",
    Div => "div",
    Image => "image",
});

/// Type of an inline node
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "String", into = "String")
)]
pub enum InlineType {
    Span,
    /// Link carrying `href` in its data
    Link,
    Other(String),
}

string_tag!(InlineType {
    Span => "span",
    Link => "link",
});

/// Formatting mark applied to a text leaf by the editor
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "String", into = "String")
)]
pub enum Mark {
    Bold,
    Code,
    Italic,
    Underlined,
    Other(String),
}

string_tag!(Mark {
    Bold => "bold",
    Code => "code",
    Italic => "italic",
    Underlined => "underlined",
});

/// Root of an editor document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Document {
    pub nodes: Vec<Node>,
}

/// A node in the document tree
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "object", rename_all = "lowercase")
)]
pub enum Node {
    Block(Block),
    Inline(Inline),
    Text(Text),
}

/// Block-level node
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Block {
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub block_type: BlockType,
    #[cfg_attr(feature = "serde", serde(default))]
    pub nodes: Vec<Node>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "IndexMap::is_empty")
    )]
    pub data: Data,
}

/// Inline node
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Inline {
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub inline_type: InlineType,
    #[cfg_attr(feature = "serde", serde(default))]
    pub nodes: Vec<Node>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "IndexMap::is_empty")
    )]
    pub data: Data,
}

/// Text leaf
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Text {
    #[cfg_attr(feature = "serde", serde(default))]
    pub text: String,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Vec::is_empty")
    )]
    pub marks: Vec<Mark>,
}

impl Document {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    /// Whether any top-level node is a block
    pub fn has_blocks(&self) -> bool {
        self.nodes.iter().any(Node::is_block)
    }

    /// Concatenated text of every leaf, in document order
    pub fn text_content(&self) -> String {
        self.nodes.iter().map(Node::text_content).collect()
    }
}

impl Block {
    pub fn new(block_type: BlockType, nodes: Vec<Node>) -> Self {
        Self {
            block_type,
            nodes,
            data: Data::new(),
        }
    }

    pub fn paragraph(nodes: Vec<Node>) -> Self {
        Self::new(BlockType::Paragraph, nodes)
    }

    pub fn div(nodes: Vec<Node>) -> Self {
        Self::new(BlockType::Div, nodes)
    }

    /// Image block; images never hold children
    pub fn image(src: Option<&str>) -> Self {
        let mut data = Data::new();
        if let Some(src) = src {
            data.insert(SRC.to_string(), src.to_string());
        }
        Self {
            block_type: BlockType::Image,
            nodes: Vec::new(),
            data,
        }
    }

    /// Image source, if this block carries one
    pub fn src(&self) -> Option<&str> {
        self.data.get(SRC).map(String::as_str)
    }
}

impl Inline {
    pub fn new(inline_type: InlineType, nodes: Vec<Node>) -> Self {
        Self {
            inline_type,
            nodes,
            data: Data::new(),
        }
    }

    pub fn span(nodes: Vec<Node>) -> Self {
        Self::new(InlineType::Span, nodes)
    }

    pub fn link(href: Option<&str>, nodes: Vec<Node>) -> Self {
        let mut data = Data::new();
        if let Some(href) = href {
            data.insert(HREF.to_string(), href.to_string());
        }
        Self {
            inline_type: InlineType::Link,
            nodes,
            data,
        }
    }

    /// Link target, if this inline carries one
    pub fn href(&self) -> Option<&str> {
        self.data.get(HREF).map(String::as_str)
    }
}

impl Text {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            marks: Vec::new(),
        }
    }

    pub fn with_marks(text: impl Into<String>, marks: Vec<Mark>) -> Self {
        Self {
            text: text.into(),
            marks,
        }
    }
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(Text::new(text))
    }

    pub fn is_block(&self) -> bool {
        matches!(self, Node::Block(_))
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Node::Text(_))
    }

    /// The editor's `object` name for this node
    pub fn object(&self) -> &'static str {
        match self {
            Node::Block(_) => "block",
            Node::Inline(_) => "inline",
            Node::Text(_) => "text",
        }
    }

    /// Type tag of a block or inline; text leaves have none
    pub fn type_tag(&self) -> Option<&str> {
        match self {
            Node::Block(block) => Some(block.block_type.as_str()),
            Node::Inline(inline) => Some(inline.inline_type.as_str()),
            Node::Text(_) => None,
        }
    }

    /// Child nodes (always empty for text)
    pub fn nodes(&self) -> &[Node] {
        match self {
            Node::Block(block) => &block.nodes,
            Node::Inline(inline) => &inline.nodes,
            Node::Text(_) => &[],
        }
    }

    pub fn text_content(&self) -> String {
        match self {
            Node::Text(text) => text.text.clone(),
            other => other.nodes().iter().map(Node::text_content).collect(),
        }
    }
}

impl From<Block> for Node {
    fn from(block: Block) -> Self {
        Node::Block(block)
    }
}

impl From<Inline> for Node {
    fn from(inline: Inline) -> Self {
        Node::Inline(inline)
    }
}

impl From<Text> for Node {
    fn from(text: Text) -> Self {
        Node::Text(text)
    }
}
