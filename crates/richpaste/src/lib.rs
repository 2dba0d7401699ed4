//! # richpaste
//!
//! Turn pasted HTML into an editor document tree, serialize it back to
//! markup, and flatten markup into a plain paragraph / image sequence.
//!
//! ## Design
//!
//! The crate works on a DOM-like [`DomNode`] tree rather than on raw strings:
//!
//! - **Deserializer**: ordered, first-match rules map elements to blocks,
//!   inlines and text leaves ([`Deserializer`])
//! - **Serializer**: re-exported from `richpaste-core` ([`serialize`])
//! - **Flattener**: collapses rendered markup into `<p>` and `<img>`
//!   segments ([`flatten`])
//! - **Session**: the paste / edit / format cycle around an editor widget
//!   ([`PasteSession`])
//!
//! ## Example
//!
//! ```rust
//! use richpaste::{flatten_html, serialize, Deserializer, Options};
//!
//! let doc = Deserializer::new().deserialize_html("<div><p>Hello</p><img src=\"x.png\"></div>");
//! let markup = serialize(&doc, &Options::default()).unwrap();
//! assert_eq!(markup, "<div><p>Hello</p><img src=\"x.png\"/></div>");
//!
//! assert_eq!(flatten_html(&markup), "<p>Hello</p><img src=\"x.png\"/>");
//! ```

pub mod classify;
mod deserialize;
mod flatten;
#[cfg(feature = "html")]
pub mod html;
pub mod node;
mod rules;
#[cfg(feature = "html")]
mod session;

pub use classify::{classify, TagClass};
pub use deserialize::{DeserializeOptions, Deserializer, Next};
#[cfg(feature = "html")]
pub use flatten::flatten_html;
pub use flatten::{flatten, flatten_segments, Segment};
#[cfg(feature = "html")]
pub use html::parse_fragment;
pub use node::{DomNode, NodeType};
pub use rules::{DeserializeFn, Filter, Rule, Rules};
#[cfg(feature = "html")]
pub use session::{
    Editor, FormatPolicy, MemoryStorage, NullStorage, PasteOutcome, PasteSession, Preview,
    PreviewMode, SessionEvent, SessionOptions, Storage, Transfer,
};

pub use richpaste_core::{
    render_tag, serialize, serialize_node, Block, BlockType, Data, Document, Inline, InlineType,
    LinkStyle, Mark, Node, Options, Schema, SerializeError, Text,
};

/// Error reported by the editor widget
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct EditorError(String);

impl EditorError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Error type for richpaste operations
#[derive(Debug, thiserror::Error)]
pub enum PasteError {
    #[error("Serialization error: {0}")]
    Serialize(#[from] SerializeError),

    #[error("Editor error: {0}")]
    Editor(#[from] EditorError),
}

pub type Result<T> = std::result::Result<T, PasteError>;
