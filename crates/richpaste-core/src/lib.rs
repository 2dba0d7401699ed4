//! richpaste-core - editor document tree and markup serialization
//!
//! This crate provides the document tree a rich-text editor works on and
//! the serializer that turns it back into HTML. It is used by `richpaste`,
//! which adds HTML deserialization and flattening.
//!
//! # Architecture
//!
//! ```text
//! Pasted HTML ──deserialize──▶ ┌───────────────┐
//!                              │               │
//!                              │ Document tree │ ──serialize──▶ Markup
//! Editor edits ───────────────▶│               │
//!                              └───────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use richpaste_core::{serialize, Block, Document, Node, Options};
//!
//! let doc = Document::new(vec![
//!     Block::div(vec![
//!         Block::paragraph(vec![Node::text("Hello")]).into(),
//!         Block::image(Some("x.png")).into(),
//!     ])
//!     .into(),
//! ]);
//!
//! let markup = serialize(&doc, &Options::default()).unwrap();
//! assert_eq!(markup, r#"<div><p>Hello</p><img src="x.png"/></div>"#);
//! ```

mod ast;
mod options;
mod schema;
mod serialize;

pub use ast::{
    Block, BlockType, Data, Document, Inline, InlineType, Mark, Node, Text, HREF, SRC,
};
pub use options::{LinkStyle, Options};
pub use schema::Schema;
pub use serialize::{render_tag, serialize, serialize_node};

/// Error raised while serializing a document tree
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SerializeError {
    #[error("No serializer defined for {object} of type `{node_type}`")]
    Unsupported {
        object: &'static str,
        node_type: String,
    },
}

impl SerializeError {
    pub(crate) fn unsupported(object: &'static str, node_type: &str) -> Self {
        SerializeError::Unsupported {
            object,
            node_type: node_type.to_string(),
        }
    }
}
