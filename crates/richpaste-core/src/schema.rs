//! Editor schema
//!
//! The schema the host hands to the editor widget. It only declares which
//! block types are void (never hold children, rendered as a single tag).

use crate::ast::BlockType;

/// Block-type rules shared by the editor and the serializer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    /// Block types that never hold children
    pub void_blocks: Vec<BlockType>,
}

impl Schema {
    /// A schema with no void blocks
    pub fn empty() -> Self {
        Self {
            void_blocks: Vec::new(),
        }
    }

    /// Declare another void block type
    pub fn with_void(mut self, block_type: BlockType) -> Self {
        if !self.void_blocks.contains(&block_type) {
            self.void_blocks.push(block_type);
        }
        self
    }

    /// Check if a block type is void
    pub fn is_void(&self, block_type: &BlockType) -> bool {
        self.void_blocks.contains(block_type)
    }
}

impl Default for Schema {
    fn default() -> Self {
        Self::empty().with_void(BlockType::Image)
    }
}
