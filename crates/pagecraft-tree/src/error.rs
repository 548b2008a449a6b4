//! Error types for tree operations.

use thiserror::Error;

use crate::{BlockId, BlockPath};

/// Errors that can occur during tree operations.
///
/// A failed operation never leaves the tree partially modified.
#[derive(Error, Debug)]
pub enum TreeError {
    /// No block with this id anywhere in the tree.
    #[error("block not found: {0}")]
    BlockNotFound(BlockId),

    /// An ancestor index along the path does not exist.
    #[error("no block at path {0}")]
    PathNotFound(BlockPath),

    /// An ancestor along an insertion path does not accept children.
    #[error("block {0} does not allow nesting")]
    NestingNotAllowed(BlockId),

    /// Insertion index past the end of the target array.
    #[error("insertion index {index} out of bounds for {len} siblings")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Path string could not be parsed.
    #[error("invalid block path: {0:?}")]
    InvalidPath(String),

    /// Two blocks in one tree share an id.
    #[error("duplicate block id: {0}")]
    DuplicateBlock(BlockId),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TreeError {
    /// True for the "target does not exist" family of failures.
    pub fn is_not_found(&self) -> bool {
        matches!(self, TreeError::BlockNotFound(_) | TreeError::PathNotFound(_))
    }

    /// True for "target exists but the operation is not allowed there".
    pub fn is_not_permitted(&self) -> bool {
        matches!(
            self,
            TreeError::NestingNotAllowed(_) | TreeError::IndexOutOfBounds { .. }
        )
    }
}
