//! The block tree and its id/path-addressed operations.
//!
//! # Addressing
//!
//! Blocks are reached two ways, each with its own operations:
//!
//! - **by id**: pre-order depth-first search, children in array order. The
//!   first match wins.
//! - **by path**: a [`BlockPath`] of sibling indices, root array first.
//!
//! # Failure
//!
//! Mutations return `Result<_, TreeError>`. Every precondition is checked
//! before the tree is touched, so a failed call leaves the tree exactly as
//! it was.

use std::collections::HashSet;

use pagecraft_types::{Block, BlockId, BlockKind, BlockPatch, Breakpoint};
use serde::{Deserialize, Serialize};

use crate::responsive::{self, CssByCategory};
use crate::{BlockPath, Result, TreeError};

/// A page document: the ordered root array of blocks.
///
/// Serializes as the bare JSON array.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockTree {
    blocks: Vec<Block>,
}

impl BlockTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Root-level blocks in order.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn into_blocks(self) -> Vec<Block> {
        self.blocks
    }

    /// Number of root-level blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Number of blocks at every depth.
    pub fn block_count(&self) -> usize {
        self.blocks.iter().map(|b| 1 + b.descendant_count()).sum()
    }

    /// Iterate blocks in pre-order. Yields `(depth, block)`, depth 0 for roots.
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(&self.blocks)
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    /// First block with this id in pre-order.
    pub fn find_by_id(&self, id: &str) -> Option<&Block> {
        self.iter().map(|(_, b)| b).find(|b| b.id == id)
    }

    /// Every block of this kind, in pre-order.
    pub fn find_by_type(&self, kind: BlockKind) -> Vec<&Block> {
        self.iter().map(|(_, b)| b).filter(|b| b.kind == kind).collect()
    }

    /// Index path of the first block with this id in pre-order.
    ///
    /// Walks with an explicit stack, so arbitrarily deep trees don't grow
    /// the call stack.
    pub fn path_of(&self, id: &str) -> Option<BlockPath> {
        let mut stack: Vec<(Vec<usize>, &Block)> = self
            .blocks
            .iter()
            .enumerate()
            .rev()
            .map(|(i, b)| (vec![i], b))
            .collect();

        while let Some((indices, block)) = stack.pop() {
            if block.id == id {
                return Some(BlockPath(indices));
            }
            for (i, child) in block.blocks.iter().enumerate().rev() {
                let mut child_indices = indices.clone();
                child_indices.push(i);
                stack.push((child_indices, child));
            }
        }
        None
    }

    /// Block at `path`, or `None` if any index is out of range.
    pub fn get_by_path(&self, path: &BlockPath) -> Option<&Block> {
        let (first, rest) = path.indices().split_first()?;
        let mut block = self.blocks.get(*first)?;
        for &i in rest {
            block = block.blocks.get(i)?;
        }
        Some(block)
    }

    /// Block at a dash-separated path string. Malformed paths resolve to `None`.
    pub fn get_block_by_path(&self, path: &str) -> Option<&Block> {
        let path: BlockPath = path.parse().ok()?;
        self.get_by_path(&path)
    }

    fn get_mut(&mut self, indices: &[usize]) -> Option<&mut Block> {
        let (first, rest) = indices.split_first()?;
        let mut block = self.blocks.get_mut(*first)?;
        for &i in rest {
            block = block.blocks.get_mut(i)?;
        }
        Some(block)
    }

    /// The array holding the children of the block at `parent`, or the root
    /// array when `parent` is empty.
    fn siblings_mut(&mut self, parent: &[usize]) -> Option<&mut Vec<Block>> {
        if parent.is_empty() {
            return Some(&mut self.blocks);
        }
        self.get_mut(parent).map(|b| &mut b.blocks)
    }

    fn find_by_id_mut(&mut self, id: &str) -> Result<&mut Block> {
        let path = self
            .path_of(id)
            .ok_or_else(|| TreeError::BlockNotFound(BlockId::new(id)))?;
        self.get_mut(path.indices())
            .ok_or_else(|| TreeError::BlockNotFound(BlockId::new(id)))
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Append a block to the root array.
    pub fn push(&mut self, block: Block) {
        tracing::debug!("push root block {:?}", block.id);
        self.blocks.push(block);
    }

    /// Append a block as the last child of the block with `parent_id`.
    ///
    /// The parent's `allow_nesting` flag only guards path insertion; it is
    /// not consulted here.
    pub fn append_child(&mut self, parent_id: &str, block: Block) -> Result<()> {
        let parent = self.find_by_id_mut(parent_id)?;
        tracing::debug!("append {:?} under {:?}", block.id, parent.id);
        parent.blocks.push(block);
        Ok(())
    }

    /// Insert a block at a path position.
    ///
    /// Every segment but the last must name an existing block that allows
    /// nesting. The last segment is the insertion index into that block's
    /// children (or the root array for a single-segment path); it may be up
    /// to one past the end, which appends.
    pub fn insert_at(&mut self, path: &BlockPath, block: Block) -> Result<()> {
        let (ancestors, index) = path.split_last();

        let mut siblings = &self.blocks;
        for (depth, &i) in ancestors.iter().enumerate() {
            let Some(node) = siblings.get(i) else {
                tracing::warn!("insert at {} rejected: no block at segment {}", path, depth);
                return Err(TreeError::PathNotFound(BlockPath(ancestors[..=depth].to_vec())));
            };
            if !node.allow_nesting {
                tracing::warn!("insert at {} rejected: {:?} does not allow nesting", path, node.id);
                return Err(TreeError::NestingNotAllowed(node.id.clone()));
            }
            siblings = &node.blocks;
        }

        let len = siblings.len();
        if index > len + 1 {
            tracing::warn!("insert at {} rejected: index {} past {} siblings", path, index, len);
            return Err(TreeError::IndexOutOfBounds { index, len });
        }

        let target = self
            .siblings_mut(ancestors)
            .ok_or_else(|| TreeError::PathNotFound(path.clone()))?;
        tracing::debug!("insert {:?} at {}", block.id, path);
        target.insert(index.min(len), block);
        Ok(())
    }

    /// Shallow-merge `patch` into the first block with this id.
    pub fn update_block(&mut self, id: &str, patch: BlockPatch) -> Result<()> {
        let block = self.find_by_id_mut(id)?;
        block.apply_patch(patch);
        tracing::debug!("updated {:?}", block.id);
        Ok(())
    }

    /// Remove the first block with this id (and its subtree) and return it.
    pub fn delete_block(&mut self, id: &str) -> Result<Block> {
        let path = self
            .path_of(id)
            .ok_or_else(|| TreeError::BlockNotFound(BlockId::new(id)))?;
        let (parent, index) = path.split_last();
        let siblings = self
            .siblings_mut(parent)
            .ok_or_else(|| TreeError::BlockNotFound(BlockId::new(id)))?;
        let removed = siblings.remove(index);
        tracing::debug!("deleted {:?} at {} ({} descendants)", removed.id, path, removed.descendant_count());
        Ok(removed)
    }

    /// Deep-copy the first block with this id, give the copy and all its
    /// descendants fresh ids, and insert it right after the original.
    ///
    /// Returns the inserted copy.
    pub fn duplicate_block(&mut self, id: &str) -> Result<&Block> {
        let path = self
            .path_of(id)
            .ok_or_else(|| TreeError::BlockNotFound(BlockId::new(id)))?;
        let (parent, index) = path.split_last();
        let siblings = self
            .siblings_mut(parent)
            .ok_or_else(|| TreeError::BlockNotFound(BlockId::new(id)))?;

        let copy = siblings[index].duplicate();
        tracing::debug!("duplicated {:?} as {:?}", siblings[index].id, copy.id);
        siblings.insert(index + 1, copy);
        Ok(&siblings[index + 1])
    }

    // =========================================================================
    // Styles
    // =========================================================================

    /// Write one style property of a block at a breakpoint, promoting a plain
    /// value to per-breakpoint form on the first non-base override.
    pub fn set_style(
        &mut self,
        id: &str,
        category: &str,
        property: &str,
        value: impl Into<String>,
        breakpoint: Breakpoint,
    ) -> Result<()> {
        let block = self.find_by_id_mut(id)?;
        let styles = block.style.entry(category.to_string()).or_default();
        let next = responsive::string_to_responsive_value(value, breakpoint, styles.get(property));
        styles.insert(property.to_string(), next);
        tracing::debug!("set {}.{} on {:?} at {}", category, property, block.id, breakpoint);
        Ok(())
    }

    /// Resolved CSS of one block at a breakpoint, grouped by category.
    pub fn css_for(&self, id: &str, breakpoint: Breakpoint) -> Result<CssByCategory> {
        let block = self
            .find_by_id(id)
            .ok_or_else(|| TreeError::BlockNotFound(BlockId::new(id)))?;
        Ok(responsive::convert_responsive_to_css_styles(&block.style, breakpoint))
    }

    // =========================================================================
    // Validation
    // =========================================================================

    /// Check that no two blocks share an id. Reports the first repeat in
    /// pre-order.
    pub fn validate_ids(&self) -> Result<()> {
        let mut seen: HashSet<&BlockId> = HashSet::new();
        for (_, block) in self.iter() {
            if !seen.insert(&block.id) {
                tracing::warn!("duplicate block id {}", block.id);
                return Err(TreeError::DuplicateBlock(block.id.clone()));
            }
        }
        Ok(())
    }
}

impl From<Vec<Block>> for BlockTree {
    fn from(blocks: Vec<Block>) -> Self {
        Self::from_blocks(blocks)
    }
}

impl<'a> IntoIterator for &'a BlockTree {
    type Item = (usize, &'a Block);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Pre-order iterator over a block tree.
pub struct Iter<'a> {
    stack: Vec<(usize, &'a Block)>,
}

impl<'a> Iter<'a> {
    fn new(roots: &'a [Block]) -> Self {
        // Push roots in reverse order to process first root first
        let stack = roots.iter().rev().map(|b| (0, b)).collect();
        Self { stack }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = (usize, &'a Block);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, block) = self.stack.pop()?;
        for child in block.blocks.iter().rev() {
            self.stack.push((depth + 1, child));
        }
        Some((depth, block))
    }
}

// ============================================================================
// Tests
// ============================================================================
