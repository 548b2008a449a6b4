//! Block tree document model for pagecraft.
//!
//! A page is an ordered array of [`Block`]s, each owning its children. This
//! crate provides lookup and mutation over that tree, addressed either by
//! block id or by dash-separated index path, plus responsive style
//! resolution per breakpoint.
//!
//! # Design Philosophy
//!
//! - **Owned tree**: children live inside their parent, so the structure is a
//!   tree by construction and `&mut BlockTree` gives exclusive access.
//! - **Two addressing schemes, two sets of operations**: id-addressed calls
//!   fail with `BlockNotFound`; path-addressed insertion fails with
//!   `PathNotFound`, `NestingNotAllowed`, or `IndexOutOfBounds`.
//! - **All-or-nothing**: every check runs before the tree is modified.
//!
//! # Example
//!
//! ```
//! use pagecraft_tree::{Block, BlockKind, BlockTree, Breakpoint};
//!
//! let mut tree = BlockTree::new();
//! tree.push(Block::new(BlockKind::Container).with_id("hero"));
//! tree.append_child("hero", Block::new(BlockKind::Heading).with_id("title")).unwrap();
//! tree.set_style("title", "typography", "fontSize", "32px", Breakpoint::Md).unwrap();
//! tree.set_style("title", "typography", "fontSize", "20px", Breakpoint::Xs).unwrap();
//!
//! let copy_id = tree.duplicate_block("hero").unwrap().id.clone();
//! assert_ne!(copy_id, "hero");
//! assert_eq!(tree.len(), 2);
//!
//! let css = tree.css_for("title", Breakpoint::Xs).unwrap();
//! assert_eq!(css["typography"]["fontSize"], "20px");
//! ```

mod error;
mod path;
pub mod responsive;
mod tree;

pub use error::TreeError;
pub use path::{BlockPath, parent_path};
pub use responsive::{
    CssByCategory, CssMap, convert_responsive_to_css_styles, extract_css_from_resolved,
    resolve_value_at_breakpoint, string_to_responsive_value,
};
pub use tree::{BlockTree, Iter};

pub use pagecraft_types::{
    Block, BlockId, BlockKind, BlockPatch, Breakpoint, BreakpointValues, Props, ResponsiveStyle,
    StyleConfig, StyleMap,
};

/// Result type for tree operations.
pub type Result<T> = std::result::Result<T, TreeError>;
