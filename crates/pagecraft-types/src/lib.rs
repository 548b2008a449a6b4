//! Shared block and style types for pagecraft documents.
//!
//! This crate is the data foundation: block identity, block kinds, the
//! recursive [`Block`] node, and the responsive style values attached to it.
//! It has **no internal pagecraft dependencies** and does no I/O.
//!
//! # Document shape
//!
//! ```text
//! BlockTree (root array, lives in pagecraft-tree)
//!     └── Block (BlockId, BlockKind, allow_nesting)
//!         ├── style: category → property → ResponsiveStyle
//!         ├── props: type-specific JSON fields (text, href, src, ...)
//!         └── blocks: ordered children (rendering order)
//! ```
//!
//! # Key Types
//!
//! |---------------------|----------------------------------------------|
//! | Type                | Purpose                                      |
//! |---------------------|----------------------------------------------|
//! | [`BlockId`]         | Unique block identifier (opaque string)      |
//! | [`BlockKind`]       | Closed set of block types (`type` in JSON)   |
//! | [`Block`]           | Tree node with children, style, and props    |
//! | [`BlockPatch`]      | Shallow-merge update for a block             |
//! | [`Breakpoint`]      | `xs < sm < md`, `md` is the base             |
//! | [`ResponsiveStyle`] | One value for all breakpoints, or per-bp map |
//! |---------------------|----------------------------------------------|

pub mod block;
pub mod breakpoint;
pub mod ids;
pub mod style;

pub use block::{Block, BlockKind, BlockPatch, Props};
pub use breakpoint::Breakpoint;
pub use ids::BlockId;
pub use style::{BreakpointValues, ResponsiveStyle, StyleConfig, StyleMap};

/// Errors from parsing type names.
#[derive(Debug, thiserror::Error)]
pub enum TypesError {
    #[error("unknown block kind '{0}'")]
    UnknownKind(String),
    #[error("unknown breakpoint '{0}'")]
    UnknownBreakpoint(String),
}
