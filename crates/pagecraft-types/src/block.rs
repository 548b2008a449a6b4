//! Block nodes for the page document tree.
//!
//! A [`Block`] owns its children, so the document is a tree by construction:
//! there is no way to express a cycle or a shared child.
//!
//! ## JSON shape
//!
//! ```json
//! {
//!   "id": "hero",
//!   "type": "container",
//!   "allowNesting": true,
//!   "style": { "spacing": { "padding": { "md": "24px", "xs": "8px" } } },
//!   "blocks": [ { "id": "title", "type": "heading", "text": "Learn Rust" } ]
//! }
//! ```
//!
//! Fields other than the ones modelled here (`text`, `href`, `src`, ...) are
//! type-specific and kept verbatim in [`Block::props`].

use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use strum::EnumString;

use crate::{BlockId, ResponsiveStyle, StyleConfig, TypesError};

/// Type-specific fields of a block, kept as raw JSON.
pub type Props = serde_json::Map<String, serde_json::Value>;

/// What a block *is*. Determines how the renderer reads its props and children.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Serialize, Deserialize, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(ascii_case_insensitive, serialize_all = "snake_case")]
pub enum BlockKind {
    /// Generic layout wrapper.
    Container,
    /// Full-width page section.
    Section,
    /// Horizontal row of columns.
    Columns,
    /// One column inside `Columns`.
    Column,
    /// Rich text paragraph.
    Text,
    Heading,
    Button,
    Image,
    Video,
    Divider,
    Spacer,
    List,
}

impl BlockKind {
    /// Parse from string (case-insensitive).
    pub fn parse(s: &str) -> Result<Self, TypesError> {
        <Self as FromStr>::from_str(s).map_err(|_| TypesError::UnknownKind(s.to_string()))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BlockKind::Container => "container",
            BlockKind::Section => "section",
            BlockKind::Columns => "columns",
            BlockKind::Column => "column",
            BlockKind::Text => "text",
            BlockKind::Heading => "heading",
            BlockKind::Button => "button",
            BlockKind::Image => "image",
            BlockKind::Video => "video",
            BlockKind::Divider => "divider",
            BlockKind::Spacer => "spacer",
            BlockKind::List => "list",
        }
    }

    /// Layout kinds accept children when built through [`Block::new`].
    pub fn nests_by_default(&self) -> bool {
        matches!(
            self,
            BlockKind::Container | BlockKind::Section | BlockKind::Columns | BlockKind::Column
        )
    }
}

impl std::fmt::Display for BlockKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A node in the document tree.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    /// Unique within the tree. Replaced on duplication, never reused.
    pub id: BlockId,
    #[serde(rename = "type")]
    pub kind: BlockKind,
    /// Whether path-addressed insertion may place children under this block.
    #[serde(default, skip_serializing_if = "is_false")]
    pub allow_nesting: bool,
    /// Style values by category, then property.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub style: StyleConfig,
    /// Children in rendering order. Empty means leaf.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub blocks: Vec<Block>,
    /// Type-specific fields.
    #[serde(flatten)]
    pub props: Props,
}

fn is_false(v: &bool) -> bool {
    !v
}

impl Block {
    /// Create a block with a fresh id. Layout kinds allow nesting.
    pub fn new(kind: BlockKind) -> Self {
        Self {
            id: BlockId::generate(),
            kind,
            allow_nesting: kind.nests_by_default(),
            style: StyleConfig::new(),
            blocks: Vec::new(),
            props: Props::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<BlockId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn allow_nesting(mut self, allow: bool) -> Self {
        self.allow_nesting = allow;
        self
    }

    pub fn with_child(mut self, child: Block) -> Self {
        self.blocks.push(child);
        self
    }

    pub fn with_prop(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }

    pub fn with_style(
        mut self,
        category: impl Into<String>,
        property: impl Into<String>,
        value: impl Into<ResponsiveStyle>,
    ) -> Self {
        self.style
            .entry(category.into())
            .or_default()
            .insert(property.into(), value.into());
        self
    }

    pub fn is_leaf(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn prop(&self, key: &str) -> Option<&serde_json::Value> {
        self.props.get(key)
    }

    pub fn style_value(&self, category: &str, property: &str) -> Option<&ResponsiveStyle> {
        self.style.get(category)?.get(property)
    }

    /// Number of blocks below this one (children, grandchildren, ...).
    pub fn descendant_count(&self) -> usize {
        self.blocks.iter().map(|b| 1 + b.descendant_count()).sum()
    }

    /// Replace the id of this block and every descendant with fresh ids.
    pub fn assign_new_ids(&mut self) {
        self.id = BlockId::generate();
        for child in &mut self.blocks {
            child.assign_new_ids();
        }
    }

    /// Deep copy of this subtree with fresh ids throughout.
    pub fn duplicate(&self) -> Block {
        let mut copy = self.clone();
        copy.assign_new_ids();
        copy
    }

    /// Shallow-merge a patch: present fields overwrite, absent fields stay.
    pub fn apply_patch(&mut self, patch: BlockPatch) {
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(allow) = patch.allow_nesting {
            self.allow_nesting = allow;
        }
        if let Some(style) = patch.style {
            self.style = style;
        }
        if let Some(blocks) = patch.blocks {
            self.blocks = blocks;
        }
        for (key, value) in patch.props {
            // ids are only assigned at creation and duplication
            if key == "id" {
                continue;
            }
            self.props.insert(key, value);
        }
    }
}

/// Partial update for a block, applied with [`Block::apply_patch`].
///
/// Deserializes from the same camelCase keys as [`Block`]; any other key is a
/// prop overwrite.
///
/// ```
/// # use pagecraft_types::*;
/// let mut block = Block::new(BlockKind::Button).with_prop("label", "Enroll");
/// block.apply_patch(BlockPatch::new().prop("label", "Enroll now").allow_nesting(false));
/// assert_eq!(block.prop("label"), Some(&serde_json::json!("Enroll now")));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockPatch {
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<BlockKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_nesting: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<StyleConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocks: Option<Vec<Block>>,
    #[serde(flatten)]
    pub props: Props,
}

impl BlockPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kind(mut self, kind: BlockKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn allow_nesting(mut self, allow: bool) -> Self {
        self.allow_nesting = Some(allow);
        self
    }

    pub fn style(mut self, style: StyleConfig) -> Self {
        self.style = Some(style);
        self
    }

    pub fn blocks(mut self, blocks: Vec<Block>) -> Self {
        self.blocks = Some(blocks);
        self
    }

    pub fn prop(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.kind.is_none()
            && self.allow_nesting.is_none()
            && self.style.is_none()
            && self.blocks.is_none()
            && self.props.is_empty()
    }
}

// ============================================================================
// Tests
// ============================================================================
