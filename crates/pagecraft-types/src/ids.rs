//! Block identifiers.
//!
//! A [`BlockId`] is an opaque string. Generated ids are UUIDv7 text
//! (time-ordered, globally unique), but any string read back from a saved
//! document is accepted as is. The `short()` form is for human-facing output
//! only, never used as a lookup key.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A block identifier, unique within its tree.
#[derive(Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(String);

impl BlockId {
    /// Wrap an existing id string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh id (UUIDv7 text). Never returns a previously issued id.
    pub fn generate() -> Self {
        Self(uuid::Uuid::now_v7().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First 8 characters, for display only.
    pub fn short(&self) -> &str {
        match self.0.char_indices().nth(8) {
            Some((end, _)) => &self.0[..end],
            None => &self.0,
        }
    }
}

impl From<&str> for BlockId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for BlockId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for BlockId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for BlockId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for BlockId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for BlockId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlockId({})", self.short())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_is_unique() {
        let ids: HashSet<BlockId> = (0..1000).map(|_| BlockId::generate()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_generated_id_is_uuid_text() {
        let id = BlockId::generate();
        assert!(uuid::Uuid::parse_str(id.as_str()).is_ok());
    }

    #[test]
    fn test_short_is_8_chars() {
        let id = BlockId::generate();
        assert_eq!(id.short().len(), 8);
        assert!(id.as_str().starts_with(id.short()));
    }

    #[test]
    fn test_short_of_short_id_is_whole_id() {
        assert_eq!(BlockId::new("a").short(), "a");
        assert_eq!(BlockId::new("héllo").short(), "héllo");
    }

    #[test]
    fn test_compares_with_str() {
        let id = BlockId::from("hero");
        assert_eq!(id, "hero");
        assert_eq!(id.to_string(), "hero");
    }

    #[test]
    fn test_debug_uses_short_form() {
        let id = BlockId::new("0123456789abcdef");
        assert_eq!(format!("{:?}", id), "BlockId(01234567)");
    }

    #[test]
    fn test_serde_is_transparent() {
        let id = BlockId::new("b");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"b\"");
        let parsed: BlockId = serde_json::from_str("\"b\"").unwrap();
        assert_eq!(parsed, id);
    }
}
