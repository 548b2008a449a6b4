//! Dash-separated index paths into a block tree.
//!
//! `"1-0-2"` means: root array index 1, then its `blocks[0]`, then that
//! block's `blocks[2]`. For insertion the last segment is the position to
//! insert at rather than an existing node.

use std::fmt;
use std::str::FromStr;

use crate::TreeError;

/// A non-empty sequence of sibling indices, root first.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BlockPath(pub(crate) Vec<usize>);

impl BlockPath {
    /// Path to a root-level position.
    pub fn root(index: usize) -> Self {
        Self(vec![index])
    }

    /// Build from indices; `None` if empty.
    pub fn from_indices(indices: impl Into<Vec<usize>>) -> Option<Self> {
        let indices = indices.into();
        if indices.is_empty() { None } else { Some(Self(indices)) }
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    /// Number of segments.
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    pub fn is_root_level(&self) -> bool {
        self.0.len() == 1
    }

    /// The path with its last segment removed, or `None` at root level.
    pub fn parent(&self) -> Option<BlockPath> {
        if self.is_root_level() {
            None
        } else {
            Some(Self(self.0[..self.0.len() - 1].to_vec()))
        }
    }

    /// Path to the `index`-th child of the block at this path.
    pub fn child(&self, index: usize) -> BlockPath {
        let mut indices = self.0.clone();
        indices.push(index);
        Self(indices)
    }

    /// `(ancestor indices, last index)`.
    pub fn split_last(&self) -> (&[usize], usize) {
        match self.0.split_last() {
            Some((last, ancestors)) => (ancestors, *last),
            // paths are never empty
            None => (&self.0[..], 0),
        }
    }
}

/// Parent of a dash-separated path string: `"1-0-2"` gives `"1-0"`.
///
/// `None` for a root-level or unparseable path.
pub fn parent_path(path: &str) -> Option<String> {
    let path: BlockPath = path.parse().ok()?;
    path.parent().map(|parent| parent.to_string())
}

impl FromStr for BlockPath {
    type Err = TreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(TreeError::InvalidPath(s.to_string()));
        }
        s.split('-')
            .map(|segment| segment.parse::<usize>())
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
            .map_err(|_| TreeError::InvalidPath(s.to_string()))
    }
}

impl fmt::Display for BlockPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, index) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("-")?;
            }
            write!(f, "{}", index)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(s: &str) -> BlockPath {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_and_display() {
        let p = path("1-0-2");
        assert_eq!(p.indices(), &[1, 0, 2]);
        assert_eq!(p.to_string(), "1-0-2");
        assert_eq!(p.depth(), 3);
    }

    #[test]
    fn test_parse_single_segment() {
        let p = path("4");
        assert!(p.is_root_level());
        assert_eq!(p, BlockPath::root(4));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in ["", "-", "1-", "-1", "1--2", "a", "1-b", "1.5", "-3", " 1"] {
            assert!(
                matches!(bad.parse::<BlockPath>(), Err(TreeError::InvalidPath(s)) if s == bad),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_parent_path() {
        assert_eq!(path("1-0-2").parent(), Some(path("1-0")));
        assert_eq!(path("1-0").parent(), Some(path("1")));
        assert_eq!(path("1").parent(), None);
    }

    #[test]
    fn test_parent_path_of_string() {
        assert_eq!(parent_path("1-0-2").as_deref(), Some("1-0"));
        assert_eq!(parent_path("3-4").as_deref(), Some("3"));
        assert_eq!(parent_path("1"), None);
        assert_eq!(parent_path(""), None);
        assert_eq!(parent_path("1-x"), None);
    }

    #[test]
    fn test_child_extends_path() {
        assert_eq!(path("2").child(3), path("2-3"));
    }

    #[test]
    fn test_split_last() {
        let p = path("3-1-4");
        let (ancestors, last) = p.split_last();
        assert_eq!(ancestors, &[3, 1]);
        assert_eq!(last, 4);

        let p = path("7");
        let (ancestors, last) = p.split_last();
        assert!(ancestors.is_empty());
        assert_eq!(last, 7);
    }

    #[test]
    fn test_from_indices() {
        assert_eq!(BlockPath::from_indices(vec![0, 1]), Some(path("0-1")));
        assert_eq!(BlockPath::from_indices(Vec::new()), None);
    }
}
