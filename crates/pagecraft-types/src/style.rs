//! Responsive style values.
//!
//! Every visual property on a block is stored as a [`ResponsiveStyle`]:
//! either one string for all breakpoints or a per-breakpoint map. Style maps
//! keep insertion order so rendered CSS comes out in authoring order.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::Breakpoint;

/// Per-breakpoint values, ordered narrowest first.
pub type BreakpointValues = BTreeMap<Breakpoint, String>;

/// Flat style object: property name → value.
pub type StyleMap = IndexMap<String, ResponsiveStyle>;

/// Style data grouped by category (`spacing`, `typography`, ...).
pub type StyleConfig = IndexMap<String, StyleMap>;

/// A style value, breakpoint-independent or per breakpoint.
///
/// JSON form is either a plain string or an object keyed by breakpoint name:
///
/// ```
/// # use pagecraft_types::{Breakpoint, ResponsiveStyle};
/// let fixed: ResponsiveStyle = serde_json::from_str(r#""10px""#).unwrap();
/// assert_eq!(fixed, ResponsiveStyle::fixed("10px"));
///
/// let map: ResponsiveStyle = serde_json::from_str(r#"{"md": "10px", "xs": "4px"}"#).unwrap();
/// assert_eq!(map.get(Breakpoint::Xs), Some("4px"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponsiveStyle {
    /// Applies at every breakpoint.
    Fixed(String),
    /// Explicit values for some breakpoints.
    PerBreakpoint(BreakpointValues),
}

impl ResponsiveStyle {
    pub fn fixed(value: impl Into<String>) -> Self {
        Self::Fixed(value.into())
    }

    /// Build a per-breakpoint value from `(breakpoint, value)` pairs.
    pub fn per_breakpoint<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = (Breakpoint, S)>,
        S: Into<String>,
    {
        Self::PerBreakpoint(values.into_iter().map(|(bp, v)| (bp, v.into())).collect())
    }

    pub fn is_responsive(&self) -> bool {
        matches!(self, Self::PerBreakpoint(_))
    }

    /// The value stored for exactly this breakpoint, with no fallback.
    ///
    /// A fixed value answers for every breakpoint.
    pub fn get(&self, breakpoint: Breakpoint) -> Option<&str> {
        match self {
            Self::Fixed(v) => Some(v.as_str()),
            Self::PerBreakpoint(map) => map.get(&breakpoint).map(String::as_str),
        }
    }
}

impl From<&str> for ResponsiveStyle {
    fn from(value: &str) -> Self {
        Self::fixed(value)
    }
}

impl From<String> for ResponsiveStyle {
    fn from(value: String) -> Self {
        Self::Fixed(value)
    }
}

impl From<BreakpointValues> for ResponsiveStyle {
    fn from(values: BreakpointValues) -> Self {
        Self::PerBreakpoint(values)
    }
}
