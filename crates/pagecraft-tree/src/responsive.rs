//! Responsive style resolution.
//!
//! Resolution at a breakpoint runs in two directional phases:
//!
//! 1. the value at the current breakpoint, if set;
//! 2. **up**: wider breakpoints, nearest first (`xs` → `sm` → `md`);
//! 3. **down**: narrower breakpoints, nearest first.
//!
//! An empty string counts as unset in every phase. So a desktop (`md`) value
//! fills in for unset smaller breakpoints, and a value set only on a small
//! breakpoint still applies at wider ones when nothing wider is set.

use indexmap::IndexMap;
use pagecraft_types::{Breakpoint, BreakpointValues, ResponsiveStyle, StyleConfig, StyleMap};

/// Resolved CSS for one flat style object.
pub type CssMap = IndexMap<String, String>;

/// Resolved CSS grouped by style category.
pub type CssByCategory = IndexMap<String, CssMap>;

fn non_empty(values: &BreakpointValues, bp: Breakpoint) -> Option<&str> {
    values.get(&bp).map(String::as_str).filter(|v| !v.is_empty())
}

/// Resolve one style value at `current`. Returns `""` when nothing is set.
pub fn resolve_value_at_breakpoint(value: &ResponsiveStyle, current: Breakpoint) -> String {
    let values = match value {
        ResponsiveStyle::Fixed(v) => return v.clone(),
        ResponsiveStyle::PerBreakpoint(values) => values,
    };

    std::iter::once(current)
        .chain(current.wider())
        .chain(current.narrower())
        .find_map(|bp| non_empty(values, bp))
        .unwrap_or_default()
        .to_string()
}

/// Resolve every property of a flat style object. Every key is kept.
pub fn extract_css_from_resolved(styles: &StyleMap, breakpoint: Breakpoint) -> CssMap {
    styles
        .iter()
        .map(|(property, value)| (property.clone(), resolve_value_at_breakpoint(value, breakpoint)))
        .collect()
}

/// Resolve a whole style config, category by category.
pub fn convert_responsive_to_css_styles(config: &StyleConfig, breakpoint: Breakpoint) -> CssByCategory {
    config
        .iter()
        .map(|(category, styles)| (category.clone(), extract_css_from_resolved(styles, breakpoint)))
        .collect()
}

/// Compute the stored value after writing `new_value` at `breakpoint`.
///
/// A plain value is promoted to a per-breakpoint map the first time a
/// non-base breakpoint is written; the old plain value becomes the base
/// (`md`) entry. Writing the base breakpoint keeps a plain value plain.
pub fn string_to_responsive_value(
    new_value: impl Into<String>,
    breakpoint: Breakpoint,
    previous: Option<&ResponsiveStyle>,
) -> ResponsiveStyle {
    let new_value = new_value.into();
    match previous {
        Some(ResponsiveStyle::PerBreakpoint(values)) => {
            let mut values = values.clone();
            values.insert(breakpoint, new_value);
            ResponsiveStyle::PerBreakpoint(values)
        }
        Some(ResponsiveStyle::Fixed(_)) | None if breakpoint.is_base() => {
            ResponsiveStyle::Fixed(new_value)
        }
        Some(ResponsiveStyle::Fixed(old)) => {
            ResponsiveStyle::per_breakpoint([(Breakpoint::BASE, old.clone()), (breakpoint, new_value)])
        }
        None => ResponsiveStyle::per_breakpoint([(breakpoint, new_value)]),
    }
}
