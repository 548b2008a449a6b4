//! Layout breakpoints.
//!
//! Breakpoints form a closed, ordered set from narrowest to widest. `md` is
//! the base: a plain (non-responsive) style value is treated as the `md`
//! value when a field is promoted to per-breakpoint form.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::EnumString;

use crate::TypesError;

/// A responsive breakpoint, ordered `Xs < Sm < Md`.
#[derive(
    Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum Breakpoint {
    /// Phones.
    Xs,
    /// Tablets.
    Sm,
    /// Desktop, the base breakpoint.
    #[default]
    Md,
}

impl Breakpoint {
    /// All breakpoints, narrowest first.
    pub const ALL: [Breakpoint; 3] = [Breakpoint::Xs, Breakpoint::Sm, Breakpoint::Md];

    /// The base breakpoint that plain values belong to.
    pub const BASE: Breakpoint = Breakpoint::Md;

    /// Parse from string (case-insensitive).
    pub fn parse(s: &str) -> Result<Self, TypesError> {
        <Self as FromStr>::from_str(s).map_err(|_| TypesError::UnknownBreakpoint(s.to_string()))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Breakpoint::Xs => "xs",
            Breakpoint::Sm => "sm",
            Breakpoint::Md => "md",
        }
    }

    pub fn is_base(&self) -> bool {
        *self == Self::BASE
    }

    /// Wider breakpoints, nearest first.
    pub fn wider(self) -> impl Iterator<Item = Breakpoint> {
        Self::ALL.into_iter().filter(move |bp| *bp > self)
    }

    /// Narrower breakpoints, nearest first.
    pub fn narrower(self) -> impl Iterator<Item = Breakpoint> {
        Self::ALL.into_iter().rev().filter(move |bp| *bp < self)
    }
}

impl std::fmt::Display for Breakpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
