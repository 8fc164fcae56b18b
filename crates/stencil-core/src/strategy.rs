//! Toplevel matching strategies.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Family of toplevel matching algorithm governing a compiled pattern.
///
/// # Example
///
/// ```
/// use stencil_core::MatchingStrategy;
///
/// assert_eq!(MatchingStrategy::default(), MatchingStrategy::Expression);
/// assert_eq!(MatchingStrategy::JavaDoc.to_string(), "javadoc");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchingStrategy {
    /// Plain expression and statement matching.
    #[default]
    Expression,
    /// Bare identifiers used as statements.
    Symbol,
    /// Comment matching.
    Comment,
    /// Documentation comment matching.
    JavaDoc,
}

impl fmt::Display for MatchingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expression => f.write_str("expression"),
            Self::Symbol => f.write_str("symbol"),
            Self::Comment => f.write_str("comment"),
            Self::JavaDoc => f.write_str("javadoc"),
        }
    }
}
