//! Vertex and edge labels.

use std::fmt;
use std::sync::Arc;

/// Token used in the text format for the wildcard label.
pub const WILDCARD_TOKEN: &str = "*";

/// A vertex or edge label.
///
/// `Any` is a wildcard that is compatible with every other label, including
/// another wildcard. Named labels are compared by string equality.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Label {
    /// Matches every label.
    Any,
    /// A concrete label.
    Named(Arc<str>),
}

impl Label {
    /// Create a concrete label.
    pub fn named(name: impl AsRef<str>) -> Self {
        Self::Named(Arc::from(name.as_ref()))
    }

    /// Parse a label token; [`WILDCARD_TOKEN`] becomes [`Label::Any`].
    pub fn parse(token: &str) -> Self {
        if token == WILDCARD_TOKEN {
            Self::Any
        } else {
            Self::named(token)
        }
    }

    /// Whether this is the wildcard.
    pub const fn is_any(&self) -> bool {
        matches!(self, Self::Any)
    }

    /// Label compatibility used by every matching routine.
    #[inline]
    pub fn compatible(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Any, _) | (_, Self::Any) => true,
            (Self::Named(a), Self::Named(b)) => a == b,
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str(WILDCARD_TOKEN),
            Self::Named(name) => f.write_str(name),
        }
    }
}

impl From<&str> for Label {
    fn from(token: &str) -> Self {
        Self::parse(token)
    }
}
