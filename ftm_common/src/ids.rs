//! Identifier newtypes shared by the loader, the index and the miner.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a frequent pattern.
///
/// Ids are assigned once, in increasing order, over a whole mining run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PatternId {
    inner: u32,
}

impl PatternId {
    /// Wrap a raw id.
    pub const fn new(id: u32) -> Self {
        Self { inner: id }
    }

    /// The raw id.
    pub const fn get(self) -> u32 {
        self.inner
    }

    /// The id following this one.
    pub const fn next(self) -> Self {
        Self {
            inner: self.inner + 1,
        }
    }
}

impl fmt::Display for PatternId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner)
    }
}

/// Identifier of a transaction (one graph of the input database).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TransactionId {
    inner: u32,
}

impl TransactionId {
    /// Wrap a raw id.
    pub const fn new(id: u32) -> Self {
        Self { inner: id }
    }

    /// The raw id.
    pub const fn get(self) -> u32 {
        self.inner
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<u32> for TransactionId {
    #[inline]
    fn from(id: u32) -> Self {
        Self::new(id)
    }
}
