//! Error types for mining runs.
//!
//! Pruning (apriori mismatch, small support superset, no embedding) is not an
//! error. Everything here either is an I/O failure of an output stream or
//! means the miner broke one of its own invariants; the run stops with as
//! much context as is known.

use ftm_common::{PatternId, TransactionId, TreeError};
use ftm_subtree::StoreError;
use thiserror::Error;

/// Errors that abort a mining run.
#[derive(Debug, Error)]
pub enum MiningError {
    /// Writing to an output stream failed.
    #[error("Failed to write mining output: {0}")]
    Io(#[from] std::io::Error),

    /// A characteristic store invariant was violated while evaluating a candidate.
    #[error(
        "Internal: store invariant violated at level {level} (parent pattern {parent}, candidate '{candidate}', transaction {transaction}): {source}"
    )]
    Invariant {
        /// Size of the candidate.
        level: usize,
        /// Pattern whose store was the derivation base.
        parent: PatternId,
        /// Canonical string of the candidate.
        candidate: String,
        /// Transaction being evaluated.
        transaction: TransactionId,
        /// What the store reported.
        #[source]
        source: StoreError,
    },

    /// A candidate was about to be derived from a store that does not belong
    /// to its apriori parent.
    #[error(
        "Internal: candidate '{candidate}' at level {level} would be derived from a store of another pattern (expected parent {parent}, transaction {transaction})"
    )]
    ForeignBase {
        /// Size of the candidate.
        level: usize,
        /// Pattern the base store should belong to.
        parent: PatternId,
        /// Canonical string of the candidate.
        candidate: String,
        /// Transaction of the foreign store.
        transaction: TransactionId,
    },

    /// The pattern a candidate was extended from is missing from its own
    /// apriori parents.
    #[error("Internal: pattern {parent} is not an apriori parent of its extension '{candidate}'")]
    MissingParent {
        /// The extended pattern.
        parent: PatternId,
        /// Canonical string of the extension.
        candidate: String,
    },

    /// A support set received transactions out of order.
    #[error("Internal: support set of pattern {pattern} is unsorted ({previous} before {next})")]
    UnsortedSupport {
        /// Owner of the support set.
        pattern: PatternId,
        /// Last transaction already in the set.
        previous: TransactionId,
        /// Transaction that was pushed after it.
        next: TransactionId,
    },

    /// A support set received an element of a different pattern.
    #[error("Internal: support set of pattern {pattern} received an element of another pattern (transaction {transaction})")]
    MixedSupport {
        /// Owner of the support set.
        pattern: PatternId,
        /// Transaction of the rejected element.
        transaction: TransactionId,
    },

    /// Building a candidate or sub-pattern tree failed.
    #[error("Internal: pattern construction failed: {0}")]
    Tree(#[from] TreeError),
}

impl MiningError {
    /// Whether the error is a bug in the miner rather than an environment failure.
    pub const fn is_internal(&self) -> bool {
        !matches!(self, Self::Io(_))
    }
}
