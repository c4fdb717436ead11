//! Error types for tree construction and database loading.

use thiserror::Error;

use crate::ids::TransactionId;

/// Structural errors raised while building a [`crate::LabeledTree`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// An edge endpoint does not name a vertex.
    #[error("vertex {vertex} out of range for a tree with {n} vertices")]
    VertexOutOfRange {
        /// The offending endpoint.
        vertex: usize,
        /// Number of vertices.
        n: usize,
    },

    /// An edge connects a vertex with itself.
    #[error("self loop at vertex {vertex}")]
    SelfLoop {
        /// The looping vertex.
        vertex: usize,
    },

    /// The edge would close a cycle (this includes parallel edges).
    #[error("edge {v}-{w} closes a cycle")]
    Cycle {
        /// First endpoint of the rejected edge.
        v: usize,
        /// Second endpoint.
        w: usize,
    },

    /// A leaf operation was applied to an inner vertex.
    #[error("vertex {vertex} is not a leaf")]
    NotALeaf {
        /// The vertex that was expected to be a leaf.
        vertex: usize,
    },
}

/// Errors raised by [`crate::GraphReader`].
///
/// Only [`LoadError::Record`] is recoverable: the offending transaction has
/// been consumed completely and reading may continue with the next one.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The underlying stream failed.
    #[error("I/O error while reading the database: {0}")]
    Io(#[from] std::io::Error),

    /// A header line could not be parsed, so the stream cannot be resynchronised.
    #[error("line {line}: invalid graph header '{content}'")]
    Header {
        /// 1-based line number.
        line: usize,
        /// The line as read.
        content: String,
    },

    /// The stream ended inside a record.
    #[error("transaction {transaction}: stream ended inside the record")]
    UnexpectedEof {
        /// Id from the last header.
        transaction: TransactionId,
    },

    /// One transaction is malformed; it was skipped.
    #[error("transaction {transaction} (line {line}): {reason}")]
    Record {
        /// Id of the skipped transaction.
        transaction: TransactionId,
        /// 1-based line number where the problem was found.
        line: usize,
        /// What is wrong with the record.
        reason: String,
    },
}

impl LoadError {
    /// Create a header error.
    pub fn header(line: usize, content: impl Into<String>) -> Self {
        Self::Header {
            line,
            content: content.into(),
        }
    }

    /// Create a recoverable per-record error.
    pub fn record(transaction: TransactionId, line: usize, reason: impl Into<String>) -> Self {
        Self::Record {
            transaction,
            line,
            reason: reason.into(),
        }
    }

    /// Whether reading may continue after this error.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Record { .. })
    }
}
