//! Errors raised while filling a characteristic store.
//!
//! None of these are expected during a correct mining run. They signal a bug
//! in the caller (wrong base, wrong extension) or in the store bookkeeping.

use thiserror::Error;

/// Invariant violations of the characteristic store and its construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A cell received more entries than it was sized for.
    #[error(
        "characteristic cell (text vertex {text_vertex}, pattern vertex {pattern_vertex}) is full at capacity {capacity}"
    )]
    CapacityExceeded {
        /// Text vertex of the cell.
        text_vertex: usize,
        /// Pattern vertex of the cell.
        pattern_vertex: usize,
        /// Entries the cell was sized for.
        capacity: usize,
    },

    /// A base store does not fit the text or pattern it is combined with.
    #[error(
        "store shape {store_text}x{store_pattern} does not fit text size {text} and pattern size {pattern}"
    )]
    ShapeMismatch {
        /// Text size the store was built for.
        store_text: usize,
        /// Pattern size the store was built for.
        store_pattern: usize,
        /// Size of the text it was combined with.
        text: usize,
        /// Size of the grown pattern.
        pattern: usize,
    },

    /// The extension does not describe the last vertex of the grown pattern
    /// as a leaf hanging off an existing vertex.
    #[error("invalid extension: leaf {leaf} at anchor {anchor} for a pattern of {pattern_size} vertices")]
    InvalidExtension {
        /// Claimed anchor vertex.
        anchor: usize,
        /// Claimed leaf vertex.
        leaf: usize,
        /// Vertices of the grown pattern.
        pattern_size: usize,
    },
}

impl StoreError {
    /// Create a capacity error.
    pub const fn capacity(text_vertex: usize, pattern_vertex: usize, capacity: usize) -> Self {
        Self::CapacityExceeded {
            text_vertex,
            pattern_vertex,
            capacity,
        }
    }
}
