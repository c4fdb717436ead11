//! Incremental subtree isomorphism.
//!
//! The engine decides whether a small unrooted pattern tree embeds into a
//! text tree by filling a [`CharacteristicStore`] bottom-up over the text,
//! solving one small bipartite matching per cell. A store filled for a
//! pattern is the base from which the store of any one-leaf extension of that
//! pattern is derived, without redoing the work for unaffected cells.

pub mod bipartite;
pub mod cube;
pub mod engine;
mod error;

pub use crate::bipartite::{BipartiteGraph, Coverage, Matching};
pub use crate::cube::CharacteristicStore;
pub use crate::engine::{IsoResult, LeafExtension, SubtreeIsoEngine};
pub use crate::error::StoreError;
