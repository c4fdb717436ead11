//! Level-wise frequent subtree mining.
//!
//! [`LevelwiseMiner`] grows patterns one leaf per level. Each candidate is
//! checked against the apriori property, its support superset is obtained by
//! intersecting its parents' support sets, and only the surviving
//! transactions are evaluated by an [`EmbeddingOperator`]. By default the
//! operator derives every characteristic store from the parent's store.

pub mod candidates;
pub mod context;
mod error;
mod miner;
pub mod operator;
pub mod sink;
pub mod support;

pub use crate::candidates::{Candidate, Level};
pub use crate::context::{LevelStats, MiningContext, MiningReport};
pub use crate::error::MiningError;
pub use crate::miner::{LevelwiseMiner, mine};
pub use crate::operator::{EmbeddingOperator, IterativeSubtreeCheck, NoniterativeSubtreeCheck};
pub use crate::sink::{CollectingSink, MinedPattern, PatternSink, SharedWriter, WriterSink};
pub use crate::support::{Pattern, SubtreeIsoDataStore, SupportSet};
