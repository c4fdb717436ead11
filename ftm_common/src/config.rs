//! Configuration for a mining run.
//!
//! The surface is small on purpose: the support threshold and the maximum
//! pattern size decide what is mined, the remaining knobs only decide how.
//!
//! Quick examples
//!
//! Default run (threshold 1000, patterns up to 20 vertices):
//! ```ignore
//! use ftm_common::MiningConfig;
//! let cfg = MiningConfig::default();
//! ```
//!
//! Small threshold, recompute every store from scratch, give up after a minute:
//! ```ignore
//! use std::time::Duration;
//! use ftm_common::{MiningConfig, OperatorKind};
//! let cfg = MiningConfig::builder()
//!     .threshold(2)
//!     .operator(OperatorKind::Noniterative)
//!     .time_limit(Duration::from_secs(60))
//!     .build();
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default minimum support.
pub const DEFAULT_THRESHOLD: usize = 1000;
/// Default maximum number of pattern vertices.
pub const DEFAULT_MAX_PATTERN_SIZE: usize = 20;

/// Search order over the pattern lattice.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MiningStrategy {
    /// Level by level, one vertex more per level.
    #[default]
    Bfs,
}

/// How a candidate's embeddings are evaluated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperatorKind {
    /// Derive the store from the parent pattern's store.
    #[default]
    Iterative,
    /// Recompute every store from scratch.
    Noniterative,
}

/// Parameters of one mining run.
///
/// - threshold: minimum number of transactions a pattern must occur in.
/// - max_pattern_size: the last level mined, in vertices.
/// - time_limit / max_candidates_per_level: optional caps. Hitting either
///   ends the run early; everything reported up to that point stays valid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MiningConfig {
    /// Minimum support.
    pub threshold: usize,
    /// Largest pattern size (vertices) to mine.
    pub max_pattern_size: usize,
    /// Lattice traversal.
    pub strategy: MiningStrategy,
    /// Embedding evaluation.
    pub operator: OperatorKind,
    /// Evaluate transactions on the thread pool.
    pub parallel: bool,
    /// Wall-clock budget for the whole run.
    pub time_limit: Option<Duration>,
    /// Stop once a level generates more candidates than this.
    pub max_candidates_per_level: Option<usize>,
}

impl MiningConfig {
    /// Start from the defaults.
    pub fn builder() -> MiningConfigBuilder {
        MiningConfigBuilder::default()
    }

    /// Convenience: defaults with the given threshold.
    pub fn with_threshold(threshold: usize) -> Self {
        Self::builder().threshold(threshold).build()
    }
}

impl Default for MiningConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            max_pattern_size: DEFAULT_MAX_PATTERN_SIZE,
            strategy: MiningStrategy::Bfs,
            operator: OperatorKind::Iterative,
            parallel: true,
            time_limit: None,
            max_candidates_per_level: None,
        }
    }
}

/// Fluent builder for [`MiningConfig`].
#[derive(Clone, Debug, Default)]
pub struct MiningConfigBuilder {
    config: MiningConfig,
}

impl MiningConfigBuilder {
    /// Minimum support.
    pub const fn threshold(mut self, threshold: usize) -> Self {
        self.config.threshold = threshold;
        self
    }

    /// Largest pattern size in vertices.
    pub const fn max_pattern_size(mut self, size: usize) -> Self {
        self.config.max_pattern_size = size;
        self
    }

    /// Lattice traversal.
    pub const fn strategy(mut self, strategy: MiningStrategy) -> Self {
        self.config.strategy = strategy;
        self
    }

    /// Embedding evaluation.
    pub const fn operator(mut self, operator: OperatorKind) -> Self {
        self.config.operator = operator;
        self
    }

    /// Use the thread pool.
    pub const fn parallel(mut self, parallel: bool) -> Self {
        self.config.parallel = parallel;
        self
    }

    /// Wall-clock budget.
    pub const fn time_limit(mut self, limit: Duration) -> Self {
        self.config.time_limit = Some(limit);
        self
    }

    /// Candidate cap per level.
    pub const fn max_candidates_per_level(mut self, cap: usize) -> Self {
        self.config.max_candidates_per_level = Some(cap);
        self
    }

    /// Finish.
    pub fn build(self) -> MiningConfig {
        self.config
    }
}
