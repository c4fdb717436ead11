//! Per-run state: id counter, limits and statistics.

use std::fmt;
use std::time::{Duration, Instant};

use ftm_common::{MiningConfig, PatternId};

/// Counters of one level, in the order candidates pass the filters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LevelStats {
    /// Pattern size in vertices.
    pub size: usize,
    /// Extensions generated, duplicates included.
    pub generated: usize,
    /// Distinct extensions.
    pub unique: usize,
    /// Extensions whose leaf-deleted subtrees are all frequent.
    pub apriori: usize,
    /// Extensions whose support superset reaches the threshold.
    pub intersection: usize,
    /// Promoted patterns.
    pub frequent: usize,
}

impl fmt::Display for LevelStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "size {}: generated {}, unique {}, apriori {}, intersection {}, frequent {}",
            self.size, self.generated, self.unique, self.apriori, self.intersection, self.frequent
        )
    }
}

/// Summary of a finished run.
#[derive(Clone, Debug, Default)]
pub struct MiningReport {
    /// One entry per mined level.
    pub levels: Vec<LevelStats>,
    /// Total number of frequent patterns reported.
    pub frequent_patterns: usize,
    /// Whether a time or candidate limit cut the run short.
    pub truncated: bool,
    /// Wall-clock time of the run.
    pub elapsed: Duration,
}

/// Mutable state scoped to one mining run.
///
/// Created by the miner when a run starts and consumed into a
/// [`MiningReport`] when it ends.
#[derive(Debug)]
pub struct MiningContext {
    started: Instant,
    deadline: Option<Instant>,
    max_candidates: Option<usize>,
    next_id: PatternId,
    levels: Vec<LevelStats>,
    truncated: bool,
}

impl MiningContext {
    /// Fresh context; pattern ids start at 1.
    pub fn new(config: &MiningConfig) -> Self {
        let started = Instant::now();
        Self {
            started,
            deadline: config.time_limit.map(|limit| started + limit),
            max_candidates: config.max_candidates_per_level,
            next_id: PatternId::new(1),
            levels: Vec::new(),
            truncated: false,
        }
    }

    /// Next unused pattern id.
    pub fn fresh_id(&mut self) -> PatternId {
        let id = self.next_id;
        self.next_id = id.next();
        id
    }

    /// Whether the time limit has passed.
    pub fn expired(&self) -> bool {
        self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }

    /// Whether `count` candidates reach the per-level cap.
    pub fn candidate_cap_reached(&self, count: usize) -> bool {
        self.max_candidates.is_some_and(|cap| count >= cap)
    }

    /// Remember that results are incomplete.
    pub const fn mark_truncated(&mut self) {
        self.truncated = true;
    }

    /// Whether results are incomplete.
    pub const fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Record a finished level.
    pub fn record_level(&mut self, stats: LevelStats) {
        self.levels.push(stats);
    }

    /// Close the run.
    pub fn into_report(self) -> MiningReport {
        MiningReport {
            frequent_patterns: self.levels.iter().map(|l| l.frequent).sum(),
            levels: self.levels,
            truncated: self.truncated,
            elapsed: self.started.elapsed(),
        }
    }
}
