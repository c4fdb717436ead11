use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Parser};
use ftm_common::*;

/// Frequent subtree miner - find every labelled tree pattern that occurs in
/// at least `threshold` graphs of a database
#[derive(Parser, Debug)]
#[command(name = "ftm")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Graph database to mine; `-` or nothing reads stdin
    pub input: Option<PathBuf>,

    /// Minimum number of graphs a pattern must occur in
    #[arg(short = 't', long, default_value_t = DEFAULT_THRESHOLD)]
    pub threshold: usize,

    /// Largest pattern size, in vertices
    #[arg(short = 'p', long, default_value_t = DEFAULT_MAX_PATTERN_SIZE)]
    pub max_pattern_size: usize,

    /// Lattice traversal
    #[arg(short = 'm', long, value_enum, default_value = "bfs")]
    pub mining_strategy: StrategyArg,

    /// Embedding operator used to evaluate candidates
    #[arg(long, value_enum, default_value = "iterative")]
    pub operator: OperatorArg,

    /// Write `<support>\t<pattern>` lines here instead of stdout
    #[arg(short = 'o', long)]
    pub pattern_file: Option<PathBuf>,

    /// Write `<pattern id>: <graph ids>` lines here instead of stdout
    #[arg(short = 'f', long)]
    pub feature_file: Option<PathBuf>,

    /// Enable parallel execution
    #[arg(long, action = ArgAction::Set, default_value_t = true)]
    pub parallel: bool,

    /// Stop after this many seconds, keeping what was found so far
    #[arg(long, value_name = "SECONDS")]
    pub time_limit: Option<u64>,

    /// Stop once a level generates this many candidates
    #[arg(long, value_name = "N")]
    pub max_candidates: Option<usize>,

    /// Only read the first N graphs
    #[arg(long, value_name = "N")]
    pub limit: Option<usize>,

    /// Print the effective configuration as JSON to stderr
    #[arg(long, default_value_t = false)]
    pub print_config: bool,
}

impl Args {
    /// Convert command-line arguments into a mining configuration
    pub fn to_config(&self) -> MiningConfig {
        let mut builder = MiningConfig::builder()
            .threshold(self.threshold)
            .max_pattern_size(self.max_pattern_size)
            .strategy(self.mining_strategy.clone().into())
            .operator(self.operator.clone().into())
            .parallel(self.parallel);
        if let Some(seconds) = self.time_limit {
            builder = builder.time_limit(Duration::from_secs(seconds));
        }
        if let Some(cap) = self.max_candidates {
            builder = builder.max_candidates_per_level(cap);
        }
        builder.build()
    }

    /// The input path, unless the database comes from stdin
    pub fn input_path(&self) -> Option<&PathBuf> {
        self.input.as_ref().filter(|path| path.as_os_str() != "-")
    }
}

/// Command-line argument wrapper for MiningStrategy
#[derive(Debug, Clone, clap::ValueEnum)]
pub enum StrategyArg {
    /// Level-wise, breadth first
    #[value(name = "bfs")]
    Bfs,
}

impl From<StrategyArg> for MiningStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Bfs => MiningStrategy::Bfs,
        }
    }
}

/// Command-line argument wrapper for OperatorKind
#[derive(Debug, Clone, clap::ValueEnum)]
pub enum OperatorArg {
    /// Derive each candidate's store from its parent's
    #[value(name = "iterative")]
    Iterative,
    /// Recompute every store from scratch
    #[value(name = "noniterative")]
    Noniterative,
}

impl From<OperatorArg> for OperatorKind {
    fn from(arg: OperatorArg) -> Self {
        match arg {
            OperatorArg::Iterative => OperatorKind::Iterative,
            OperatorArg::Noniterative => OperatorKind::Noniterative,
        }
    }
}
