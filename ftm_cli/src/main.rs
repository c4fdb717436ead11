//! Frequent subtree miner CLI
//!
//! Loads a graph database, mines every frequent tree pattern level by level
//! and writes the pattern and feature streams.

#[global_allocator]
/// Global allocator using jemalloc for better performance in parallel workloads.
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

mod args;

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use clap::Parser;
use ftm_common::load_database;
use ftm_mining::{WriterSink, mine};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use args::Args;

fn open_input(path: Option<&Path>) -> io::Result<Box<dyn BufRead>> {
    Ok(match path {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(BufReader::new(io::stdin())),
    })
}

fn open_output(path: Option<&Path>) -> io::Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout())),
    })
}

/// Runs the miner.
///
/// Logs go to stderr (`RUST_LOG`, default `info`), results to the files
/// named on the command line or stdout.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_thread_ids(true)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = args.to_config();
    if args.print_config {
        eprintln!("{}", serde_json::to_string_pretty(&config)?);
    }

    let input = args.input_path().map(|p| p.as_path());
    match input {
        Some(path) => info!("Loading graphs from {}", path.display()),
        None => info!("Loading graphs from stdin"),
    }
    let db = load_database(open_input(input)?, args.limit)?;
    if db.is_empty() {
        warn!("The database is empty");
    }
    info!("Loaded {} graphs", db.len());

    let pattern_path = args.pattern_file.as_deref();
    let feature_path = args.feature_file.as_deref();
    let report = if pattern_path == feature_path {
        // one destination, one buffer: lines of the two streams stay whole
        let mut sink = WriterSink::single(open_output(pattern_path)?);
        mine(&db, &config, &mut sink)?
    } else {
        let patterns = open_output(pattern_path)?;
        let features = open_output(feature_path)?;
        let mut sink = WriterSink::new(patterns, features);
        mine(&db, &config, &mut sink)?
    };

    info!(
        "{} frequent patterns over {} levels",
        report.frequent_patterns,
        report.levels.len()
    );
    if report.truncated {
        warn!("Results are incomplete: a time or candidate limit was reached");
    }
    Ok(())
}
