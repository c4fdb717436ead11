//! Where promoted patterns go.

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use ftm_common::{CanonicalString, PatternId, TransactionId};
use itertools::Itertools;

use crate::error::MiningError;
use crate::support::SupportSet;

/// Receives every frequent pattern once, level by level.
pub trait PatternSink {
    /// Report one pattern with its support set.
    fn emit(&mut self, support: &SupportSet) -> Result<(), MiningError>;

    /// Called after the last pattern.
    fn finish(&mut self) -> Result<(), MiningError> {
        Ok(())
    }
}

/// Writes the two text streams.
///
/// - patterns: `<support>\t<canonical string>` per line;
/// - features: `<pattern id>: <tid> <tid> ...` per line.
pub struct WriterSink<P: Write, F: Write> {
    patterns: P,
    features: F,
}

impl<P: Write, F: Write> WriterSink<P, F> {
    /// Wrap the two streams.
    pub const fn new(patterns: P, features: F) -> Self {
        Self { patterns, features }
    }

    /// Give the streams back.
    pub fn into_inner(self) -> (P, F) {
        (self.patterns, self.features)
    }
}

impl<W: Write> WriterSink<SharedWriter<W>, SharedWriter<W>> {
    /// Both streams into one writer, each line written whole.
    pub fn single(out: W) -> Self {
        let shared = SharedWriter::new(out);
        Self::new(shared.clone(), shared)
    }

    /// The writer, once both streams are released.
    pub fn into_single(self) -> Option<W> {
        let (patterns, features) = self.into_inner();
        drop(features);
        patterns.into_inner()
    }
}

/// A writer handed to several streams; writes land in call order.
#[derive(Debug)]
pub struct SharedWriter<W: Write> {
    inner: Rc<RefCell<W>>,
}

impl<W: Write> SharedWriter<W> {
    /// Share `inner`.
    pub fn new(inner: W) -> Self {
        Self {
            inner: Rc::new(RefCell::new(inner)),
        }
    }

    /// The writer, if this is the last handle.
    pub fn into_inner(self) -> Option<W> {
        Rc::try_unwrap(self.inner).ok().map(RefCell::into_inner)
    }
}

impl<W: Write> Clone for SharedWriter<W> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<W: Write> Write for SharedWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.borrow_mut().write(buf)
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.inner.borrow_mut().write_all(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.borrow_mut().flush()
    }
}

impl<P: Write, F: Write> PatternSink for WriterSink<P, F> {
    fn emit(&mut self, support: &SupportSet) -> Result<(), MiningError> {
        let pattern = support.pattern();
        writeln!(self.patterns, "{}\t{}", support.len(), pattern.canonical)?;
        writeln!(
            self.features,
            "{}: {}",
            pattern.id,
            support.transaction_ids().join(" ")
        )?;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), MiningError> {
        self.patterns.flush()?;
        self.features.flush()?;
        Ok(())
    }
}

/// A reported pattern, owned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MinedPattern {
    /// Pattern id.
    pub id: PatternId,
    /// Vertex count.
    pub size: usize,
    /// Canonical string.
    pub canonical: CanonicalString,
    /// Supporting transactions, ascending.
    pub transactions: Vec<TransactionId>,
}

impl MinedPattern {
    /// Number of supporting transactions.
    pub fn support(&self) -> usize {
        self.transactions.len()
    }
}

/// Keeps every pattern in memory.
#[derive(Clone, Debug, Default)]
pub struct CollectingSink {
    /// Patterns in report order.
    pub patterns: Vec<MinedPattern>,
}

impl CollectingSink {
    /// Empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Find a pattern by the display form of its canonical string.
    pub fn find(&self, canonical: &str) -> Option<&MinedPattern> {
        self.patterns
            .iter()
            .find(|p| p.canonical.to_string() == canonical)
    }
}

impl PatternSink for CollectingSink {
    fn emit(&mut self, support: &SupportSet) -> Result<(), MiningError> {
        let pattern = support.pattern();
        self.patterns.push(MinedPattern {
            id: pattern.id,
            size: pattern.tree.n(),
            canonical: pattern.canonical.clone(),
            transactions: support.transaction_ids().collect(),
        });
        Ok(())
    }
}
