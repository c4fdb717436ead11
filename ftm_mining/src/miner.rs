//! The level-wise (BFS) miner.

use std::sync::Arc;

use ftm_common::{
    ExtensionEdge, FrequentAlphabet, LabeledTree, MiningConfig, OperatorKind, TransactionDb,
    canonical_string,
};
use ftm_subtree::{CharacteristicStore, StoreError};
use tracing::{debug, info, warn};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::candidates::{self, Candidate, Level};
use crate::context::{LevelStats, MiningContext, MiningReport};
use crate::error::MiningError;
use crate::operator::{EmbeddingOperator, IterativeSubtreeCheck, NoniterativeSubtreeCheck};
use crate::sink::PatternSink;
use crate::support::{Pattern, SubtreeIsoDataStore, SupportSet};

/// Breadth-first frequent subtree miner, generic over the embedding operator.
pub struct LevelwiseMiner<O: EmbeddingOperator> {
    config: MiningConfig,
    operator: O,
}

impl<O: EmbeddingOperator> LevelwiseMiner<O> {
    /// Miner with the given configuration and operator.
    pub const fn new(config: MiningConfig, operator: O) -> Self {
        Self { config, operator }
    }

    /// The configuration.
    pub const fn config(&self) -> &MiningConfig {
        &self.config
    }

    /// Mine `db`, reporting every frequent pattern to `sink` as soon as its
    /// level is complete.
    pub fn run(
        &self,
        db: &TransactionDb,
        sink: &mut impl PatternSink,
    ) -> Result<MiningReport, MiningError> {
        let mut ctx = MiningContext::new(&self.config);
        let threshold = self.config.threshold;
        info!(
            "Mining {} transactions at threshold {} with the {} operator",
            db.len(),
            threshold,
            self.operator.name()
        );
        if self.config.max_pattern_size == 0 {
            sink.finish()?;
            return Ok(ctx.into_report());
        }

        let alphabet = FrequentAlphabet::collect(db, threshold);
        info!(
            "{} frequent vertex labels, {} frequent edges",
            alphabet.vertices().len(),
            alphabet.edges().len()
        );

        let mut level = self.seed(db, &alphabet, &mut ctx)?;
        self.emit(&level, sink)?;
        let extensions = alphabet.extension_edges();

        for size in 2..=self.config.max_pattern_size {
            if level.is_empty() || ctx.is_truncated() {
                break;
            }
            if ctx.expired() {
                warn!("Time limit reached before level {size}; stopping");
                ctx.mark_truncated();
                break;
            }
            info!("Processing patterns with {size} vertices");
            level = self.next_level(&level, &extensions, &mut ctx)?;
            self.emit(&level, sink)?;
        }

        sink.finish()?;
        let report = ctx.into_report();
        info!(
            "Found {} frequent patterns in {:.2?}{}",
            report.frequent_patterns,
            report.elapsed,
            if report.truncated { " (truncated)" } else { "" }
        );
        Ok(report)
    }

    /// Level 1: one pattern per frequent vertex label, stores by label
    /// compatibility.
    fn seed(
        &self,
        db: &TransactionDb,
        alphabet: &FrequentAlphabet,
        ctx: &mut MiningContext,
    ) -> Result<Level, MiningError> {
        let mut level = Level::new(1);
        let transactions = db.as_slice();
        for vertex in alphabet.vertices() {
            let tree = LabeledTree::single(vertex.label.clone());
            let pattern = Arc::new(Pattern {
                id: ctx.fresh_id(),
                canonical: canonical_string(&tree),
                tree: Arc::new(tree),
            });
            let pattern_tree = Arc::clone(&pattern.tree);
            let elements = vertex.transactions.iter().map(|&position| {
                let transaction = &transactions[position];
                let text = transaction.tree();
                let hits = (0..text.n()).filter(|&v| vertex.label.compatible(text.label(v)));
                SubtreeIsoDataStore {
                    transaction: Arc::clone(transaction),
                    pattern: Arc::clone(&pattern_tree),
                    store: Arc::new(CharacteristicStore::singleton(text.n(), hits)),
                    found_iso: true,
                }
            });
            level.promote(SupportSet::from_elements(pattern, elements)?);
        }
        ctx.record_level(LevelStats {
            size: 1,
            frequent: level.len(),
            ..LevelStats::default()
        });
        Ok(level)
    }

    fn next_level(
        &self,
        previous: &Level,
        extensions: &[ExtensionEdge],
        ctx: &mut MiningContext,
    ) -> Result<Level, MiningError> {
        let size = previous.size + 1;
        let mut stats = LevelStats {
            size,
            ..LevelStats::default()
        };
        let candidates = candidates::extend_level(
            previous,
            extensions,
            self.config.threshold,
            ctx,
            &mut stats,
        )?;

        let mut level = Level::new(size);
        for (candidate, superset) in candidates {
            if ctx.expired() {
                warn!("Time limit reached during level {size}; remaining candidates skipped");
                ctx.mark_truncated();
                break;
            }
            let embeddings = self.evaluate(&candidate, &superset, size)?;
            if embeddings.len() < self.config.threshold {
                continue;
            }
            let pattern = Arc::new(Pattern {
                id: ctx.fresh_id(),
                tree: Arc::clone(&candidate.tree),
                canonical: candidate.canonical,
            });
            level.promote(SupportSet::from_elements(pattern, embeddings)?);
        }
        stats.frequent = level.len();

        info!("{stats}");
        ctx.record_level(stats);
        Ok(level)
    }

    /// Run the operator on every transaction of the superset and keep the
    /// embeddings, in transaction order.
    fn evaluate(
        &self,
        candidate: &Candidate,
        superset: &SupportSet,
        level: usize,
    ) -> Result<Vec<SubtreeIsoDataStore>, MiningError> {
        for element in superset.elements() {
            if !Arc::ptr_eq(&element.pattern, &candidate.parent.tree) {
                return Err(MiningError::ForeignBase {
                    level,
                    parent: candidate.parent.id,
                    candidate: candidate.canonical.to_string(),
                    transaction: element.transaction_id(),
                });
            }
        }

        let evaluate = |element: &SubtreeIsoDataStore| {
            self.operator
                .evaluate(element, candidate)
                .map_err(|source| (element.transaction_id(), source))
        };
        #[cfg(feature = "rayon")]
        let results: Vec<Result<SubtreeIsoDataStore, _>> = if self.config.parallel {
            superset.elements().par_iter().map(evaluate).collect()
        } else {
            superset.elements().iter().map(evaluate).collect()
        };
        #[cfg(not(feature = "rayon"))]
        let results: Vec<Result<SubtreeIsoDataStore, _>> =
            superset.elements().iter().map(evaluate).collect();

        let mut embeddings = Vec::with_capacity(results.len());
        for result in results {
            let evaluated = result.map_err(|(transaction, source): (_, StoreError)| {
                MiningError::Invariant {
                    level,
                    parent: candidate.parent.id,
                    candidate: candidate.canonical.to_string(),
                    transaction,
                    source,
                }
            })?;
            if evaluated.found_iso {
                embeddings.push(evaluated);
            }
        }
        debug!(
            "candidate '{}': {} of {} transactions",
            candidate.canonical,
            embeddings.len(),
            superset.len()
        );
        Ok(embeddings)
    }

    fn emit(&self, level: &Level, sink: &mut impl PatternSink) -> Result<(), MiningError> {
        for support in level.support_sets.values() {
            sink.emit(support)?;
        }
        Ok(())
    }
}

/// Mine with the operator selected by `config.operator`.
pub fn mine(
    db: &TransactionDb,
    config: &MiningConfig,
    sink: &mut impl PatternSink,
) -> Result<MiningReport, MiningError> {
    match config.operator {
        OperatorKind::Iterative => {
            LevelwiseMiner::new(config.clone(), IterativeSubtreeCheck).run(db, sink)
        }
        OperatorKind::Noniterative => {
            LevelwiseMiner::new(config.clone(), NoniterativeSubtreeCheck).run(db, sink)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ftm_common::{Label, PatternId, Transaction, TransactionId};
    use ftm_subtree::LeafExtension;

    fn pattern(id: u32, tree: LabeledTree) -> Arc<Pattern> {
        Arc::new(Pattern {
            id: PatternId::new(id),
            canonical: canonical_string(&tree),
            tree: Arc::new(tree),
        })
    }

    fn superset_of(owner: &Arc<Pattern>) -> SupportSet {
        let text = LabeledTree::single(Label::named("a"));
        let element = SubtreeIsoDataStore {
            transaction: Arc::new(Transaction::new(TransactionId::new(4), 0, text)),
            pattern: Arc::clone(&owner.tree),
            store: Arc::new(CharacteristicStore::singleton(1, [0])),
            found_iso: true,
        };
        SupportSet::from_elements(Arc::clone(owner), [element]).unwrap()
    }

    #[test]
    fn stores_of_another_pattern_are_rejected() {
        let a = LabeledTree::single(Label::named("a"));
        let parent = pattern(1, a.clone());
        let other = pattern(2, a.clone());
        let grown = a.with_leaf(0, Label::named("a"), Label::named("x")).unwrap();
        let candidate = Candidate {
            canonical: canonical_string(&grown),
            tree: Arc::new(grown),
            extension: LeafExtension { anchor: 0, leaf: 1 },
            parent: Arc::clone(&parent),
            apriori_parents: vec![PatternId::new(1)],
        };
        let miner = LevelwiseMiner::new(MiningConfig::with_threshold(1), IterativeSubtreeCheck);

        let err = miner.evaluate(&candidate, &superset_of(&other), 2).unwrap_err();
        assert!(matches!(
            err,
            MiningError::ForeignBase { level: 2, transaction, .. }
                if transaction == TransactionId::new(4)
        ));
        // the parent's own stores are accepted; "a" has no a-x-a embedding
        let embeddings = miner.evaluate(&candidate, &superset_of(&parent), 2).unwrap();
        assert!(embeddings.is_empty());
    }
}
