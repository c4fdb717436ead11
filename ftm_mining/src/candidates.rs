//! Candidate generation for the next level.
//!
//! Every frequent pattern is extended by one leaf in every way the frequent
//! edge alphabet allows. Extensions are deduplicated by canonical string,
//! filtered by the apriori property against the previous level, and given a
//! support superset: the intersection of the support sets of all their
//! apriori parents, with the extended pattern's stores at the head.

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use ftm_common::{
    CanonicalString, ExtensionEdge, LabeledTree, PatternId, PatternIndex, canonical_string,
};
use ftm_subtree::LeafExtension;
use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::context::{LevelStats, MiningContext};
use crate::error::MiningError;
use crate::support::{Pattern, SupportSet};

/// A pattern of the next level, not yet evaluated.
#[derive(Clone, Debug)]
pub struct Candidate {
    /// The grown tree; the new leaf is its last vertex.
    pub tree: Arc<LabeledTree>,
    /// Canonical string of [`Self::tree`].
    pub canonical: CanonicalString,
    /// Where the leaf was attached.
    pub extension: LeafExtension,
    /// The pattern that was extended; its stores are the derivation base.
    pub parent: Arc<Pattern>,
    /// Ids of every pattern obtained by deleting one leaf, ascending.
    pub apriori_parents: Vec<PatternId>,
}

/// The frequent patterns of one size with their support sets.
#[derive(Clone, Debug, Default)]
pub struct Level {
    /// Pattern size in vertices.
    pub size: usize,
    /// Canonical string to id and support.
    pub index: PatternIndex,
    /// Support sets by pattern id, in promotion order.
    pub support_sets: IndexMap<PatternId, SupportSet>,
}

impl Level {
    /// Empty level of the given size.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    /// Add a promoted pattern.
    pub fn promote(&mut self, support: SupportSet) {
        let pattern = support.pattern();
        self.index
            .insert(pattern.canonical.clone(), pattern.id, support.len());
        self.support_sets.insert(pattern.id, support);
    }

    /// Number of patterns.
    pub fn len(&self) -> usize {
        self.support_sets.len()
    }

    /// Whether the level has no patterns.
    pub fn is_empty(&self) -> bool {
        self.support_sets.is_empty()
    }
}

/// Ids of the patterns obtained by deleting one leaf of `tree`, or `None` if
/// one of them is missing from `index`.
pub fn apriori_parents(
    tree: &LabeledTree,
    index: &PatternIndex,
) -> Result<Option<Vec<PatternId>>, MiningError> {
    let mut ids = BTreeSet::new();
    for leaf in tree.leaves() {
        let smaller = tree.without_leaf(leaf)?;
        match index.lookup_id(&canonical_string(&smaller)) {
            Some(id) => {
                ids.insert(id);
            }
            None => return Ok(None),
        }
    }
    Ok(Some(ids.into_iter().collect()))
}

/// Candidates of level `previous.size + 1` with their support supersets.
///
/// Stops early, marking the context truncated, once the candidate cap is hit.
pub fn extend_level(
    previous: &Level,
    alphabet: &[ExtensionEdge],
    threshold: usize,
    ctx: &mut MiningContext,
    stats: &mut LevelStats,
) -> Result<Vec<(Candidate, SupportSet)>, MiningError> {
    let mut seen: HashSet<CanonicalString> = HashSet::new();
    let mut out = Vec::new();

    for support in previous.support_sets.values() {
        let parent = support.pattern();
        for anchor in 0..parent.tree.n() {
            let anchor_label = parent.tree.label(anchor);
            for edge in alphabet.iter().filter(|e| &e.from == anchor_label) {
                stats.generated += 1;
                let tree = parent
                    .tree
                    .with_leaf(anchor, edge.to.clone(), edge.edge.clone())?;
                let canonical = canonical_string(&tree);
                if !seen.insert(canonical.clone()) {
                    continue;
                }
                stats.unique += 1;

                let Some(parent_ids) = apriori_parents(&tree, &previous.index)? else {
                    continue;
                };
                stats.apriori += 1;

                let mut parent_sets: Vec<&SupportSet> = parent_ids
                    .iter()
                    .filter_map(|id| previous.support_sets.get(id))
                    .collect();
                if !SupportSet::change_head(&mut parent_sets, parent.id) {
                    return Err(MiningError::MissingParent {
                        parent: parent.id,
                        candidate: canonical.to_string(),
                    });
                }
                let superset =
                    SupportSet::intersect_all(&parent_sets).unwrap_or_else(|| support.clone());
                if superset.len() < threshold {
                    continue;
                }
                stats.intersection += 1;

                let leaf = tree.n() - 1;
                out.push((
                    Candidate {
                        tree: Arc::new(tree),
                        canonical,
                        extension: LeafExtension { anchor, leaf },
                        parent: Arc::clone(parent),
                        apriori_parents: parent_ids,
                    },
                    superset,
                ));
                if ctx.candidate_cap_reached(out.len()) {
                    warn!(
                        "Candidate cap reached with {} candidates of size {}; stopping early",
                        out.len(),
                        previous.size + 1
                    );
                    ctx.mark_truncated();
                    return Ok(out);
                }
            }
        }
    }
    debug!("{} candidates of size {}", out.len(), previous.size + 1);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ftm_common::{Label, MiningConfig};

    #[test]
    fn apriori_parents_need_every_leaf_deleted_subtree() {
        let a = LabeledTree::single(Label::named("a"));
        let mut index = PatternIndex::new();
        index.insert(canonical_string(&a), PatternId::new(1), 3);

        let aa = a.with_leaf(0, Label::named("a"), Label::named("x")).unwrap();
        assert_eq!(apriori_parents(&aa, &index).unwrap(), Some(vec![PatternId::new(1)]));
        let ab = a.with_leaf(0, Label::named("b"), Label::named("x")).unwrap();
        assert_eq!(apriori_parents(&ab, &index).unwrap(), None);
    }

    #[test]
    fn inconsistent_level_reports_missing_parent() {
        let tree = LabeledTree::single(Label::named("a"));
        let canonical = canonical_string(&tree);
        let parent = Arc::new(Pattern {
            id: PatternId::new(1),
            canonical: canonical.clone(),
            tree: Arc::new(tree),
        });
        let mut level = Level::new(1);
        level.promote(SupportSet::new(parent));
        // index and support sets disagree on the id of "a"
        level.index = PatternIndex::new();
        level.index.insert(canonical, PatternId::new(7), 0);

        let alphabet = [ExtensionEdge {
            from: Label::named("a"),
            edge: Label::named("x"),
            to: Label::named("a"),
        }];
        let mut ctx = MiningContext::new(&MiningConfig::default());
        let mut stats = LevelStats::default();
        let err = extend_level(&level, &alphabet, 0, &mut ctx, &mut stats).unwrap_err();
        assert!(matches!(
            err,
            MiningError::MissingParent { parent, .. } if parent == PatternId::new(1)
        ));
    }
}
