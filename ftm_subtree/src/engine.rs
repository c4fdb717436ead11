//! Subtree isomorphism over characteristic stores.
//!
//! The text is processed in postorder. A cell `(v, u)` only reads cells of
//! the children of `v`, so every cell is final once written. A pattern embeds
//! into the text exactly when some cell contains its own pattern vertex.
//!
//! [`SubtreeIsoEngine::derive`] grows a store by one pattern leaf. Writing
//! `a` for the anchor, `b` for the new leaf and `t(u)` for the neighbor of `u`
//! on the path to `a`, the grown pattern satisfies, for every old vertex `u`:
//!
//! - `t(u)` is in the new cell iff it is in the base cell (the side hanging
//!   off `t(u)` holds `b`, the side that has to embed does not);
//! - `b` is in the new cell of `a` iff `a` is in the base cell;
//! - any other entry of the new cell is also in the base cell.
//!
//! So cells whose base held nothing beyond `t(u)` are copied, and the rest is
//! recomputed and intersected with the base.

use contracts::*;
use ftm_common::{LabeledTree, Neighbor, Postorder};
use tracing::trace;

use crate::bipartite::{self, BipartiteGraph, Coverage};
use crate::cube::CharacteristicStore;
use crate::error::StoreError;

/// A filled store and whether the pattern embeds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IsoResult {
    /// The characteristic store, usable as base for a one-leaf extension.
    pub store: CharacteristicStore,
    /// Whether the pattern is a subtree of the text.
    pub found_iso: bool,
}

/// A pattern grown by one leaf.
///
/// `leaf` is always the highest vertex of the grown pattern.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LeafExtension {
    /// Existing vertex the leaf hangs off.
    pub anchor: usize,
    /// Index of the new vertex.
    pub leaf: usize,
}

/// Subtree isomorphism against one text tree (or forest).
pub struct SubtreeIsoEngine<'text> {
    text: &'text LabeledTree,
    postorder: &'text Postorder,
    children: Vec<Vec<&'text Neighbor>>,
}

impl<'text> SubtreeIsoEngine<'text> {
    /// Prepare the text; `postorder` must be a postorder of `text` covering
    /// every vertex.
    #[debug_requires(postorder.order().len() == text.n())]
    pub fn new(text: &'text LabeledTree, postorder: &'text Postorder) -> Self {
        let children = (0..text.n())
            .map(|v| postorder.children(text, v).collect())
            .collect();
        Self {
            text,
            postorder,
            children,
        }
    }

    /// Fill the complete store of `pattern` from nothing.
    pub fn from_scratch(&self, pattern: &LabeledTree) -> Result<IsoResult, StoreError> {
        self.run(pattern, false)
    }

    /// Decide whether `pattern` embeds, stopping at the first witness.
    ///
    /// The store is left incomplete, which is why only the verdict escapes.
    pub fn check(&self, pattern: &LabeledTree) -> Result<bool, StoreError> {
        self.run(pattern, true).map(|result| result.found_iso)
    }

    fn run(&self, pattern: &LabeledTree, stop_early: bool) -> Result<IsoResult, StoreError> {
        let (text, k) = (self.text, pattern.n());
        if k == 0 {
            return Ok(IsoResult {
                store: CharacteristicStore::with_capacities(text.n(), 0, |_, _| 0),
                found_iso: true,
            });
        }
        let mut store = CharacteristicStore::with_capacities(text.n(), k, |v, u| {
            if pattern.label(u).compatible(text.label(v)) {
                pattern.degree(u) + 1
            } else {
                0
            }
        });

        let mut found_iso = false;
        let mut entries = Vec::new();
        for &v in self.postorder.order() {
            for u in 0..k {
                if store.capacity(v, u) == 0 {
                    continue;
                }
                entries.clear();
                self.compute_cell(pattern, &store, v, u, &mut entries);
                for &y in &entries {
                    record(&mut store, pattern, v, u, y)?;
                }
                if store.has_full(v, u) {
                    found_iso = true;
                    if stop_early {
                        trace!("witness at text vertex {v} for pattern vertex {u}");
                        return Ok(IsoResult { store, found_iso });
                    }
                }
            }
        }
        Ok(IsoResult { store, found_iso })
    }

    /// Entries of cell `(v, u)` given final cells for the children of `v`.
    /// Labels of `u` and `v` must be compatible.
    fn compute_cell(
        &self,
        pattern: &LabeledTree,
        store: &CharacteristicStore,
        v: usize,
        u: usize,
        out: &mut Vec<usize>,
    ) {
        let neighbors = pattern.neighbors(u);
        if neighbors.is_empty() {
            out.push(u);
            return;
        }
        let children = &self.children[v];
        let graph = BipartiteGraph::from_predicate(neighbors.len(), children.len(), |l, r| {
            let (y, c) = (&neighbors[l], children[r]);
            y.label.compatible(&c.label) && store.contains(c.vertex, y.vertex, u)
        });
        match bipartite::analyze(&graph) {
            Coverage::Perfect => {
                out.extend(neighbors.iter().map(|y| y.vertex));
                out.push(u);
            }
            Coverage::AllButOne { noncritical, .. } => {
                out.extend(noncritical.into_iter().map(|l| neighbors[l].vertex));
            }
            Coverage::Deficient => {}
        }
    }

    /// Store of `pattern` (the base pattern plus `extension.leaf`) derived
    /// from the store of the base pattern.
    ///
    /// The base is only read, so sibling extensions may share it.
    pub fn derive(
        &self,
        base: &CharacteristicStore,
        pattern: &LabeledTree,
        extension: LeafExtension,
    ) -> Result<IsoResult, StoreError> {
        let text = self.text;
        let LeafExtension { anchor, leaf } = extension;
        let k = pattern.n();
        if base.text_size() != text.n() || base.pattern_size() + 1 != k {
            return Err(StoreError::ShapeMismatch {
                store_text: base.text_size(),
                store_pattern: base.pattern_size(),
                text: text.n(),
                pattern: k,
            });
        }
        let hangs_off_anchor = |pattern: &LabeledTree| {
            matches!(pattern.neighbors(leaf), [only] if only.vertex == anchor)
        };
        if leaf + 1 != k || anchor >= leaf || !hangs_off_anchor(pattern) {
            return Err(StoreError::InvalidExtension {
                anchor,
                leaf,
                pattern_size: k,
            });
        }
        let toward_anchor = Postorder::compute(pattern, anchor);
        let leaf_label = pattern.label(leaf);
        let leaf_edge = &pattern.neighbors(leaf)[0].label;

        let mut store = CharacteristicStore::with_capacities(text.n(), k, |v, u| {
            if u == leaf {
                2
            } else {
                base.len(v, u) + usize::from(u == anchor)
            }
        });

        let mut found_iso = false;
        let mut entries = Vec::new();
        for &v in self.postorder.order() {
            for u in 0..leaf {
                let old = base.characteristics(v, u);
                if old.is_empty() {
                    continue;
                }
                let up = toward_anchor.parent(u);
                if let Some(t) = up.filter(|&t| old.contains(&(t as u32))) {
                    record(&mut store, pattern, v, u, t)?;
                }
                if u == anchor && old.contains(&(anchor as u32)) {
                    record(&mut store, pattern, v, anchor, leaf)?;
                }
                if old.iter().any(|&y| Some(y as usize) != up) {
                    entries.clear();
                    self.compute_cell(pattern, &store, v, u, &mut entries);
                    for &y in &entries {
                        if Some(y) != up && y != leaf && old.contains(&(y as u32)) {
                            record(&mut store, pattern, v, u, y)?;
                        }
                    }
                }
                found_iso |= store.has_full(v, u);
            }

            if leaf_label.compatible(text.label(v)) {
                record(&mut store, pattern, v, leaf, anchor)?;
                let completes = self.children[v].iter().any(|c| {
                    leaf_edge.compatible(&c.label) && store.contains(c.vertex, anchor, leaf)
                });
                if completes {
                    record(&mut store, pattern, v, leaf, leaf)?;
                    found_iso = true;
                }
            }
        }
        Ok(IsoResult { store, found_iso })
    }
}

/// Insert into the store; `y` must be `u` or a pattern neighbor of `u`.
#[debug_requires(y == u || pattern.edge_label(u, y).is_some(), "entry is not adjacent to its cell")]
fn record(
    store: &mut CharacteristicStore,
    pattern: &LabeledTree,
    v: usize,
    u: usize,
    y: usize,
) -> Result<(), StoreError> {
    store.insert(v, u, y)
}
