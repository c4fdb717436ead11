//! Labeled trees and forests.
//!
//! A [`LabeledTree`] is an undirected, vertex- and edge-labeled acyclic graph
//! with dense vertex indices `0..n`. Transactions may be forests; patterns are
//! always connected. The structure is immutable once built: growing or
//! shrinking a pattern produces a new value.

use contracts::*;

use crate::error::TreeError;
use crate::label::Label;

/// One entry of an adjacency list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Neighbor {
    /// The adjacent vertex.
    pub vertex: usize,
    /// Label of the connecting edge.
    pub label: Label,
}

/// An undirected labeled forest.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LabeledTree {
    labels: Vec<Label>,
    adjacency: Vec<Vec<Neighbor>>,
    edge_count: usize,
}

impl LabeledTree {
    /// A tree consisting of one vertex.
    pub fn single(label: Label) -> Self {
        Self {
            labels: vec![label],
            adjacency: vec![Vec::new()],
            edge_count: 0,
        }
    }

    /// Build a forest from vertex labels and `(v, w, label)` edges.
    ///
    /// Fails on out-of-range endpoints, self loops and on any edge that would
    /// close a cycle.
    pub fn build(
        labels: Vec<Label>,
        edges: impl IntoIterator<Item = (usize, usize, Label)>,
    ) -> Result<Self, TreeError> {
        let n = labels.len();
        let mut adjacency = vec![Vec::new(); n];
        let mut components = DisjointSets::new(n);
        let mut edge_count = 0;

        for (v, w, label) in edges {
            for vertex in [v, w] {
                if vertex >= n {
                    return Err(TreeError::VertexOutOfRange { vertex, n });
                }
            }
            if v == w {
                return Err(TreeError::SelfLoop { vertex: v });
            }
            if !components.union(v, w) {
                return Err(TreeError::Cycle { v, w });
            }
            adjacency[v].push(Neighbor {
                vertex: w,
                label: label.clone(),
            });
            adjacency[w].push(Neighbor { vertex: v, label });
            edge_count += 1;
        }

        Ok(Self {
            labels,
            adjacency,
            edge_count,
        })
    }

    /// Number of vertices.
    pub fn n(&self) -> usize {
        self.labels.len()
    }

    /// Number of edges.
    pub const fn m(&self) -> usize {
        self.edge_count
    }

    /// Whether the tree has no vertices.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Label of vertex `v`.
    #[debug_requires(v < self.n())]
    pub fn label(&self, v: usize) -> &Label {
        &self.labels[v]
    }

    /// All vertex labels, by index.
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Adjacency list of `v`.
    #[debug_requires(v < self.n())]
    pub fn neighbors(&self, v: usize) -> &[Neighbor] {
        &self.adjacency[v]
    }

    /// Number of edges incident to `v`.
    pub fn degree(&self, v: usize) -> usize {
        self.adjacency[v].len()
    }

    /// Whether `v` has at most one neighbor.
    pub fn is_leaf(&self, v: usize) -> bool {
        self.degree(v) <= 1
    }

    /// All vertices with at most one neighbor.
    pub fn leaves(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.n()).filter(|&v| self.is_leaf(v))
    }

    /// Label of the edge `v`-`w`, if present.
    pub fn edge_label(&self, v: usize, w: usize) -> Option<&Label> {
        self.adjacency
            .get(v)?
            .iter()
            .find(|nb| nb.vertex == w)
            .map(|nb| &nb.label)
    }

    /// Every edge once, as `(v, w, label)` with `v < w`.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize, &Label)> + '_ {
        self.adjacency.iter().enumerate().flat_map(|(v, list)| {
            list.iter()
                .filter(move |nb| v < nb.vertex)
                .map(move |nb| (v, nb.vertex, &nb.label))
        })
    }

    /// Whether the forest consists of exactly one tree.
    pub fn is_connected(&self) -> bool {
        self.is_empty() || self.edge_count + 1 == self.n()
    }

    /// A copy of this tree with a new leaf attached to `anchor`.
    ///
    /// The new vertex always receives index `self.n()`.
    #[debug_ensures(ret.as_ref().map_or(true, |t| t.n() == self.n() + 1))]
    pub fn with_leaf(
        &self,
        anchor: usize,
        vertex_label: Label,
        edge_label: Label,
    ) -> Result<Self, TreeError> {
        let n = self.n();
        if anchor >= n {
            return Err(TreeError::VertexOutOfRange { vertex: anchor, n });
        }
        let mut grown = self.clone();
        grown.labels.push(vertex_label);
        grown.adjacency.push(vec![Neighbor {
            vertex: anchor,
            label: edge_label.clone(),
        }]);
        grown.adjacency[anchor].push(Neighbor {
            vertex: n,
            label: edge_label,
        });
        grown.edge_count += 1;
        Ok(grown)
    }

    /// A copy of this tree with the leaf `leaf` removed.
    ///
    /// Vertices above `leaf` move down by one index.
    pub fn without_leaf(&self, leaf: usize) -> Result<Self, TreeError> {
        let n = self.n();
        if leaf >= n {
            return Err(TreeError::VertexOutOfRange { vertex: leaf, n });
        }
        if !self.is_leaf(leaf) {
            return Err(TreeError::NotALeaf { vertex: leaf });
        }
        let shift = |v: usize| if v > leaf { v - 1 } else { v };

        let labels = self
            .labels
            .iter()
            .enumerate()
            .filter(|&(v, _)| v != leaf)
            .map(|(_, label)| label.clone())
            .collect();
        let adjacency = self
            .adjacency
            .iter()
            .enumerate()
            .filter(|&(v, _)| v != leaf)
            .map(|(_, list)| {
                list.iter()
                    .filter(|nb| nb.vertex != leaf)
                    .map(|nb| Neighbor {
                        vertex: shift(nb.vertex),
                        label: nb.label.clone(),
                    })
                    .collect()
            })
            .collect();

        Ok(Self {
            labels,
            adjacency,
            edge_count: self.edge_count - self.degree(leaf),
        })
    }
}

/// Union-find with path halving, used to reject cycles while building.
struct DisjointSets {
    parent: Vec<usize>,
}

impl DisjointSets {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
        }
    }

    fn find(&mut self, mut v: usize) -> usize {
        while self.parent[v] != v {
            self.parent[v] = self.parent[self.parent[v]];
            v = self.parent[v];
        }
        v
    }

    /// Returns false if `v` and `w` were already in the same set.
    fn union(&mut self, v: usize, w: usize) -> bool {
        let (rv, rw) = (self.find(v), self.find(w));
        if rv == rw {
            return false;
        }
        self.parent[rv] = rw;
        true
    }
}
