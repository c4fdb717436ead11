#![allow(missing_docs)]

use ftm_subtree::bipartite::{self, BipartiteGraph, Coverage};
use quickcheck::{Arbitrary, Gen, quickcheck};

#[derive(Clone, Debug)]
struct SmallGraph(BipartiteGraph);

impl Arbitrary for SmallGraph {
    fn arbitrary(g: &mut Gen) -> Self {
        let left = usize::arbitrary(g) % 6;
        let right = usize::arbitrary(g) % 6;
        let mut graph = BipartiteGraph::new(left, right);
        for l in 0..left {
            for r in 0..right {
                if bool::arbitrary(g) {
                    graph.add_edge(l, r);
                }
            }
        }
        Self(graph)
    }
}

/// Size of a maximum matching by trying every assignment.
fn brute_force_size(graph: &BipartiteGraph, left: usize, used: &mut Vec<bool>, skip: Option<usize>) -> usize {
    if left == graph.left_count() {
        return 0;
    }
    let mut best = brute_force_size(graph, left + 1, used, skip);
    if Some(left) != skip {
        for &r in graph.edges(left) {
            if !used[r] {
                used[r] = true;
                best = best.max(1 + brute_force_size(graph, left + 1, used, skip));
                used[r] = false;
            }
        }
    }
    best
}

quickcheck! {
    fn prop_matching_is_maximum(graph: SmallGraph) -> bool {
        let mut used = vec![false; graph.0.right_count()];
        bipartite::max_matching_size(&graph.0) == brute_force_size(&graph.0, 0, &mut used, None)
    }

    fn prop_covers_left_agrees(graph: SmallGraph) -> bool {
        bipartite::covers_left(&graph.0)
            == (bipartite::max_matching_size(&graph.0) == graph.0.left_count())
    }

    fn prop_noncritical_means_removable(graph: SmallGraph) -> bool {
        let g = &graph.0;
        let size = bipartite::max_matching_size(g);
        match bipartite::analyze(g) {
            Coverage::Perfect => size == g.left_count(),
            Coverage::Deficient => size + 2 <= g.left_count(),
            Coverage::AllButOne { noncritical, .. } => {
                size + 1 == g.left_count()
                    && (0..g.left_count()).all(|l| {
                        let mut used = vec![false; g.right_count()];
                        let without = brute_force_size(g, 0, &mut used, Some(l));
                        noncritical.contains(&l) == (without == g.left_count() - 1)
                    })
            }
        }
    }
}
