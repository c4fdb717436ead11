//! Small bipartite matching instances.
//!
//! Every cell of the characteristic store asks one question of this module:
//! can all neighbors of a pattern vertex be matched to distinct children of a
//! text vertex, and if exactly one of them cannot, which ones could be the
//! odd one out? Instances have at most a few dozen vertices per side, so a
//! plain augmenting-path (Kuhn) matching is the right tool.

use std::collections::VecDeque;

/// Left-to-right adjacency of a bipartite graph.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BipartiteGraph {
    right_count: usize,
    adjacency: Vec<Vec<usize>>,
}

impl BipartiteGraph {
    /// Graph without edges.
    pub fn new(left_count: usize, right_count: usize) -> Self {
        Self {
            right_count,
            adjacency: vec![Vec::new(); left_count],
        }
    }

    /// Graph with an edge for every compatible `(left, right)` pair.
    pub fn from_predicate(
        left_count: usize,
        right_count: usize,
        mut compatible: impl FnMut(usize, usize) -> bool,
    ) -> Self {
        let adjacency = (0..left_count)
            .map(|l| (0..right_count).filter(|&r| compatible(l, r)).collect())
            .collect();
        Self {
            right_count,
            adjacency,
        }
    }

    /// Add the edge `left`-`right`.
    pub fn add_edge(&mut self, left: usize, right: usize) {
        debug_assert!(right < self.right_count);
        self.adjacency[left].push(right);
    }

    /// Number of left vertices.
    pub fn left_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of right vertices.
    pub const fn right_count(&self) -> usize {
        self.right_count
    }

    /// Right vertices adjacent to `left`.
    pub fn edges(&self, left: usize) -> &[usize] {
        &self.adjacency[left]
    }
}

/// A matching in a [`BipartiteGraph`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Matching {
    left_mate: Vec<Option<usize>>,
    right_mate: Vec<Option<usize>>,
    size: usize,
}

impl Matching {
    fn empty(graph: &BipartiteGraph) -> Self {
        Self {
            left_mate: vec![None; graph.left_count()],
            right_mate: vec![None; graph.right_count()],
            size: 0,
        }
    }

    /// Number of matched pairs.
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Partner of a left vertex.
    pub fn left_mate(&self, left: usize) -> Option<usize> {
        self.left_mate[left]
    }

    /// Partner of a right vertex.
    pub fn right_mate(&self, right: usize) -> Option<usize> {
        self.right_mate[right]
    }

    /// Left vertices without a partner.
    pub fn uncovered_left(&self) -> impl Iterator<Item = usize> + '_ {
        self.left_mate
            .iter()
            .enumerate()
            .filter(|(_, mate)| mate.is_none())
            .map(|(l, _)| l)
    }

    /// Search an augmenting path from the free left vertex `root` and flip it.
    ///
    /// Iterative depth-first search; `stack[k]` is the k-th left vertex on the
    /// current path and `via[k]` the right vertex leading out of it.
    fn augment(&mut self, graph: &BipartiteGraph, root: usize, seen: &mut [bool]) -> bool {
        let mut stack: Vec<(usize, usize)> = vec![(root, 0)];
        let mut via: Vec<usize> = Vec::new();

        while let Some(top) = stack.last_mut() {
            let (left, next) = *top;
            top.1 += 1;
            let Some(&right) = graph.edges(left).get(next) else {
                stack.pop();
                via.pop();
                continue;
            };
            if seen[right] {
                continue;
            }
            seen[right] = true;
            via.push(right);
            match self.right_mate[right] {
                Some(owner) => stack.push((owner, 0)),
                None => {
                    for (&(l, _), &r) in stack.iter().zip(&via) {
                        self.left_mate[l] = Some(r);
                        self.right_mate[r] = Some(l);
                    }
                    self.size += 1;
                    return true;
                }
            }
        }
        false
    }
}

/// Outcome of [`analyze`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Coverage {
    /// Every left vertex is matched.
    Perfect,
    /// Exactly one left vertex stays unmatched in a maximum matching.
    AllButOne {
        /// The left vertex left over by the matching that was found.
        uncovered: usize,
        /// Left vertices that could be the unmatched one instead, ascending.
        /// Always contains `uncovered`.
        noncritical: Vec<usize>,
    },
    /// Two or more left vertices stay unmatched.
    Deficient,
}

/// Maximum matching by repeated augmentation.
pub fn maximum_matching(graph: &BipartiteGraph) -> Matching {
    let mut matching = Matching::empty(graph);
    for left in 0..graph.left_count() {
        let mut seen = vec![false; graph.right_count()];
        matching.augment(graph, left, &mut seen);
    }
    matching
}

/// Size of a maximum matching.
pub fn max_matching_size(graph: &BipartiteGraph) -> usize {
    maximum_matching(graph).size()
}

/// Whether all left vertices can be matched.
///
/// Stops at the first left vertex that cannot be added: a left vertex without
/// an augmenting path never gains one later in the same run.
pub fn covers_left(graph: &BipartiteGraph) -> bool {
    if graph.left_count() > graph.right_count() {
        return false;
    }
    let mut matching = Matching::empty(graph);
    (0..graph.left_count()).all(|left| {
        let mut seen = vec![false; graph.right_count()];
        matching.augment(graph, left, &mut seen)
    })
}

/// Classify a graph by how many left vertices a maximum matching misses,
/// giving up after the second miss.
pub fn analyze(graph: &BipartiteGraph) -> Coverage {
    if graph.left_count() > graph.right_count() + 1 {
        return Coverage::Deficient;
    }
    let mut matching = Matching::empty(graph);
    let mut uncovered = None;
    for left in 0..graph.left_count() {
        let mut seen = vec![false; graph.right_count()];
        if !matching.augment(graph, left, &mut seen) {
            if uncovered.is_some() {
                return Coverage::Deficient;
            }
            uncovered = Some(left);
        }
    }
    match uncovered {
        None => Coverage::Perfect,
        Some(uncovered) => Coverage::AllButOne {
            uncovered,
            noncritical: reachable_from(graph, &matching, uncovered),
        },
    }
}

/// Left vertices reachable from the single uncovered left vertex of a
/// maximum matching by alternating paths.
///
/// Returns `None` unless exactly one left vertex is uncovered.
pub fn noncritical_left_vertices(graph: &BipartiteGraph, matching: &Matching) -> Option<Vec<usize>> {
    let mut uncovered = matching.uncovered_left();
    let first = uncovered.next()?;
    if uncovered.next().is_some() {
        return None;
    }
    Some(reachable_from(graph, matching, first))
}

/// Alternating breadth-first search: from a left vertex along any edge to a
/// right vertex, and from there back along its matching edge.
fn reachable_from(graph: &BipartiteGraph, matching: &Matching, start: usize) -> Vec<usize> {
    let mut reached = vec![false; graph.left_count()];
    let mut queue = VecDeque::from([start]);
    reached[start] = true;

    while let Some(left) = queue.pop_front() {
        for &right in graph.edges(left) {
            if matching.left_mate(left) == Some(right) {
                continue;
            }
            match matching.right_mate(right) {
                Some(next) if !reached[next] => {
                    reached[next] = true;
                    queue.push_back(next);
                }
                _ => {}
            }
        }
    }

    reached
        .iter()
        .enumerate()
        .filter(|&(_, &r)| r)
        .map(|(l, _)| l)
        .collect()
}
