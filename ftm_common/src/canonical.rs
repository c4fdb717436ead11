//! Canonical strings for unrooted labeled trees.
//!
//! The string of a tree rooted at `r` is the label of `r` followed by one
//! group `( edge-label child-string )` per child, groups sorted ascending.
//! An unrooted tree uses the smallest such string over its centers, so two
//! trees are isomorphic exactly when their canonical strings are equal.

use std::fmt;

use contracts::*;
use itertools::Itertools;

use crate::postorder::Postorder;
use crate::tree::LabeledTree;

const OPEN: &str = "(";
const CLOSE: &str = ")";

/// Token sequence identifying a tree up to isomorphism.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CanonicalString {
    tokens: Vec<String>,
}

impl CanonicalString {
    /// The individual tokens.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Whether this is the string of the empty tree.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl fmt::Display for CanonicalString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tokens.iter().join(" "))
    }
}

/// Canonical string of a connected tree.
#[debug_requires(tree.is_connected(), "canonical strings are defined for trees only")]
pub fn canonical_string(tree: &LabeledTree) -> CanonicalString {
    centers(tree)
        .into_iter()
        .map(|center| rooted_string(tree, center))
        .min()
        .unwrap_or_default()
}

/// Canonical string of `tree` rooted at `root`.
///
/// Built bottom-up along a postorder, without recursion.
pub fn rooted_string(tree: &LabeledTree, root: usize) -> CanonicalString {
    let postorder = Postorder::compute(tree, root);
    let mut partial: Vec<Option<Vec<String>>> = vec![None; tree.n()];

    for &v in postorder.first_component() {
        let mut groups: Vec<Vec<String>> = postorder
            .children(tree, v)
            .map(|nb| {
                let child = partial[nb.vertex].take().unwrap_or_default();
                let mut group = Vec::with_capacity(child.len() + 3);
                group.push(OPEN.to_owned());
                group.push(nb.label.to_string());
                group.extend(child);
                group.push(CLOSE.to_owned());
                group
            })
            .collect();
        groups.sort_unstable();

        let mut tokens = vec![tree.label(v).to_string()];
        tokens.extend(groups.into_iter().flatten());
        partial[v] = Some(tokens);
    }

    CanonicalString {
        tokens: partial
            .get_mut(root)
            .and_then(Option::take)
            .unwrap_or_default(),
    }
}

/// The one or two centers of a tree, found by repeatedly stripping leaves.
pub fn centers(tree: &LabeledTree) -> Vec<usize> {
    let n = tree.n();
    if n <= 2 {
        return (0..n).collect();
    }

    let mut degree: Vec<usize> = (0..n).map(|v| tree.degree(v)).collect();
    let mut layer: Vec<usize> = (0..n).filter(|&v| degree[v] <= 1).collect();
    let mut remaining = n;

    while remaining > 2 {
        remaining -= layer.len();
        let mut next = Vec::new();
        for &leaf in &layer {
            degree[leaf] = 0;
            for nb in tree.neighbors(leaf) {
                if degree[nb.vertex] > 0 {
                    degree[nb.vertex] -= 1;
                    if degree[nb.vertex] == 1 {
                        next.push(nb.vertex);
                    }
                }
            }
        }
        layer = next;
    }
    layer.sort_unstable();
    layer
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Label;

    fn tree(labels: &[&str], edges: &[(usize, usize, &str)]) -> LabeledTree {
        LabeledTree::build(
            labels.iter().map(Label::named).collect(),
            edges.iter().map(|&(v, w, l)| (v, w, Label::named(l))),
        )
        .unwrap()
    }

    #[test]
    fn single_edge() {
        let t = tree(&["b", "a"], &[(0, 1, "x")]);
        assert_eq!(canonical_string(&t).to_string(), "a ( x b )");
    }

    #[test]
    fn single_vertex() {
        let t = LabeledTree::single(Label::named("c"));
        assert_eq!(canonical_string(&t).to_string(), "c");
    }

    #[test]
    fn centers_of_paths() {
        let odd = tree(&["a"; 5], &[(0, 1, "e"), (1, 2, "e"), (2, 3, "e"), (3, 4, "e")]);
        assert_eq!(centers(&odd), vec![2]);
        let even = tree(&["a"; 4], &[(0, 1, "e"), (1, 2, "e"), (2, 3, "e")]);
        assert_eq!(centers(&even), vec![1, 2]);
    }

    #[test]
    fn vertex_order_does_not_matter() {
        let a = tree(&["a", "b", "c"], &[(0, 1, "x"), (0, 2, "y")]);
        let b = tree(&["c", "b", "a"], &[(2, 0, "y"), (1, 2, "x")]);
        assert_eq!(canonical_string(&a), canonical_string(&b));
        assert_eq!(canonical_string(&a).to_string(), "a ( x b ) ( y c )");
    }

    #[test]
    fn edge_labels_distinguish() {
        let a = tree(&["a", "b"], &[(0, 1, "x")]);
        let b = tree(&["a", "b"], &[(0, 1, "y")]);
        assert_ne!(canonical_string(&a), canonical_string(&b));
    }
}
