//! Postorder numbering of a rooted forest.

use crate::tree::{LabeledTree, Neighbor};

/// A postorder traversal of a [`LabeledTree`] together with the parent of
/// every vertex in the induced rooting.
///
/// Disconnected input is fine: every component gets its own root, the first
/// one being the requested root. Component `i` occupies the contiguous slice
/// `order()[component_start(i)..component_start(i + 1)]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Postorder {
    order: Vec<usize>,
    position: Vec<usize>,
    parent: Vec<Option<usize>>,
    roots: Vec<usize>,
    component_starts: Vec<usize>,
}

impl Postorder {
    /// Postorder rooted at vertex 0 (or empty for an empty tree).
    pub fn new(tree: &LabeledTree) -> Self {
        Self::compute(tree, 0)
    }

    /// Postorder whose first component is rooted at `root`.
    ///
    /// Remaining components are rooted at their lowest-index vertex.
    pub fn compute(tree: &LabeledTree, root: usize) -> Self {
        let n = tree.n();
        let mut order = Vec::with_capacity(n);
        let mut parent = vec![None; n];
        let mut visited = vec![false; n];
        let mut roots = Vec::new();
        let mut component_starts = Vec::new();

        let start_candidates = std::iter::once(root)
            .filter(|&r| r < n)
            .chain(0..n);

        // (vertex, next neighbor index to inspect)
        let mut stack: Vec<(usize, usize)> = Vec::new();
        for start in start_candidates {
            if visited[start] {
                continue;
            }
            roots.push(start);
            component_starts.push(order.len());
            visited[start] = true;
            stack.push((start, 0));

            while let Some(top) = stack.last_mut() {
                let (v, next) = *top;
                top.1 += 1;
                if let Some(nb) = tree.neighbors(v).get(next) {
                    if !visited[nb.vertex] {
                        visited[nb.vertex] = true;
                        parent[nb.vertex] = Some(v);
                        stack.push((nb.vertex, 0));
                    }
                } else {
                    order.push(v);
                    stack.pop();
                }
            }
        }
        component_starts.push(order.len());

        let mut position = vec![0; n];
        for (i, &v) in order.iter().enumerate() {
            position[v] = i;
        }

        Self {
            order,
            position,
            parent,
            roots,
            component_starts,
        }
    }

    /// Vertices in postorder.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Index of `v` within [`Self::order`].
    pub fn position(&self, v: usize) -> usize {
        self.position[v]
    }

    /// Parent of `v`; `None` for component roots.
    pub fn parent(&self, v: usize) -> Option<usize> {
        self.parent[v]
    }

    /// One root per connected component, in traversal order.
    pub fn roots(&self) -> &[usize] {
        &self.roots
    }

    /// The postorder restricted to the component of the requested root.
    pub fn first_component(&self) -> &[usize] {
        match self.component_starts.get(1) {
            Some(&end) => &self.order[..end],
            None => &[],
        }
    }

    /// Children of `v` in this rooting, with the connecting edge labels.
    pub fn children<'t>(
        &self,
        tree: &'t LabeledTree,
        v: usize,
    ) -> impl Iterator<Item = &'t Neighbor> + 't {
        let parent = self.parent[v];
        tree.neighbors(v)
            .iter()
            .filter(move |nb| Some(nb.vertex) != parent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Label;

    fn star_and_edge() -> LabeledTree {
        let e = || Label::named("e");
        LabeledTree::build(
            vec![Label::named("a"); 6],
            [(0, 1, e()), (0, 2, e()), (0, 3, e()), (4, 5, e())],
        )
        .unwrap()
    }

    #[test]
    fn children_precede_parents() {
        let t = star_and_edge();
        let po = Postorder::new(&t);
        assert_eq!(po.order().len(), 6);
        for &v in po.order() {
            if let Some(p) = po.parent(v) {
                assert!(po.position(v) < po.position(p));
            }
        }
    }

    #[test]
    fn every_component_gets_a_root() {
        let t = star_and_edge();
        let po = Postorder::compute(&t, 2);
        assert_eq!(po.roots(), &[2, 4]);
        assert_eq!(po.first_component().len(), 4);
        assert_eq!(*po.first_component().last().unwrap(), 2);
        assert_eq!(po.parent(0), Some(2));
        assert_eq!(po.children(&t, 0).count(), 2);
    }

    #[test]
    fn empty_tree() {
        let po = Postorder::new(&LabeledTree::default());
        assert!(po.order().is_empty());
        assert!(po.first_component().is_empty());
    }
}
