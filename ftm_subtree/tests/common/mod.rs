#![allow(dead_code)]

use std::sync::OnceLock;

use ftm_common::{Label, LabeledTree};
use quickcheck::{Arbitrary, Gen};

pub fn init_test_logger() {
    static INIT: OnceLock<()> = OnceLock::new();
    let _ = INIT.get_or_init(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Build a tree from `&str` labels and `(v, w, label)` edges.
macro_rules! tree {
    ([$($label:expr),* $(,)?], [$(($v:expr, $w:expr, $e:expr)),* $(,)?]) => {
        ftm_common::LabeledTree::build(
            vec![$(ftm_common::Label::parse($label)),*],
            vec![$(($v, $w, ftm_common::Label::parse($e))),*],
        )
        .expect("test tree must be valid")
    };
}

fn random_tree(g: &mut Gen, max_n: usize, vertex_labels: &[&str], forest: bool) -> LabeledTree {
    let n = 1 + usize::arbitrary(g) % max_n;
    let labels = (0..n)
        .map(|_| Label::parse(g.choose(vertex_labels).unwrap()))
        .collect();
    let mut edges: Vec<_> = Vec::new();
    for v in 1..n {
        if forest && u8::arbitrary(g) % 5 == 0 {
            continue;
        }
        let parent = usize::arbitrary(g) % v;
        edges.push((parent, v, Label::parse(g.choose(&["x", "y"]).unwrap())));
    }
    LabeledTree::build(labels, edges).unwrap()
}

/// A random text forest of up to 9 vertices.
#[derive(Clone, Debug)]
pub struct Text(pub LabeledTree);

impl Arbitrary for Text {
    fn arbitrary(g: &mut Gen) -> Self {
        Self(random_tree(g, 9, &["a", "b", "c"], true))
    }
}

/// A random connected pattern of up to 5 vertices, occasionally with a
/// wildcard vertex.
#[derive(Clone, Debug)]
pub struct Pattern(pub LabeledTree);

impl Arbitrary for Pattern {
    fn arbitrary(g: &mut Gen) -> Self {
        Self(random_tree(g, 5, &["a", "b", "c", "a", "b", "*"], false))
    }
}

/// Where and what to attach to a pattern.
#[derive(Clone, Debug)]
pub struct Growth {
    pub anchor_seed: usize,
    pub vertex_label: Label,
    pub edge_label: Label,
}

impl Arbitrary for Growth {
    fn arbitrary(g: &mut Gen) -> Self {
        Self {
            anchor_seed: usize::arbitrary(g),
            vertex_label: Label::parse(g.choose(&["a", "b", "c"]).unwrap()),
            edge_label: Label::parse(g.choose(&["x", "y"]).unwrap()),
        }
    }
}

impl Growth {
    /// Apply to `pattern`; returns the anchor used and the grown pattern.
    pub fn apply(&self, pattern: &LabeledTree) -> (usize, LabeledTree) {
        let anchor = self.anchor_seed % pattern.n();
        let grown = pattern
            .with_leaf(anchor, self.vertex_label.clone(), self.edge_label.clone())
            .unwrap();
        (anchor, grown)
    }
}

/// Whether `pattern` is a subtree of `text`, by trying every injective
/// label- and edge-preserving map.
pub fn brute_force_embeds(text: &LabeledTree, pattern: &LabeledTree) -> bool {
    if pattern.n() == 0 {
        return true;
    }
    // Pattern vertices in BFS order from 0, each with its BFS parent.
    let mut order = vec![(0usize, None)];
    let mut seen = vec![false; pattern.n()];
    seen[0] = true;
    let mut i = 0;
    while i < order.len() {
        let (u, _) = order[i];
        for nb in pattern.neighbors(u) {
            if !seen[nb.vertex] {
                seen[nb.vertex] = true;
                order.push((nb.vertex, Some(u)));
            }
        }
        i += 1;
    }
    let mut image = vec![usize::MAX; pattern.n()];
    let mut used = vec![false; text.n()];
    extend(text, pattern, &order, 0, &mut image, &mut used)
}

fn extend(
    text: &LabeledTree,
    pattern: &LabeledTree,
    order: &[(usize, Option<usize>)],
    depth: usize,
    image: &mut [usize],
    used: &mut [bool],
) -> bool {
    let Some(&(u, parent)) = order.get(depth) else {
        return true;
    };
    let candidates: Vec<usize> = match parent {
        None => (0..text.n()).collect(),
        Some(p) => text.neighbors(image[p]).iter().map(|nb| nb.vertex).collect(),
    };
    for v in candidates {
        if used[v] || !pattern.label(u).compatible(text.label(v)) {
            continue;
        }
        if let Some(p) = parent {
            let pattern_edge = pattern.edge_label(p, u).unwrap();
            let text_edge = text.edge_label(image[p], v).unwrap();
            if !pattern_edge.compatible(text_edge) {
                continue;
            }
        }
        image[u] = v;
        used[v] = true;
        if extend(text, pattern, order, depth + 1, image, used) {
            return true;
        }
        used[v] = false;
    }
    false
}
