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
            vec![$(ftm_common::Label::named($label)),*],
            vec![$(($v, $w, ftm_common::Label::named($e))),*],
        )
        .expect("test tree must be valid")
    };
}

/// A random small tree over a three-letter vertex alphabet and a two-letter
/// edge alphabet.
#[derive(Clone, Debug)]
pub struct ArbitraryTree(pub LabeledTree);

impl Arbitrary for ArbitraryTree {
    fn arbitrary(g: &mut Gen) -> Self {
        let n = 1 + usize::arbitrary(g) % 8;
        let labels = (0..n)
            .map(|_| Label::named(*g.choose(&["a", "b", "c"]).unwrap()))
            .collect();
        let edges: Vec<_> = (1..n)
            .map(|v| {
                let parent = usize::arbitrary(g) % v;
                (parent, v, Label::named(*g.choose(&["x", "y"]).unwrap()))
            })
            .collect();
        Self(LabeledTree::build(labels, edges).unwrap())
    }
}

/// Random permutation of `0..n`.
pub fn permutation(g: &mut Gen, n: usize) -> Vec<usize> {
    let mut perm: Vec<usize> = (0..n).collect();
    for i in (1..n).rev() {
        let j = usize::arbitrary(g) % (i + 1);
        perm.swap(i, j);
    }
    perm
}

/// Rename vertices of `tree` through `perm` (old index `v` becomes `perm[v]`).
pub fn relabel(tree: &LabeledTree, perm: &[usize]) -> LabeledTree {
    let mut labels = vec![Label::Any; tree.n()];
    for v in 0..tree.n() {
        labels[perm[v]] = tree.label(v).clone();
    }
    let edges: Vec<_> = tree
        .edges()
        .map(|(v, w, l)| (perm[w], perm[v], l.clone()))
        .collect();
    LabeledTree::build(labels, edges).unwrap()
}
