#![allow(dead_code)]

use std::sync::OnceLock;

use ftm_common::{Label, LabeledTree, Transaction, TransactionDb, TransactionId};
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

/// Build a tree from `&str` labels and `(v, w, label)` edges; `"*"` is the
/// wildcard.
macro_rules! tree {
    ([$($label:expr),* $(,)?], [$(($v:expr, $w:expr, $e:expr)),* $(,)?]) => {
        ftm_common::LabeledTree::build(
            vec![$(ftm_common::Label::parse($label)),*],
            vec![$(($v, $w, ftm_common::Label::parse($e))),*],
        )
        .expect("test tree must be valid")
    };
}

/// Database with ids 1, 2, ... in the given order.
pub fn database(trees: Vec<LabeledTree>) -> TransactionDb {
    TransactionDb::new(
        trees
            .into_iter()
            .enumerate()
            .map(|(i, tree)| Transaction::new(TransactionId::new(i as u32 + 1), 0, tree))
            .collect(),
    )
}

/// A random database of 2 to 6 small forests over a two-letter alphabet,
/// with the occasional wildcard vertex or edge.
#[derive(Clone, Debug)]
pub struct SmallDb(pub Vec<LabeledTree>);

fn label(g: &mut Gen, names: &[&str]) -> Label {
    if u8::arbitrary(g) % 10 == 0 {
        Label::Any
    } else {
        Label::named(*g.choose(names).unwrap())
    }
}

impl Arbitrary for SmallDb {
    fn arbitrary(g: &mut Gen) -> Self {
        let count = 2 + usize::arbitrary(g) % 5;
        let trees = (0..count)
            .map(|_| {
                let n = 1 + usize::arbitrary(g) % 6;
                let labels = (0..n).map(|_| label(g, &["a", "b"])).collect();
                let mut edges = Vec::new();
                for v in 1..n {
                    // roughly one missing edge in five makes a forest
                    if u8::arbitrary(g) % 5 == 0 {
                        continue;
                    }
                    let parent = usize::arbitrary(g) % v;
                    edges.push((parent, v, label(g, &["x", "y"])));
                }
                LabeledTree::build(labels, edges).unwrap()
            })
            .collect();
        Self(trees)
    }
}
