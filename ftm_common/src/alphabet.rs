//! Frequent vertex labels and frequent labeled edges of a database.

use std::collections::{BTreeMap, BTreeSet};

use itertools::iproduct;
use tracing::debug;

use crate::database::TransactionDb;
use crate::label::Label;

/// An undirected labeled edge in canonical orientation (`low <= high`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeKey {
    /// The smaller endpoint label.
    pub low: Label,
    /// Edge label.
    pub edge: Label,
    /// The larger endpoint label.
    pub high: Label,
}

impl EdgeKey {
    /// Orient an edge canonically.
    pub fn new(a: Label, edge: Label, b: Label) -> Self {
        if a <= b {
            Self { low: a, edge, high: b }
        } else {
            Self { low: b, edge, high: a }
        }
    }
}

/// A directed extension step: attach a `to`-labeled leaf with an `edge`-labeled
/// edge to a vertex labeled `from`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ExtensionEdge {
    /// Label of the anchor vertex.
    pub from: Label,
    /// Label of the new edge.
    pub edge: Label,
    /// Label of the new leaf.
    pub to: Label,
}

/// A frequent vertex label with the transactions that contain it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrequentVertex {
    /// The label.
    pub label: Label,
    /// Positions into [`TransactionDb::as_slice`], ascending.
    pub transactions: Vec<usize>,
}

/// Result of one counting pass over the database.
#[derive(Clone, Debug, Default)]
pub struct FrequentAlphabet {
    vertices: Vec<FrequentVertex>,
    edges: Vec<(EdgeKey, usize)>,
}

impl FrequentAlphabet {
    /// Count every vertex label and every labeled edge once per transaction
    /// and keep those reaching `threshold`.
    ///
    /// Pattern labels are always named. A wildcard in a transaction counts
    /// toward every named label of its kind that occurs in the database, the
    /// same way the engine lets it match any pattern label.
    pub fn collect(db: &TransactionDb, threshold: usize) -> Self {
        let vertex_names: BTreeSet<Label> = db
            .iter()
            .flat_map(|t| t.tree().labels().iter())
            .filter(|label| !label.is_any())
            .cloned()
            .collect();
        let edge_names: BTreeSet<Label> = db
            .iter()
            .flat_map(|t| t.tree().edges().map(|(_, _, label)| label))
            .filter(|label| !label.is_any())
            .cloned()
            .collect();

        let mut vertex_hits: BTreeMap<Label, Vec<usize>> = BTreeMap::new();
        let mut edge_hits: BTreeMap<EdgeKey, usize> = BTreeMap::new();

        for (position, transaction) in db.iter().enumerate() {
            let tree = transaction.tree();
            let labels: BTreeSet<&Label> = tree
                .labels()
                .iter()
                .flat_map(|label| instances(label, &vertex_names))
                .collect();
            for label in labels {
                vertex_hits.entry(label.clone()).or_default().push(position);
            }
            let mut edges: BTreeSet<EdgeKey> = BTreeSet::new();
            for (v, w, label) in tree.edges() {
                let keys = iproduct!(
                    instances(tree.label(v), &vertex_names),
                    instances(label, &edge_names),
                    instances(tree.label(w), &vertex_names)
                );
                edges.extend(
                    keys.map(|(a, e, b)| EdgeKey::new(a.clone(), e.clone(), b.clone())),
                );
            }
            for key in edges {
                *edge_hits.entry(key).or_default() += 1;
            }
        }

        let vertices: Vec<FrequentVertex> = vertex_hits
            .into_iter()
            .filter(|(_, hits)| hits.len() >= threshold)
            .map(|(label, transactions)| FrequentVertex {
                label,
                transactions,
            })
            .collect();
        let edges: Vec<(EdgeKey, usize)> = edge_hits
            .into_iter()
            .filter(|&(_, count)| count >= threshold)
            .collect();
        debug!(
            "{} frequent vertex labels, {} frequent edges at threshold {}",
            vertices.len(),
            edges.len(),
            threshold
        );

        Self { vertices, edges }
    }

    /// Frequent vertex labels in ascending label order.
    pub fn vertices(&self) -> &[FrequentVertex] {
        &self.vertices
    }

    /// Frequent edges with their transaction counts.
    pub fn edges(&self) -> &[(EdgeKey, usize)] {
        &self.edges
    }

    /// Both orientations of every frequent edge (one for symmetric edges).
    pub fn extension_edges(&self) -> Vec<ExtensionEdge> {
        let mut out = Vec::with_capacity(2 * self.edges.len());
        for (key, _) in &self.edges {
            out.push(ExtensionEdge {
                from: key.low.clone(),
                edge: key.edge.clone(),
                to: key.high.clone(),
            });
            if key.low != key.high {
                out.push(ExtensionEdge {
                    from: key.high.clone(),
                    edge: key.edge.clone(),
                    to: key.low.clone(),
                });
            }
        }
        out
    }
}

/// The named labels `label` stands for: itself, or all of `names` for a wildcard.
fn instances<'a>(label: &'a Label, names: &'a BTreeSet<Label>) -> Vec<&'a Label> {
    if label.is_any() {
        names.iter().collect()
    } else {
        vec![label]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LabeledTree, Transaction, TransactionId};

    fn edge_tx(id: u32, a: &str, e: &str, b: &str) -> Transaction {
        let tree = LabeledTree::build(
            vec![Label::named(a), Label::named(b)],
            [(0, 1, Label::named(e))],
        )
        .unwrap();
        Transaction::new(TransactionId::new(id), 0, tree)
    }

    #[test]
    fn counts_once_per_transaction() {
        let star = LabeledTree::build(
            vec![Label::named("a"), Label::named("b"), Label::named("b")],
            [(0, 1, Label::named("x")), (0, 2, Label::named("x"))],
        )
        .unwrap();
        let db = TransactionDb::new(vec![
            Transaction::new(TransactionId::new(1), 0, star),
            edge_tx(2, "b", "x", "a"),
        ]);
        let alphabet = FrequentAlphabet::collect(&db, 2);
        let labels: Vec<_> = alphabet.vertices().iter().map(|v| v.label.to_string()).collect();
        assert_eq!(labels, ["a", "b"]);
        assert_eq!(alphabet.vertices()[1].transactions, vec![0, 1]);
        assert_eq!(
            alphabet.edges(),
            &[(EdgeKey::new(Label::named("a"), Label::named("x"), Label::named("b")), 2)]
        );
        assert_eq!(alphabet.extension_edges().len(), 2);
    }

    #[test]
    fn symmetric_edge_extends_once() {
        let db = TransactionDb::new(vec![edge_tx(1, "c", "y", "c")]);
        let alphabet = FrequentAlphabet::collect(&db, 1);
        assert_eq!(alphabet.extension_edges().len(), 1);
    }

    #[test]
    fn wildcards_count_toward_every_named_label() {
        let wild = LabeledTree::build(
            vec![Label::Any, Label::named("b")],
            [(0, 1, Label::Any)],
        )
        .unwrap();
        let db = TransactionDb::new(vec![
            edge_tx(1, "a", "x", "b"),
            Transaction::new(TransactionId::new(2), 0, wild),
        ]);
        let alphabet = FrequentAlphabet::collect(&db, 2);
        let labels: Vec<_> = alphabet.vertices().iter().map(|v| v.label.to_string()).collect();
        assert_eq!(labels, ["a", "b"]);
        assert!(alphabet.vertices().iter().all(|v| !v.label.is_any()));
        assert_eq!(
            alphabet.edges(),
            &[(EdgeKey::new(Label::named("a"), Label::named("x"), Label::named("b")), 2)]
        );
    }

    #[test]
    fn all_wildcard_database_has_no_alphabet() {
        let wild = LabeledTree::single(Label::Any);
        let db = TransactionDb::new(vec![Transaction::new(TransactionId::new(1), 0, wild)]);
        let alphabet = FrequentAlphabet::collect(&db, 1);
        assert!(alphabet.vertices().is_empty());
    }
}
