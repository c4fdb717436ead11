//! Transaction database and the streaming text loader.
//!
//! Every record consists of three lines:
//!
//! ```text
//! # <id> <activity> <n> <m>
//! <label_1> ... <label_n>
//! <v_1> <w_1> <edge_label_1> ... <v_m> <w_m> <edge_label_m>
//! ```
//!
//! Vertex numbers in the edge line are 1-based. The stream ends at end of
//! input or at a line starting with `$`.

use std::io::BufRead;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::LoadError;
use crate::ids::TransactionId;
use crate::label::Label;
use crate::postorder::Postorder;
use crate::tree::LabeledTree;

/// One graph of the database with its cached postorder.
#[derive(Clone, Debug)]
pub struct Transaction {
    id: TransactionId,
    activity: i32,
    tree: LabeledTree,
    postorder: Postorder,
}

impl Transaction {
    /// Wrap a tree; the postorder is computed here once.
    pub fn new(id: TransactionId, activity: i32, tree: LabeledTree) -> Self {
        let postorder = Postorder::new(&tree);
        Self {
            id,
            activity,
            tree,
            postorder,
        }
    }

    /// Transaction id.
    pub const fn id(&self) -> TransactionId {
        self.id
    }

    /// Activity value carried by the record header.
    pub const fn activity(&self) -> i32 {
        self.activity
    }

    /// The graph.
    pub const fn tree(&self) -> &LabeledTree {
        &self.tree
    }

    /// Postorder of [`Self::tree`], covering every component.
    pub const fn postorder(&self) -> &Postorder {
        &self.postorder
    }
}

/// All transactions, sorted by id, ids unique.
#[derive(Clone, Debug, Default)]
pub struct TransactionDb {
    transactions: Vec<Arc<Transaction>>,
}

impl TransactionDb {
    /// Sort by id and drop repeated ids, keeping the first occurrence.
    pub fn new(mut transactions: Vec<Transaction>) -> Self {
        transactions.sort_by_key(Transaction::id);
        let before = transactions.len();
        transactions.dedup_by(|later, first| {
            let duplicate = later.id == first.id;
            if duplicate {
                warn!("Dropping duplicate transaction id {}", later.id);
            }
            duplicate
        });
        if transactions.len() != before {
            debug!("{} duplicate transactions dropped", before - transactions.len());
        }
        Self {
            transactions: transactions.into_iter().map(Arc::new).collect(),
        }
    }

    /// Number of transactions.
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    /// Whether the database is empty.
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Transactions in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Transaction>> {
        self.transactions.iter()
    }

    /// Transactions in id order, as a slice.
    pub fn as_slice(&self) -> &[Arc<Transaction>] {
        &self.transactions
    }
}

/// Streaming reader over the text format, yielding one transaction per record.
///
/// After a non-recoverable error the iterator is exhausted.
pub struct GraphReader<R> {
    reader: R,
    line: usize,
    finished: bool,
}

impl<R: BufRead> GraphReader<R> {
    /// Wrap a buffered reader.
    pub const fn new(reader: R) -> Self {
        Self {
            reader,
            line: 0,
            finished: false,
        }
    }

    fn next_line(&mut self) -> Result<Option<String>, LoadError> {
        let mut buffer = String::new();
        if self.reader.read_line(&mut buffer)? == 0 {
            return Ok(None);
        }
        self.line += 1;
        let trimmed = buffer.trim_end_matches(['\n', '\r']).len();
        buffer.truncate(trimmed);
        Ok(Some(buffer))
    }

    fn read_record(&mut self) -> Result<Option<Transaction>, LoadError> {
        let header = loop {
            match self.next_line()? {
                None => return Ok(None),
                Some(line) if line.trim().is_empty() => continue,
                Some(line) if line.starts_with('$') => return Ok(None),
                Some(line) => break line,
            }
        };
        let header_line = self.line;
        let (id, activity, n, m) =
            parse_header(&header).ok_or_else(|| LoadError::header(header_line, &header))?;

        let vertex_line = self
            .next_line()?
            .ok_or(LoadError::UnexpectedEof { transaction: id })?;
        let edge_line = match self.next_line()? {
            Some(line) => line,
            None if m == 0 => String::new(),
            None => return Err(LoadError::UnexpectedEof { transaction: id }),
        };

        let labels: Vec<Label> = vertex_line.split_whitespace().map(Label::parse).collect();
        if labels.len() != n {
            return Err(LoadError::record(
                id,
                header_line + 1,
                format!("expected {n} vertex labels, found {}", labels.len()),
            ));
        }

        let tokens: Vec<&str> = edge_line.split_whitespace().collect();
        if tokens.len() != 3 * m {
            return Err(LoadError::record(
                id,
                header_line + 2,
                format!("expected {m} edge triples, found {} tokens", tokens.len()),
            ));
        }
        let edges = tokens
            .chunks_exact(3)
            .map(|triple| {
                let endpoint = |token: &str| {
                    token
                        .parse::<usize>()
                        .ok()
                        .and_then(|v| v.checked_sub(1))
                        .ok_or_else(|| {
                            LoadError::record(
                                id,
                                header_line + 2,
                                format!("invalid vertex number '{token}'"),
                            )
                        })
                };
                Ok((endpoint(triple[0])?, endpoint(triple[1])?, Label::parse(triple[2])))
            })
            .collect::<Result<Vec<_>, LoadError>>()?;

        let tree = LabeledTree::build(labels, edges)
            .map_err(|e| LoadError::record(id, header_line + 2, e.to_string()))?;
        Ok(Some(Transaction::new(id, activity, tree)))
    }
}

impl<R: BufRead> Iterator for GraphReader<R> {
    type Item = Result<Transaction, LoadError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.read_record() {
            Ok(Some(transaction)) => Some(Ok(transaction)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(e) => {
                if !e.is_recoverable() {
                    self.finished = true;
                }
                Some(Err(e))
            }
        }
    }
}

fn parse_header(line: &str) -> Option<(TransactionId, i32, usize, usize)> {
    let mut fields = line.strip_prefix('#')?.split_whitespace();
    let id = fields.next()?.parse::<u32>().ok()?;
    let activity = fields.next()?.parse::<i32>().ok()?;
    let n = fields.next()?.parse::<usize>().ok()?;
    let m = fields.next()?.parse::<usize>().ok()?;
    Some((TransactionId::new(id), activity, n, m))
}

/// Read a whole database, skipping malformed records with a warning.
///
/// `limit` bounds the number of records read (including skipped ones).
pub fn load_database<R: BufRead>(reader: R, limit: Option<usize>) -> Result<TransactionDb, LoadError> {
    let mut transactions = Vec::new();
    let mut skipped = 0usize;
    for record in GraphReader::new(reader).take(limit.unwrap_or(usize::MAX)) {
        match record {
            Ok(transaction) => transactions.push(transaction),
            Err(e) if e.is_recoverable() => {
                warn!("Skipping malformed transaction: {e}");
                skipped += 1;
            }
            Err(e) => return Err(e),
        }
    }
    debug!(
        "Loaded {} transactions ({} skipped)",
        transactions.len(),
        skipped
    );
    Ok(TransactionDb::new(transactions))
}
