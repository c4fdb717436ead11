//! Patterns, their embeddings, and support sets.

use std::sync::Arc;

use contracts::*;
use ftm_common::{CanonicalString, LabeledTree, PatternId, Transaction, TransactionId};
use ftm_subtree::CharacteristicStore;

use crate::error::MiningError;

/// A frequent pattern.
#[derive(Clone, Debug)]
pub struct Pattern {
    /// Id, unique over the run.
    pub id: PatternId,
    /// The pattern tree; shared with every embedding record of the pattern.
    pub tree: Arc<LabeledTree>,
    /// Canonical string of [`Self::tree`].
    pub canonical: CanonicalString,
}

/// One transaction's evaluation of one pattern.
///
/// The store is immutable once built and shared: sibling candidates derive
/// from the same parent store, and intersections hand it on without copying.
#[derive(Clone, Debug)]
pub struct SubtreeIsoDataStore {
    /// The text.
    pub transaction: Arc<Transaction>,
    /// The pattern the store was filled for.
    pub pattern: Arc<LabeledTree>,
    /// Filled characteristic store.
    pub store: Arc<CharacteristicStore>,
    /// Whether the pattern embeds into the transaction.
    pub found_iso: bool,
}

impl SubtreeIsoDataStore {
    /// Id of the transaction.
    pub fn transaction_id(&self) -> TransactionId {
        self.transaction.id()
    }
}

/// The embeddings of one pattern across the database, sorted by transaction id.
#[derive(Clone, Debug)]
pub struct SupportSet {
    pattern: Arc<Pattern>,
    elements: Vec<SubtreeIsoDataStore>,
}

impl SupportSet {
    /// Empty support set of `pattern`.
    pub const fn new(pattern: Arc<Pattern>) -> Self {
        Self {
            pattern,
            elements: Vec::new(),
        }
    }

    /// Support set from a list of elements, checking every invariant.
    pub fn from_elements(
        pattern: Arc<Pattern>,
        elements: impl IntoIterator<Item = SubtreeIsoDataStore>,
    ) -> Result<Self, MiningError> {
        let mut set = Self::new(pattern);
        for element in elements {
            set.push(element)?;
        }
        Ok(set)
    }

    /// Append an element; its transaction id must exceed every present one and
    /// it must belong to this set's pattern.
    pub fn push(&mut self, element: SubtreeIsoDataStore) -> Result<(), MiningError> {
        if !Arc::ptr_eq(&element.pattern, &self.pattern.tree) {
            return Err(MiningError::MixedSupport {
                pattern: self.pattern.id,
                transaction: element.transaction_id(),
            });
        }
        if let Some(last) = self.elements.last() {
            if last.transaction_id() >= element.transaction_id() {
                return Err(MiningError::UnsortedSupport {
                    pattern: self.pattern.id,
                    previous: last.transaction_id(),
                    next: element.transaction_id(),
                });
            }
        }
        self.elements.push(element);
        Ok(())
    }

    /// The pattern.
    pub const fn pattern(&self) -> &Arc<Pattern> {
        &self.pattern
    }

    /// Id of the pattern.
    pub fn id(&self) -> PatternId {
        self.pattern.id
    }

    /// Elements in transaction order.
    pub fn elements(&self) -> &[SubtreeIsoDataStore] {
        &self.elements
    }

    /// Number of transactions.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Transaction ids in order.
    pub fn transaction_ids(&self) -> impl Iterator<Item = TransactionId> + '_ {
        self.elements.iter().map(SubtreeIsoDataStore::transaction_id)
    }

    /// Elements of `self` whose transaction also occurs in `other`.
    ///
    /// The result keeps `self`'s pattern and stores.
    #[debug_ensures(ret.len() <= self.len().min(other.len()))]
    pub fn intersect(&self, other: &Self) -> Self {
        let mut elements = Vec::with_capacity(self.len().min(other.len()));
        let (mut i, mut j) = (0, 0);
        while i < self.elements.len() && j < other.elements.len() {
            let (a, b) = (
                self.elements[i].transaction_id(),
                other.elements[j].transaction_id(),
            );
            match a.cmp(&b) {
                std::cmp::Ordering::Equal => {
                    elements.push(self.elements[i].clone());
                    i += 1;
                    j += 1;
                }
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
            }
        }
        Self {
            pattern: Arc::clone(&self.pattern),
            elements,
        }
    }

    /// Intersection of all `sets`, keeping the stores of the first one.
    ///
    /// Returns `None` for an empty slice.
    pub fn intersect_all(sets: &[&Self]) -> Option<Self> {
        let (head, rest) = sets.split_first()?;
        let mut result = (*head).clone();
        for set in rest {
            if result.is_empty() {
                break;
            }
            result = result.intersect(set);
        }
        Some(result)
    }

    /// Move the set of pattern `id` to the front, keeping the order of the
    /// others. Returns `false` if no set has that id.
    pub fn change_head(sets: &mut [&Self], id: PatternId) -> bool {
        match sets.iter().position(|set| set.id() == id) {
            Some(position) => {
                sets[..=position].rotate_right(1);
                true
            }
            None => false,
        }
    }
}
