//! Per-level index from canonical string to pattern id.

use indexmap::IndexMap;
use indexmap::map::Entry;

use crate::canonical::CanonicalString;
use crate::ids::PatternId;

/// What the index remembers about a pattern.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IndexEntry {
    /// Id assigned when the pattern was promoted.
    pub id: PatternId,
    /// Number of transactions containing the pattern.
    pub support: usize,
}

/// Frequent patterns of one level, keyed by canonical string.
///
/// Iteration follows insertion order, which is the order patterns were
/// promoted in.
#[derive(Clone, Debug, Default)]
pub struct PatternIndex {
    entries: IndexMap<CanonicalString, IndexEntry>,
}

impl PatternIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a pattern; returns `false` and keeps the old entry if the key
    /// is already present.
    pub fn insert(&mut self, key: CanonicalString, id: PatternId, support: usize) -> bool {
        match self.entries.entry(key) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(IndexEntry { id, support });
                true
            }
        }
    }

    /// Id of the pattern with this canonical string.
    pub fn lookup_id(&self, key: &CanonicalString) -> Option<PatternId> {
        self.entries.get(key).map(|entry| entry.id)
    }

    /// Full entry of the pattern with this canonical string.
    pub fn get(&self, key: &CanonicalString) -> Option<&IndexEntry> {
        self.entries.get(key)
    }

    /// Whether the key is present.
    pub fn contains(&self, key: &CanonicalString) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of patterns.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in promotion order.
    pub fn iter(&self) -> impl Iterator<Item = (&CanonicalString, &IndexEntry)> {
        self.entries.iter()
    }
}
