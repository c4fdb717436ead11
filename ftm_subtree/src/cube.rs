//! The characteristic store.
//!
//! For a text vertex `v` and a pattern vertex `u`, the cell `S(v, u)` holds
//! pattern vertices:
//!
//! - a neighbor `y` of `u` is in `S(v, u)` when the part of the pattern on
//!   `u`'s side of the edge `u`-`y` embeds below `v` with `u` mapped to `v`;
//! - `u` itself is in `S(v, u)` when the whole pattern embeds below `v` with
//!   `u` mapped to `v`.
//!
//! Cells are laid out flat with a fixed capacity each, decided when the store
//! is allocated. A derived store only needs as much room as its base held,
//! which keeps stores small from the second level on.

use std::fmt;

use contracts::*;

use crate::error::StoreError;

/// Per `(text vertex, pattern vertex)` sets of pattern vertices.
#[derive(Clone, PartialEq, Eq)]
pub struct CharacteristicStore {
    text_size: usize,
    pattern_size: usize,
    offsets: Vec<usize>,
    lens: Vec<u32>,
    data: Vec<u32>,
}

impl CharacteristicStore {
    /// Allocate a store with `capacity(v, u)` slots for cell `(v, u)`.
    pub fn with_capacities(
        text_size: usize,
        pattern_size: usize,
        mut capacity: impl FnMut(usize, usize) -> usize,
    ) -> Self {
        let cells = text_size * pattern_size;
        let mut offsets = Vec::with_capacity(cells + 1);
        let mut total = 0;
        offsets.push(0);
        for v in 0..text_size {
            for u in 0..pattern_size {
                total += capacity(v, u);
                offsets.push(total);
            }
        }
        Self {
            text_size,
            pattern_size,
            offsets,
            lens: vec![0; cells],
            data: vec![0; total],
        }
    }

    /// Store of a single-vertex pattern: `S(v, 0) = {0}` for each text
    /// vertex in `matches`, empty elsewhere.
    pub fn singleton(text_size: usize, matches: impl IntoIterator<Item = usize>) -> Self {
        let mut flags = vec![false; text_size];
        for v in matches {
            flags[v] = true;
        }
        let mut store = Self::with_capacities(text_size, 1, |v, _| usize::from(flags[v]));
        for (v, &hit) in flags.iter().enumerate() {
            if hit {
                store.lens[v] = 1;
                store.data[store.offsets[v]] = 0;
            }
        }
        store
    }

    /// Number of text vertices.
    pub const fn text_size(&self) -> usize {
        self.text_size
    }

    /// Number of pattern vertices.
    pub const fn pattern_size(&self) -> usize {
        self.pattern_size
    }

    #[inline]
    fn cell(&self, v: usize, u: usize) -> usize {
        debug_assert!(v < self.text_size && u < self.pattern_size);
        v * self.pattern_size + u
    }

    /// The entries of `S(v, u)` in insertion order.
    #[inline]
    pub fn characteristics(&self, v: usize, u: usize) -> &[u32] {
        let cell = self.cell(v, u);
        let start = self.offsets[cell];
        &self.data[start..start + self.lens[cell] as usize]
    }

    /// Number of entries in `S(v, u)`.
    #[inline]
    pub fn len(&self, v: usize, u: usize) -> usize {
        self.lens[self.cell(v, u)] as usize
    }

    /// Whether `S(v, u)` is empty.
    #[inline]
    pub fn is_empty(&self, v: usize, u: usize) -> bool {
        self.len(v, u) == 0
    }

    /// Slots reserved for `S(v, u)`.
    pub fn capacity(&self, v: usize, u: usize) -> usize {
        let cell = self.cell(v, u);
        self.offsets[cell + 1] - self.offsets[cell]
    }

    /// Whether `y` is in `S(v, u)`.
    #[inline]
    pub fn contains(&self, v: usize, u: usize, y: usize) -> bool {
        self.characteristics(v, u).iter().any(|&x| x as usize == y)
    }

    /// Whether the whole pattern embeds below `v` with `u` mapped to `v`.
    #[inline]
    pub fn has_full(&self, v: usize, u: usize) -> bool {
        self.contains(v, u, u)
    }

    /// Whether any cell says the whole pattern embeds.
    pub fn any_full(&self) -> bool {
        (0..self.text_size).any(|v| (0..self.pattern_size).any(|u| self.has_full(v, u)))
    }

    /// Add `y` to `S(v, u)`. Adding a present entry is a no-op.
    #[debug_ensures(ret.is_err() || self.contains(v, u, y))]
    pub fn insert(&mut self, v: usize, u: usize, y: usize) -> Result<(), StoreError> {
        if self.contains(v, u, y) {
            return Ok(());
        }
        let cell = self.cell(v, u);
        let len = self.lens[cell] as usize;
        let capacity = self.offsets[cell + 1] - self.offsets[cell];
        if len == capacity {
            return Err(StoreError::capacity(v, u, capacity));
        }
        self.data[self.offsets[cell] + len] = y as u32;
        self.lens[cell] += 1;
        Ok(())
    }

    /// Total number of entries over all cells.
    pub fn entry_count(&self) -> usize {
        self.lens.iter().map(|&l| l as usize).sum()
    }

    /// Total number of reserved slots.
    pub fn reserved(&self) -> usize {
        self.data.len()
    }
}

impl fmt::Debug for CharacteristicStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for v in 0..self.text_size {
            for u in 0..self.pattern_size {
                let entries = self.characteristics(v, u);
                if !entries.is_empty() {
                    map.entry(&(v, u), &entries);
                }
            }
        }
        map.finish()
    }
}
