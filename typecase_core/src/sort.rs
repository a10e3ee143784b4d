//! Sorts: cached glyph records kept in ascending codepoint order.
//!
//! The table is a `Vec` kept sorted on insert, so lookups are a binary
//! search and an insert shifts the tail once. Sorts are `Copy`; callers
//! get values, never references that a later insert could invalidate.

use crate::atlas::AtlasRect;

/// One cached glyph: metrics in whole pixels plus its atlas slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sort {
    pub codepoint: u32,
    pub bearing_x: i32,
    pub bearing_y: i32,
    pub width: i32,
    pub height: i32,
    pub advance: i32,
    /// Atlas placement. `w`/`h` equal the bitmap size; empty for blank glyphs.
    pub atlas: AtlasRect,
}

/// Sorts ordered by strictly increasing codepoint.
#[derive(Debug, Clone, Default)]
pub struct SortTable {
    sorts: Vec<Sort>,
}

impl SortTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.sorts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sorts.is_empty()
    }

    pub fn get(&self, codepoint: u32) -> Option<&Sort> {
        self.sorts
            .binary_search_by_key(&codepoint, |s| s.codepoint)
            .ok()
            .map(|i| &self.sorts[i])
    }

    pub fn contains(&self, codepoint: u32) -> bool {
        self.get(codepoint).is_some()
    }

    /// Insert `sort` at its ordered position. Returns `false` and leaves the
    /// table unchanged if the codepoint is already present.
    pub fn insert(&mut self, sort: Sort) -> bool {
        match self.sorts.binary_search_by_key(&sort.codepoint, |s| s.codepoint) {
            Ok(_) => false,
            Err(i) => {
                self.sorts.insert(i, sort);
                true
            }
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sort> {
        self.sorts.iter()
    }

    pub fn as_slice(&self) -> &[Sort] {
        &self.sorts
    }
}

impl<'a> IntoIterator for &'a SortTable {
    type Item = &'a Sort;
    type IntoIter = std::slice::Iter<'a, Sort>;

    fn into_iter(self) -> Self::IntoIter {
        self.sorts.iter()
    }
}
