//! Fixed-size occupancy masks over panel cells

use crate::io::configuration::{CELL_COUNT, PANEL_SIZE};
use crate::panel::Panel;
use bitvec::prelude::*;
use std::fmt;

/// Fixed-size bitset tracking which of a panel's nine cells are occupied
///
/// Cells are indexed in row-major order. Provides O(1) membership testing
/// and the set algebra rules and distractors need: arithmetic rules take
/// the intersection of two panels' occupancy, scramble strategies permute
/// within a mask, and add/remove strategies draw from its complement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PositionMask {
    bits: BitVec,
}

impl PositionMask {
    /// Create a mask with no cells present
    pub fn new() -> Self {
        Self {
            bits: bitvec![0; CELL_COUNT],
        }
    }

    /// Create a mask covering all nine cells
    pub fn full() -> Self {
        Self {
            bits: bitvec![1; CELL_COUNT],
        }
    }

    /// Build the occupancy mask of a panel
    pub fn from_panel(panel: &Panel) -> Self {
        let mut mask = Self::new();
        for (row, col) in panel.filled_positions() {
            mask.insert(row, col);
        }
        mask
    }

    /// Insert a cell position
    pub fn insert(&mut self, row: usize, col: usize) {
        if let Some(index) = Self::index_of(row, col) {
            self.bits.set(index, true);
        }
    }

    /// Remove a cell position
    pub fn remove(&mut self, row: usize, col: usize) {
        if let Some(index) = Self::index_of(row, col) {
            self.bits.set(index, false);
        }
    }

    /// Test cell membership
    pub fn contains(&self, row: usize, col: usize) -> bool {
        Self::index_of(row, col)
            .is_some_and(|index| self.bits.get(index).as_deref() == Some(&true))
    }

    /// Intersect this mask with another in-place
    pub fn intersect_with(&mut self, other: &Self) {
        self.bits &= &other.bits;
    }

    /// Create a new mask containing the intersection
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        let mut result = self.clone();
        result.intersect_with(other);
        result
    }

    /// Create a new mask containing the union
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let mut result = self.clone();
        result.bits |= &other.bits;
        result
    }

    /// Create a new mask with the other mask's cells removed
    #[must_use]
    pub fn difference(&self, other: &Self) -> Self {
        let mut result = self.clone();
        for index in other.bits.iter_ones() {
            result.bits.set(index, false);
        }
        result
    }

    /// Test if no cells are present
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Count cells in the mask
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Extract all cell positions in row-major order
    pub fn to_positions(&self) -> Vec<(usize, usize)> {
        self.bits
            .iter_ones()
            .map(|index| (index / PANEL_SIZE, index % PANEL_SIZE))
            .collect()
    }

    const fn index_of(row: usize, col: usize) -> Option<usize> {
        if row < PANEL_SIZE && col < PANEL_SIZE {
            Some(row * PANEL_SIZE + col)
        } else {
            None
        }
    }
}

impl Default for PositionMask {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PositionMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PositionMask({} cells: {:?})",
            self.count(),
            self.to_positions()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_contains_remove() {
        let mut mask = PositionMask::new();
        assert!(mask.is_empty());
        mask.insert(1, 2);
        assert!(mask.contains(1, 2));
        assert!(!mask.contains(2, 1));
        assert_eq!(mask.count(), 1);
        mask.remove(1, 2);
        assert!(mask.is_empty());
    }

    #[test]
    fn test_out_of_range_positions_are_ignored() {
        let mut mask = PositionMask::new();
        mask.insert(3, 0);
        mask.insert(0, 9);
        assert!(mask.is_empty());
        assert!(!mask.contains(3, 3));
    }

    #[test]
    fn test_set_algebra() {
        let mut left = PositionMask::new();
        left.insert(0, 0);
        left.insert(1, 1);
        let mut right = PositionMask::new();
        right.insert(1, 1);
        right.insert(2, 2);

        let both = left.intersection(&right);
        assert_eq!(both.to_positions(), vec![(1, 1)]);

        let either = left.union(&right);
        assert_eq!(either.count(), 3);

        let only_left = left.difference(&right);
        assert_eq!(only_left.to_positions(), vec![(0, 0)]);
    }

    #[test]
    fn test_positions_are_row_major() {
        let mut mask = PositionMask::new();
        mask.insert(2, 0);
        mask.insert(0, 1);
        mask.insert(1, 2);
        assert_eq!(mask.to_positions(), vec![(0, 1), (1, 2), (2, 0)]);
    }

    #[test]
    fn test_full_mask_matches_cell_count() {
        assert_eq!(PositionMask::full().count(), 9);
        assert_eq!(PositionMask::full().to_positions().len(), 9);
    }
}
