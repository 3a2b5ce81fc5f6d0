//! The core panel tensor type

use crate::io::configuration::{ATTRIBUTE_COUNT, PANEL_SIZE};
use crate::io::error::Result;
use crate::schema::Attribute;
use ndarray::Array3;

/// A 3x3 grid of cells, each holding a 5-slot entity attribute vector
///
/// Backed by a `(3, 3, 5)` integer tensor in `[row, col, attribute]`
/// order. Panels have value semantics: rules and transforms never mutate
/// their inputs, and `clone` produces an independent deep copy.
#[derive(Clone, Debug, PartialEq)]
pub struct Panel {
    tensor: Array3<i32>,
}

impl Panel {
    /// Create an empty panel with no entities
    pub fn new() -> Self {
        Self {
            tensor: Array3::zeros((PANEL_SIZE, PANEL_SIZE, ATTRIBUTE_COUNT)),
        }
    }

    /// Read one attribute of one cell
    ///
    /// Out-of-range coordinates read as 0, matching the empty-cell value.
    pub fn get_attr(&self, row: usize, col: usize, attribute: Attribute) -> i32 {
        self.tensor
            .get([row, col, attribute.slot()])
            .copied()
            .unwrap_or(0)
    }

    /// Write one attribute of one cell
    ///
    /// # Errors
    ///
    /// Returns [`crate::GenerationError::InvalidAttributeValue`] when the
    /// value falls outside the attribute's schema range.
    pub fn set_attr(
        &mut self,
        row: usize,
        col: usize,
        attribute: Attribute,
        value: i32,
    ) -> Result<()> {
        attribute.validate(value)?;
        if let Some(slot) = self.tensor.get_mut([row, col, attribute.slot()]) {
            *slot = value;
        }
        Ok(())
    }

    /// Whether the cell at the given position holds an entity
    pub fn exists(&self, row: usize, col: usize) -> bool {
        self.get_attr(row, col, Attribute::Exists) == 1
    }

    /// Read the full 5-slot vector of an occupied cell
    ///
    /// Returns `None` for empty cells and out-of-range coordinates.
    pub fn entity(&self, row: usize, col: usize) -> Option<[i32; 5]> {
        if !self.exists(row, col) {
            return None;
        }
        let mut vector = [0; 5];
        for (slot, value) in vector.iter_mut().enumerate() {
            *value = self.tensor.get([row, col, slot]).copied().unwrap_or(0);
        }
        Some(vector)
    }

    /// Write a full 5-slot vector into a cell
    ///
    /// # Errors
    ///
    /// Returns [`crate::GenerationError::InvalidAttributeValue`] when any
    /// slot falls outside its attribute's schema range; the panel is left
    /// unchanged in that case.
    pub fn set_entity(&mut self, row: usize, col: usize, vector: [i32; 5]) -> Result<()> {
        for attribute in Attribute::ALL {
            let value = vector.get(attribute.slot()).copied().unwrap_or(0);
            attribute.validate(value)?;
        }
        for attribute in Attribute::ALL {
            let value = vector.get(attribute.slot()).copied().unwrap_or(0);
            if let Some(slot) = self.tensor.get_mut([row, col, attribute.slot()]) {
                *slot = value;
            }
        }
        Ok(())
    }

    /// Clear a cell back to the empty state
    pub fn clear_cell(&mut self, row: usize, col: usize) {
        for slot in 0..ATTRIBUTE_COUNT {
            if let Some(value) = self.tensor.get_mut([row, col, slot]) {
                *value = 0;
            }
        }
    }

    /// Positions of occupied cells in row-major order
    pub fn filled_positions(&self) -> Vec<(usize, usize)> {
        self.positions_where(true)
    }

    /// Positions of empty cells in row-major order
    pub fn empty_positions(&self) -> Vec<(usize, usize)> {
        self.positions_where(false)
    }

    fn positions_where(&self, occupied: bool) -> Vec<(usize, usize)> {
        let mut positions = Vec::new();
        for row in 0..PANEL_SIZE {
            for col in 0..PANEL_SIZE {
                if self.exists(row, col) == occupied {
                    positions.push((row, col));
                }
            }
        }
        positions
    }

    /// Number of entities in the panel
    pub fn total_entities(&self) -> usize {
        self.filled_positions().len()
    }

    /// Borrow the underlying `(3, 3, 5)` tensor
    pub const fn tensor(&self) -> &Array3<i32> {
        &self.tensor
    }

    /// Build a panel around an existing tensor
    ///
    /// Used by the pure transforms, which produce whole tensors at once.
    pub(crate) const fn from_tensor(tensor: Array3<i32>) -> Self {
        Self { tensor }
    }
}

impl Default for Panel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_panel_is_empty() {
        let panel = Panel::new();
        assert_eq!(panel.total_entities(), 0);
        assert_eq!(panel.filled_positions(), Vec::new());
        assert_eq!(panel.empty_positions().len(), 9);
    }

    #[test]
    fn test_set_and_get_attr() {
        let mut panel = Panel::new();
        assert!(panel.set_attr(1, 2, Attribute::Exists, 1).is_ok());
        assert!(panel.set_attr(1, 2, Attribute::Type, 3).is_ok());
        assert_eq!(panel.get_attr(1, 2, Attribute::Type), 3);
        assert!(panel.exists(1, 2));
        assert_eq!(panel.total_entities(), 1);
    }

    #[test]
    fn test_set_attr_rejects_out_of_range() {
        let mut panel = Panel::new();
        assert!(panel.set_attr(0, 0, Attribute::Type, 6).is_err());
        assert_eq!(panel.get_attr(0, 0, Attribute::Type), 0);
    }

    #[test]
    fn test_set_entity_is_atomic() {
        let mut panel = Panel::new();
        // Color 12 is out of range; nothing may be written
        assert!(panel.set_entity(0, 0, [1, 2, 3, 4, 12]).is_err());
        assert!(!panel.exists(0, 0));
        assert!(panel.set_entity(0, 0, [1, 2, 3, 4, 5]).is_ok());
        assert_eq!(panel.entity(0, 0), Some([1, 2, 3, 4, 5]));
    }

    #[test]
    fn test_entity_reads_none_for_empty_cells() {
        let panel = Panel::new();
        assert_eq!(panel.entity(0, 0), None);
        assert_eq!(panel.entity(7, 7), None);
    }

    #[test]
    fn test_clone_is_deep() {
        let mut panel = Panel::new();
        assert!(panel.set_entity(2, 2, [1, 5, 6, 7, 9]).is_ok());
        let copy = panel.clone();
        panel.clear_cell(2, 2);
        assert_eq!(copy.entity(2, 2), Some([1, 5, 6, 7, 9]));
        assert_eq!(panel.entity(2, 2), None);
        assert_ne!(panel, copy);
    }
}
