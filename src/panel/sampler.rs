//! Constrained random panel sampling and canned panel constructors

use crate::generator::RandomSelector;
use crate::io::configuration::{
    ATTRIBUTE_COUNT, AttributeRanges, CELL_COUNT, PANEL_SIZE, PanelConstraints,
};
use crate::io::error::Result;
use crate::panel::Panel;
use ndarray::Array3;

/// Samples seed panels under entity-count and attribute-range constraints
pub struct PanelSampler {
    constraints: PanelConstraints,
}

impl PanelSampler {
    /// Create a sampler for the given constraints
    pub const fn new(constraints: PanelConstraints) -> Self {
        Self { constraints }
    }

    /// Draw one random panel satisfying the constraints
    ///
    /// Picks an entity count uniformly within the bound, chooses that many
    /// distinct cells, and fills each with a random entity within the
    /// attribute ranges.
    ///
    /// # Errors
    ///
    /// Returns [`crate::GenerationError::UnsatisfiableConstraints`] when
    /// the constraints admit no panel; the retry loop treats this as a
    /// failed attempt.
    pub fn sample_panel(&self, selector: &mut RandomSelector) -> Result<Panel> {
        self.constraints.validate()?;

        let span = self.constraints.max_entities - self.constraints.min_entities + 1;
        let count = self.constraints.min_entities + selector.index(span);

        let cells: Vec<(usize, usize)> = (0..CELL_COUNT)
            .map(|index| (index / PANEL_SIZE, index % PANEL_SIZE))
            .collect();
        let chosen = selector.choose_distinct(&cells, count);

        let mut panel = Panel::new();
        for (row, col) in chosen {
            let entity = sample_entity(selector, &self.constraints.ranges);
            panel.set_entity(row, col, entity)?;
        }
        Ok(panel)
    }

    /// Borrow the constraints this sampler enforces
    pub const fn constraints(&self) -> &PanelConstraints {
        &self.constraints
    }
}

/// Draw one random entity vector within the given attribute ranges
///
/// The `exists` slot is always 1; the remaining slots are uniform within
/// their configured ranges.
pub fn sample_entity(selector: &mut RandomSelector, ranges: &AttributeRanges) -> [i32; 5] {
    let (type_min, type_max) = ranges.shape_type;
    let (size_min, size_max) = ranges.size;
    let (angle_min, angle_max) = ranges.angle;
    let (color_min, color_max) = ranges.color;
    [
        1,
        selector.range_value(type_min, type_max),
        selector.range_value(size_min, size_max),
        selector.range_value(angle_min, angle_max),
        selector.range_value(color_min, color_max),
    ]
}

/// Panel holding `count` identical triangles in row-major order
///
/// Every entity is a mid-size upright triangle in green; handy as a
/// neutral input for rule and distractor behavior checks.
pub fn uniform_triangles(count: usize) -> Panel {
    let mut tensor = Array3::zeros((PANEL_SIZE, PANEL_SIZE, ATTRIBUTE_COUNT));
    for index in 0..count.min(CELL_COUNT) {
        let row = index / PANEL_SIZE;
        let col = index % PANEL_SIZE;
        write_entity(&mut tensor, row, col, [1, 1, 3, 0, 1]);
    }
    Panel::from_tensor(tensor)
}

/// Full panel whose colors step from 1 at the top-left to 9 at the
/// bottom-right, making every cell distinct
pub fn gradient_colors() -> Panel {
    let mut tensor = Array3::zeros((PANEL_SIZE, PANEL_SIZE, ATTRIBUTE_COUNT));
    for row in 0..PANEL_SIZE {
        for col in 0..PANEL_SIZE {
            let color = (row * PANEL_SIZE + col + 1) as i32;
            write_entity(&mut tensor, row, col, [1, 1, 3, 0, color]);
        }
    }
    Panel::from_tensor(tensor)
}

fn write_entity(tensor: &mut Array3<i32>, row: usize, col: usize, vector: [i32; 5]) {
    for (slot, value) in vector.into_iter().enumerate() {
        if let Some(cell) = tensor.get_mut([row, col, slot]) {
            *cell = value;
        }
    }
}
