//! Pure geometric transforms over panel tensors
//!
//! Every function returns a freshly allocated panel and leaves its input
//! untouched. Rotations are built from the transpose-plus-flip
//! composition; shifts are toroidal rolls that wrap at the panel edge.

use crate::io::configuration::{ATTRIBUTE_COUNT, PANEL_SIZE};
use crate::panel::Panel;
use ndarray::Array3;

/// Rotate a panel by `steps` 90-degree increments
///
/// Each clockwise step is a transpose followed by a column flip; each
/// counterclockwise step is a transpose followed by a row flip. Steps
/// normalize modulo 4, so negative and large counts wrap.
pub fn rotate(panel: &Panel, steps: i32, clockwise: bool) -> Panel {
    let normalized = steps.rem_euclid(4);
    let mut result = panel.clone();
    for _ in 0..normalized {
        result = if clockwise {
            remap(&result, |row, col| (PANEL_SIZE - 1 - col, row))
        } else {
            remap(&result, |row, col| (col, PANEL_SIZE - 1 - row))
        };
    }
    result
}

/// Mirror a panel across its vertical axis (flip columns)
pub fn reflect_horizontal(panel: &Panel) -> Panel {
    remap(panel, |row, col| (row, PANEL_SIZE - 1 - col))
}

/// Mirror a panel across its horizontal axis (flip rows)
pub fn reflect_vertical(panel: &Panel) -> Panel {
    remap(panel, |row, col| (PANEL_SIZE - 1 - row, col))
}

/// Roll a panel toroidally by the given row and column shifts
///
/// Positive row shifts move entities down, positive column shifts move
/// them right; entities leaving one edge re-enter at the opposite edge.
pub fn roll(panel: &Panel, row_shift: i32, col_shift: i32) -> Panel {
    let size = PANEL_SIZE as i32;
    remap(panel, |row, col| {
        let src_row = (row as i32 - row_shift).rem_euclid(size) as usize;
        let src_col = (col as i32 - col_shift).rem_euclid(size) as usize;
        (src_row, src_col)
    })
}

/// Exchange the full entity vectors of two cells
pub fn swap_cells(panel: &Panel, first: (usize, usize), second: (usize, usize)) -> Panel {
    remap(panel, |row, col| {
        if (row, col) == first {
            second
        } else if (row, col) == second {
            first
        } else {
            (row, col)
        }
    })
}

/// Build a new panel where each output cell copies from a source cell
///
/// `source_of` maps output coordinates to input coordinates; cells whose
/// source falls outside the panel read as empty.
fn remap(panel: &Panel, source_of: impl Fn(usize, usize) -> (usize, usize)) -> Panel {
    let mut tensor = Array3::zeros((PANEL_SIZE, PANEL_SIZE, ATTRIBUTE_COUNT));
    for row in 0..PANEL_SIZE {
        for col in 0..PANEL_SIZE {
            let (src_row, src_col) = source_of(row, col);
            for slot in 0..ATTRIBUTE_COUNT {
                let value = panel
                    .tensor()
                    .get([src_row, src_col, slot])
                    .copied()
                    .unwrap_or(0);
                if let Some(cell) = tensor.get_mut([row, col, slot]) {
                    *cell = value;
                }
            }
        }
    }
    Panel::from_tensor(tensor)
}
