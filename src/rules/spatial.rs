//! Whole-panel spatial rules

use crate::io::error::Result;
use crate::panel::{Panel, transforms};
use crate::rules::{RuleDescriptor, first_panel};

/// Rotates a panel by a fixed number of 90-degree steps
#[derive(Clone, Copy, Debug)]
pub struct RotationRule {
    step: i32,
    clockwise: bool,
}

impl RotationRule {
    /// Create a rotation rule
    ///
    /// Steps normalize modulo 4 at application time, so any integer is a
    /// valid count.
    pub const fn new(step: i32, clockwise: bool) -> Self {
        Self { step, clockwise }
    }

    /// Rotate the first input panel
    ///
    /// # Errors
    ///
    /// Returns [`crate::GenerationError::InsufficientSeedPanels`] without
    /// an input.
    pub fn apply(&self, panels: &[Panel]) -> Result<Panel> {
        let input = first_panel(panels, 1)?;
        Ok(transforms::rotate(input, self.step, self.clockwise))
    }

    /// Metadata record for this rule
    pub fn descriptor(&self) -> RuleDescriptor {
        let direction = if self.clockwise {
            "clockwise"
        } else {
            "counterclockwise"
        };
        RuleDescriptor {
            name: "rotation",
            target: None,
            detail: format!("{} step {direction}", self.step),
        }
    }
}

/// Direction of a toroidal entity shift
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShiftDirection {
    /// Columns move right
    Right,
    /// Columns move left
    Left,
    /// Rows move up
    Up,
    /// Rows move down
    Down,
    /// Down and right together
    Diagonal,
    /// Up and left together
    ReverseDiagonal,
}

impl ShiftDirection {
    /// All shift directions
    pub const ALL: [Self; 6] = [
        Self::Right,
        Self::Left,
        Self::Up,
        Self::Down,
        Self::Diagonal,
        Self::ReverseDiagonal,
    ];

    /// Parse a direction from its configuration name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|dir| dir.name() == name)
    }

    /// Configuration name of this direction
    pub const fn name(self) -> &'static str {
        match self {
            Self::Right => "right",
            Self::Left => "left",
            Self::Up => "up",
            Self::Down => "down",
            Self::Diagonal => "diagonal",
            Self::ReverseDiagonal => "reverse_diagonal",
        }
    }

    /// Row and column roll amounts for one step
    const fn rolls(self, step: i32) -> (i32, i32) {
        match self {
            Self::Right => (0, step),
            Self::Left => (0, -step),
            Self::Up => (-step, 0),
            Self::Down => (step, 0),
            Self::Diagonal => (step, step),
            Self::ReverseDiagonal => (-step, -step),
        }
    }
}

/// Shifts every entity toroidally by a fixed amount
#[derive(Clone, Copy, Debug)]
pub struct ShiftRule {
    direction: ShiftDirection,
    step: i32,
}

impl ShiftRule {
    /// Create a shift rule
    pub const fn new(direction: ShiftDirection, step: i32) -> Self {
        Self { direction, step }
    }

    /// Shift the first input panel
    ///
    /// # Errors
    ///
    /// Returns [`crate::GenerationError::InsufficientSeedPanels`] without
    /// an input.
    pub fn apply(&self, panels: &[Panel]) -> Result<Panel> {
        let input = first_panel(panels, 1)?;
        let (row_shift, col_shift) = self.direction.rolls(self.step);
        Ok(transforms::roll(input, row_shift, col_shift))
    }

    /// Metadata record for this rule
    pub fn descriptor(&self) -> RuleDescriptor {
        RuleDescriptor {
            name: "shift",
            target: None,
            detail: format!("{} by {}", self.direction.name(), self.step),
        }
    }
}
