//! Procedural generation of matrix reasoning puzzles in the Raven's Progressive Matrices style
//!
//! Puzzles are 3x3 grids of panels whose rows follow hidden attribute rules.
//! The generator samples seed panels, applies rules across each row, withholds
//! the bottom-right panel as the answer, and surrounds it with perturbed
//! distractors graded by difficulty.

#![forbid(unsafe_code)]

/// Puzzle assembly including row generation, distractors, and seeded randomness
pub mod generator;
/// Input/output operations, configuration, and error handling
pub mod io;
/// Panel tensors, spatial transforms, and constrained sampling
pub mod panel;
/// Row rules from attribute progressions to spatial shifts
pub mod rules;
/// The attribute schema shared by every panel and rule
pub mod schema;

pub use io::error::{GenerationError, Result};
