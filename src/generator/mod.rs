//! Puzzle generation pipeline
//!
//! Row generation applies rules across a row of three panels, the puzzle
//! generator assembles full 3x3 grids with bounded retries, and the
//! distractor generator perturbs answers into wrong candidates. All
//! randomness flows through one seeded selector for reproducible output.

pub mod distractor;
pub mod puzzle;
pub mod row;
pub mod selection;

pub use distractor::{Difficulty, DistractorGenerator};
pub use puzzle::{GenerationReport, Puzzle, PuzzleGenerator};
pub use row::RowGenerator;
pub use selection::RandomSelector;
