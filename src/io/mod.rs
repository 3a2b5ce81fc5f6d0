//! Input, output, and configuration
//!
//! Covers the CLI surface, the generation configuration and its
//! defaults, the shared error type, rasterization of panels to images,
//! and export of finished puzzles with progress display.

pub mod cli;
pub mod configuration;
pub mod error;
pub mod export;
pub mod progress;
pub mod render;

pub use cli::{BatchProcessor, Cli};
pub use configuration::{AttributeRanges, GeneratorConfig, PanelConstraints};
pub use error::{GenerationError, Result};
