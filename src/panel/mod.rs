//! Panel tensors and the operations that act on them
//!
//! A panel is a 3x3 grid of cells, each holding a 5-slot entity vector.
//! This module provides the value-semantic tensor type, occupancy masks,
//! pure geometric transforms, and constrained random sampling.

pub mod positions;
pub mod sampler;
pub mod tensor;
pub mod transforms;

pub use positions::PositionMask;
pub use sampler::PanelSampler;
pub use tensor::Panel;
