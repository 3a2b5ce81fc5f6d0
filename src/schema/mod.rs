//! Canonical attribute schema for entity tensors
//!
//! Defines the five attribute slots of an entity vector, their value
//! ranges, modular stepping, and the mappings between ordinal values and
//! their display forms.

pub mod attributes;

pub use attributes::{Attribute, DisplayValue, SIZE_SCALES};
