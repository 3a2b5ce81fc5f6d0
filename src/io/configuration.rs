//! Generation constants and runtime configuration defaults

use crate::io::error::{Result, unsatisfiable};
use crate::rules::RuleSpec;
use crate::schema::Attribute;

// Grid geometry shared by panels and puzzles
/// Cells per panel side, and panels per puzzle side
pub const PANEL_SIZE: usize = 3;
/// Total cells in one panel
pub const CELL_COUNT: usize = PANEL_SIZE * PANEL_SIZE;
/// Slots in one entity attribute vector
pub const ATTRIBUTE_COUNT: usize = 5;

// Entity population limits
/// Fewest entities a sampled panel may hold
pub const MIN_ENTITIES: usize = 1;
/// Most entities any panel may hold
pub const MAX_ENTITIES: usize = 9;

// Retry behavior
/// Default attempts per puzzle before recording a failure
pub const DEFAULT_MAX_ATTEMPTS: usize = 10;
/// Redraws per distractor before accepting a duplicate
pub const MAX_DISTRACTOR_REDRAWS: usize = 8;

// Candidate list shape
/// Default wrong answers generated per puzzle
pub const DEFAULT_DISTRACTOR_COUNT: usize = 7;

// Default values for configurable parameters
/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;
/// Default puzzles per batch
pub const DEFAULT_PUZZLE_COUNT: usize = 10;

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 50;

// Rendering settings
/// Pixel width and height of one rendered cell
pub const CELL_PIXELS: u32 = 48;
/// Pixel gap between panels on a rendered sheet
pub const SHEET_MARGIN: u32 = 6;

/// Per-attribute sampling ranges for seed panels
///
/// Defaults cover each attribute's full schema range; configurations can
/// narrow any of them to bias sampled entities.
#[derive(Clone, Copy, Debug)]
pub struct AttributeRanges {
    /// Inclusive range for the `type` attribute
    pub shape_type: (i32, i32),
    /// Inclusive range for the `size` attribute
    pub size: (i32, i32),
    /// Inclusive range for the `angle` attribute
    pub angle: (i32, i32),
    /// Inclusive range for the `color` attribute
    pub color: (i32, i32),
}

impl AttributeRanges {
    /// Sampling range for one attribute
    ///
    /// `exists` is not sampled and reports its schema bounds.
    pub const fn for_attribute(&self, attribute: Attribute) -> (i32, i32) {
        match attribute {
            Attribute::Exists => attribute.bounds(),
            Attribute::Type => self.shape_type,
            Attribute::Size => self.size,
            Attribute::Angle => self.angle,
            Attribute::Color => self.color,
        }
    }
}

impl Default for AttributeRanges {
    fn default() -> Self {
        Self {
            shape_type: Attribute::Type.bounds(),
            size: Attribute::Size.bounds(),
            angle: Attribute::Angle.bounds(),
            color: Attribute::Color.bounds(),
        }
    }
}

/// Constraints driving seed panel sampling
#[derive(Clone, Copy, Debug)]
pub struct PanelConstraints {
    /// Fewest entities a sampled panel may hold
    pub min_entities: usize,
    /// Most entities a sampled panel may hold
    pub max_entities: usize,
    /// Per-attribute value ranges for sampled entities
    pub ranges: AttributeRanges,
}

impl PanelConstraints {
    /// Check that at least one panel satisfies these constraints
    ///
    /// # Errors
    ///
    /// Returns [`crate::GenerationError::UnsatisfiableConstraints`] for
    /// inverted or out-of-bound entity counts and for attribute ranges
    /// that leave the schema. Classified as recoverable so the retry loop
    /// burns its attempts rather than aborting a batch.
    pub fn validate(&self) -> Result<()> {
        if self.min_entities > self.max_entities {
            return Err(unsatisfiable(&format!(
                "min_entities {} exceeds max_entities {}",
                self.min_entities, self.max_entities
            )));
        }
        if self.max_entities > MAX_ENTITIES {
            return Err(unsatisfiable(&format!(
                "max_entities {} exceeds the {MAX_ENTITIES}-cell panel",
                self.max_entities
            )));
        }
        for attribute in Attribute::TARGETABLE {
            let (min, max) = self.ranges.for_attribute(attribute);
            let (schema_min, schema_max) = attribute.bounds();
            if min > max || min < schema_min || max > schema_max {
                return Err(unsatisfiable(&format!(
                    "range [{min}, {max}] for attribute '{}' leaves [{schema_min}, {schema_max}]",
                    attribute.name()
                )));
            }
        }
        Ok(())
    }
}

impl Default for PanelConstraints {
    fn default() -> Self {
        Self {
            min_entities: MIN_ENTITIES,
            max_entities: MAX_ENTITIES,
            ranges: AttributeRanges::default(),
        }
    }
}

/// Full configuration for one generation batch
#[derive(Clone, Debug)]
pub struct GeneratorConfig {
    /// Rule specifications applied to every puzzle; empty means a random
    /// well-formed rule is drawn per puzzle
    pub rules: Vec<RuleSpec>,
    /// Seed panel sampling constraints
    pub constraints: PanelConstraints,
    /// Distractor difficulty tier
    pub difficulty: crate::generator::Difficulty,
    /// Wrong answers generated per puzzle
    pub distractor_count: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            rules: Vec::new(),
            constraints: PanelConstraints::default(),
            difficulty: crate::generator::Difficulty::Medium,
            distractor_count: DEFAULT_DISTRACTOR_COUNT,
        }
    }
}
