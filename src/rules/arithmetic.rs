//! Binary arithmetic over two panels

use crate::generator::RandomSelector;
use crate::io::configuration::AttributeRanges;
use crate::io::error::{GenerationError, Result};
use crate::panel::sampler::sample_entity;
use crate::panel::{Panel, PositionMask};
use crate::rules::RuleDescriptor;
use crate::schema::Attribute;

/// The binary operation an arithmetic rule performs
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArithmeticOp {
    /// Third column holds the wrapped sum
    Add,
    /// Third column holds the wrapped difference
    Subtract,
}

impl ArithmeticOp {
    /// Configuration name of this operation
    pub const fn name(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Subtract => "subtract",
        }
    }
}

/// Combines the first two columns of a row into the third
///
/// A result cell holds an entity only where both inputs do (the
/// occupancy intersection). The targeted attribute becomes the wrapped
/// sum or difference of the two input values; the remaining attributes
/// of each materialized entity are resampled.
#[derive(Clone, Copy, Debug)]
pub struct ArithmeticRule {
    attribute: Attribute,
    op: ArithmeticOp,
}

impl ArithmeticRule {
    /// Create an arithmetic rule
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::UnsupportedAttribute`] for attributes
    /// without an associative binary operation; only `size` and `color`
    /// qualify.
    pub fn new(attribute: Attribute, op: ArithmeticOp) -> Result<Self> {
        if !matches!(attribute, Attribute::Size | Attribute::Color) {
            return Err(GenerationError::UnsupportedAttribute {
                rule: "arithmetic",
                attribute: attribute.name().to_string(),
            });
        }
        Ok(Self { attribute, op })
    }

    /// Combine the first two input panels into a new one
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::InsufficientSeedPanels`] with fewer
    /// than two inputs.
    pub fn apply(&self, panels: &[Panel], selector: &mut RandomSelector) -> Result<Panel> {
        let (Some(first), Some(second)) = (panels.first(), panels.get(1)) else {
            return Err(GenerationError::InsufficientSeedPanels {
                required: 2,
                supplied: panels.len(),
            });
        };

        let overlap =
            PositionMask::from_panel(first).intersection(&PositionMask::from_panel(second));

        let mut result = Panel::new();
        for (row, col) in overlap.to_positions() {
            let left = first.get_attr(row, col, self.attribute);
            let right = second.get_attr(row, col, self.attribute);
            let delta = match self.op {
                ArithmeticOp::Add => right,
                ArithmeticOp::Subtract => -right,
            };
            // Wraps through the schema so 1-based ranges stay in range
            let combined = self.attribute.next_value(left, delta);

            let mut entity = sample_entity(selector, &AttributeRanges::default());
            if let Some(slot) = entity.get_mut(self.attribute.slot()) {
                *slot = combined;
            }
            result.set_entity(row, col, entity)?;
        }
        Ok(result)
    }

    /// Metadata record for this rule
    pub fn descriptor(&self) -> RuleDescriptor {
        RuleDescriptor {
            name: "arithmetic",
            target: Some(self.attribute.name().to_string()),
            detail: self.op.name().to_string(),
        }
    }
}
