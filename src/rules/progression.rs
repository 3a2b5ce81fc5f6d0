//! Modular progression over an attribute or the entity count

use crate::generator::RandomSelector;
use crate::io::configuration::{AttributeRanges, MAX_ENTITIES, MIN_ENTITIES};
use crate::io::error::{GenerationError, Result, invalid_parameter};
use crate::panel::Panel;
use crate::panel::sampler::sample_entity;
use crate::rules::{RuleDescriptor, Target, first_panel};

/// Steps an attribute of every entity, or the entity count itself, with
/// modular wraparound
#[derive(Clone, Copy, Debug)]
pub struct ProgressionRule {
    target: Target,
    step: i32,
}

impl ProgressionRule {
    /// Create a progression rule
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::InvalidParameter`] for steps outside
    /// {-2, -1, 1, 2}.
    pub fn new(target: Target, step: i32) -> Result<Self> {
        if step == 0 || step.abs() > 2 {
            return Err(invalid_parameter(
                "step",
                &step,
                &"progression steps must be -2, -1, 1, or 2",
            ));
        }
        Ok(Self { target, step })
    }

    /// Apply the progression to the first input panel
    ///
    /// Attribute targets step the value of every existing entity through
    /// the schema's wraparound. The `number` target adds or removes
    /// `|step|` entities at uniformly chosen positions.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::EntityBound`] when a `number`
    /// progression would leave the 1..=9 band, and
    /// [`GenerationError::InsufficientSeedPanels`] without an input.
    pub fn apply(&self, panels: &[Panel], selector: &mut RandomSelector) -> Result<Panel> {
        let input = first_panel(panels, 1)?;
        match self.target {
            Target::Attribute(attribute) => {
                let mut result = input.clone();
                for (row, col) in input.filled_positions() {
                    let current = input.get_attr(row, col, attribute);
                    let next = attribute.next_value(current, self.step);
                    result.set_attr(row, col, attribute, next)?;
                }
                Ok(result)
            }
            Target::Number => self.apply_to_count(input, selector),
        }
    }

    fn apply_to_count(&self, input: &Panel, selector: &mut RandomSelector) -> Result<Panel> {
        let current = input.total_entities();
        let next = current as i32 + self.step;
        if next < MIN_ENTITIES as i32 || next > MAX_ENTITIES as i32 {
            return Err(GenerationError::EntityBound {
                current,
                change: self.step,
                min: MIN_ENTITIES,
                max: MAX_ENTITIES,
            });
        }

        let mut result = input.clone();
        let count = self.step.unsigned_abs() as usize;
        if self.step > 0 {
            let empties = result.empty_positions();
            for (row, col) in selector.choose_distinct(&empties, count) {
                let entity = sample_entity(selector, &AttributeRanges::default());
                result.set_entity(row, col, entity)?;
            }
        } else {
            let filled = result.filled_positions();
            for (row, col) in selector.choose_distinct(&filled, count) {
                result.clear_cell(row, col);
            }
        }
        Ok(result)
    }

    /// Metadata record for this rule
    pub fn descriptor(&self) -> RuleDescriptor {
        RuleDescriptor {
            name: "progression",
            target: Some(self.target.name().to_string()),
            detail: format!("step {:+}", self.step),
        }
    }
}
