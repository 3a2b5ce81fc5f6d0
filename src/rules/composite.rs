//! Sequential composition of rules

use crate::generator::RandomSelector;
use crate::io::error::{GenerationError, Result};
use crate::panel::Panel;
use crate::rules::{Rule, RuleDescriptor};

/// Applies a sequence of rules, feeding each output to the next
///
/// Only the first sub-rule may consume more than one panel; later
/// sub-rules receive a single intermediate panel, so a binary rule
/// mid-sequence is rejected at construction.
#[derive(Clone, Debug)]
pub struct CompositeRule {
    rules: Vec<Rule>,
}

impl CompositeRule {
    /// Create a composite rule from an ordered sub-rule sequence
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::RuleArity`] when any sub-rule past the
    /// first requires more than one panel.
    pub fn new(rules: Vec<Rule>) -> Result<Self> {
        for (position, rule) in rules.iter().enumerate().skip(1) {
            let required = rule.required_panels();
            if required > 1 {
                return Err(GenerationError::RuleArity { position, required });
            }
        }
        Ok(Self { rules })
    }

    /// Panels one application consumes: the first sub-rule's requirement
    pub fn required_panels(&self) -> usize {
        self.rules.first().map_or(1, Rule::required_panels)
    }

    /// Run the sequence over the input panels
    ///
    /// An empty sequence degrades to a deep copy of the first input.
    ///
    /// # Errors
    ///
    /// Forwards the first sub-rule failure unchanged.
    pub fn apply(&mut self, panels: &[Panel], selector: &mut RandomSelector) -> Result<Panel> {
        let mut sub_rules = self.rules.iter_mut();
        let mut current = match sub_rules.next() {
            Some(rule) => rule.apply(panels, selector)?,
            None => crate::rules::first_panel(panels, 1)?.clone(),
        };
        for rule in sub_rules {
            current = rule.apply(std::slice::from_ref(&current), selector)?;
        }
        Ok(current)
    }

    /// Chain every sub-rule's seed preparation in order
    ///
    /// # Errors
    ///
    /// Forwards the first sub-rule failure unchanged.
    pub fn prepare_seed(&mut self, seed: &Panel, selector: &mut RandomSelector) -> Result<Panel> {
        let mut current = seed.clone();
        for rule in &mut self.rules {
            current = rule.prepare_seed(&current, selector)?;
        }
        Ok(current)
    }

    /// Forward the row boundary to every sub-rule
    pub fn reset_row(&mut self) {
        for rule in &mut self.rules {
            rule.reset_row();
        }
    }

    /// Forward the full reset to every sub-rule
    pub fn reset(&mut self) {
        for rule in &mut self.rules {
            rule.reset();
        }
    }

    /// Metadata record naming every sub-rule
    pub fn descriptor(&self) -> RuleDescriptor {
        let parts: Vec<String> = self
            .rules
            .iter()
            .map(|rule| rule.descriptor().to_string())
            .collect();
        RuleDescriptor {
            name: "composite",
            target: None,
            detail: parts.join(" then "),
        }
    }
}
