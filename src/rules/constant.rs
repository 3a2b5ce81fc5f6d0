//! The identity rule

use crate::io::error::Result;
use crate::panel::Panel;
use crate::rules::{RuleDescriptor, first_panel};

/// Carries a panel across a row unchanged
///
/// Constant rows are part of the puzzle vocabulary. The output is a deep
/// copy, keeping the contract that every rule output is an independent
/// panel.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConstantRule;

impl ConstantRule {
    /// Create a constant rule
    pub const fn new() -> Self {
        Self
    }

    /// Return a deep copy of the first input panel
    ///
    /// # Errors
    ///
    /// Returns [`crate::GenerationError::InsufficientSeedPanels`] without
    /// an input.
    pub fn apply(&self, panels: &[Panel]) -> Result<Panel> {
        Ok(first_panel(panels, 1)?.clone())
    }

    /// Metadata record for this rule
    pub const fn descriptor(&self) -> RuleDescriptor {
        RuleDescriptor {
            name: "constant",
            target: None,
            detail: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panel::sampler::gradient_colors;

    #[test]
    fn test_output_equals_but_does_not_alias_input() {
        let panel = gradient_colors();
        let rule = ConstantRule::new();
        match rule.apply(&[panel.clone()]) {
            Ok(mut result) => {
                assert_eq!(result, panel);
                result.clear_cell(0, 0);
                assert_ne!(result, panel);
            }
            Err(err) => unreachable!("constant rule failed: {err}"),
        }
    }

    #[test]
    fn test_empty_input_errors() {
        assert!(ConstantRule::new().apply(&[]).is_err());
    }
}
