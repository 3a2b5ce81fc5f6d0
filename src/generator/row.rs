//! Row assembly from an ordered rule set

use crate::generator::selection::RandomSelector;
use crate::io::error::{GenerationError, Result};
use crate::panel::Panel;
use crate::rules::{Rule, RuleDescriptor};

/// Builds one three-panel row by driving a rule set across the columns
///
/// Unary rules fill the row left to right, each column feeding the next.
/// The binary arithmetic rule combines columns one and two into column
/// three; when arities mix, the binary result takes precedence for the
/// third column. Rules live for a whole puzzle so stateful variants can
/// span rows, and every [`Self::generate`] call starts by resetting
/// row-scoped state.
#[derive(Debug)]
pub struct RowGenerator {
    rules: Vec<Rule>,
    required: usize,
}

impl RowGenerator {
    /// Wrap an ordered rule set
    pub fn new(rules: Vec<Rule>) -> Self {
        let required = rules.iter().map(Rule::required_panels).max().unwrap_or(1);
        Self { rules, required }
    }

    /// Seed panels one row consumes
    pub const fn required_panels(&self) -> usize {
        self.required
    }

    /// Descriptors for the configured rules, in application order
    pub fn descriptors(&self) -> Vec<RuleDescriptor> {
        self.rules.iter().map(Rule::descriptor).collect()
    }

    /// Restore every rule to its freshly constructed state
    pub fn reset(&mut self) {
        for rule in &mut self.rules {
            rule.reset();
        }
    }

    /// Build a three-panel row from the supplied seeds
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::InsufficientSeedPanels`] when fewer
    /// seeds arrive than the rule set requires, and forwards recoverable
    /// constraint violations raised during rule application.
    pub fn generate(
        &mut self,
        seeds: &[Panel],
        selector: &mut RandomSelector,
    ) -> Result<[Panel; 3]> {
        if seeds.len() < self.required {
            return Err(GenerationError::InsufficientSeedPanels {
                required: self.required,
                supplied: seeds.len(),
            });
        }
        let Some(seed) = seeds.first() else {
            return Err(GenerationError::InsufficientSeedPanels {
                required: self.required,
                supplied: 0,
            });
        };

        for rule in &mut self.rules {
            rule.reset_row();
        }

        let mut first = seed.clone();
        for rule in &mut self.rules {
            first = rule.prepare_seed(&first, selector)?;
        }

        let has_unary = self.rules.iter().any(|rule| rule.required_panels() == 1);
        let second = if has_unary {
            self.apply_unary(&first, selector)?
        } else if let Some(panel) = seeds.get(1) {
            panel.clone()
        } else {
            first.clone()
        };

        let mut third = self.apply_unary(&second, selector)?;
        if self.required == 2 {
            let inputs = [first.clone(), second.clone()];
            for rule in &mut self.rules {
                if rule.required_panels() == 2 {
                    third = rule.apply(&inputs, selector)?;
                }
            }
        }

        Ok([first, second, third])
    }

    fn apply_unary(&mut self, input: &Panel, selector: &mut RandomSelector) -> Result<Panel> {
        let mut panel = input.clone();
        for rule in &mut self.rules {
            if rule.required_panels() == 1 {
                panel = rule.apply(std::slice::from_ref(&panel), selector)?;
            }
        }
        Ok(panel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panel::sampler::uniform_triangles;
    use crate::rules::{RuleSpec, build_rule};
    use crate::schema::Attribute;

    fn rules_from(specs: &[RuleSpec]) -> Vec<Rule> {
        specs
            .iter()
            .map(|spec| match build_rule(spec) {
                Ok(rule) => rule,
                Err(err) => unreachable!("test spec failed to build: {err}"),
            })
            .collect()
    }

    fn single_entity(size: i32) -> Panel {
        let mut panel = Panel::new();
        match panel.set_entity(0, 0, [1, 1, size, 0, 1]) {
            Ok(()) => panel,
            Err(err) => unreachable!("test entity out of range: {err}"),
        }
    }

    #[test]
    fn test_unary_progression_steps_across_columns() {
        let mut generator = RowGenerator::new(rules_from(&[RuleSpec::progression("type", 1)]));
        let mut selector = RandomSelector::new(7);
        let row = match generator.generate(&[single_entity(3)], &mut selector) {
            Ok(row) => row,
            Err(err) => unreachable!("row generation failed: {err}"),
        };
        let types: Vec<i32> = row
            .iter()
            .map(|panel| panel.get_attr(0, 0, Attribute::Type))
            .collect();
        assert_eq!(types, vec![1, 2, 3]);
        for panel in &row {
            assert_eq!(panel.total_entities(), 1);
        }
    }

    #[test]
    fn test_binary_row_takes_second_seed_as_column_two() {
        let mut generator =
            RowGenerator::new(rules_from(&[RuleSpec::arithmetic("size", "add")]));
        assert_eq!(generator.required_panels(), 2);

        let mut selector = RandomSelector::new(11);
        let seeds = [single_entity(2), single_entity(3)];
        let row = match generator.generate(&seeds, &mut selector) {
            Ok(row) => row,
            Err(err) => unreachable!("row generation failed: {err}"),
        };
        assert_eq!(row.first(), seeds.first());
        assert_eq!(row.get(1), seeds.get(1));
        let third = row.get(2).map(|panel| panel.get_attr(0, 0, Attribute::Size));
        assert_eq!(third, Some(5));
    }

    #[test]
    fn test_binary_rule_owns_column_three_when_arities_mix() {
        let mut generator = RowGenerator::new(rules_from(&[
            RuleSpec::constant(),
            RuleSpec::arithmetic("size", "add"),
        ]));
        let mut selector = RandomSelector::new(3);
        let seeds = [single_entity(2), single_entity(3)];
        let row = match generator.generate(&seeds, &mut selector) {
            Ok(row) => row,
            Err(err) => unreachable!("row generation failed: {err}"),
        };
        // Constant alone would leave size 2; arithmetic combines 2 + 2.
        let third = row.get(2).map(|panel| panel.get_attr(0, 0, Attribute::Size));
        assert_eq!(third, Some(4));
    }

    #[test]
    fn test_missing_seeds_are_recoverable() {
        let mut generator =
            RowGenerator::new(rules_from(&[RuleSpec::arithmetic("color", "subtract")]));
        let mut selector = RandomSelector::new(5);
        match generator.generate(&[single_entity(1)], &mut selector) {
            Err(GenerationError::InsufficientSeedPanels { required, supplied }) => {
                assert_eq!(required, 2);
                assert_eq!(supplied, 1);
            }
            other => unreachable!("expected InsufficientSeedPanels, got {other:?}"),
        }
    }

    #[test]
    fn test_distribute_three_row_holds_three_distinct_values() {
        let mut generator =
            RowGenerator::new(rules_from(&[RuleSpec::distribute_three("color")]));
        let mut selector = RandomSelector::new(29);
        let row = match generator.generate(&[uniform_triangles(4)], &mut selector) {
            Ok(row) => row,
            Err(err) => unreachable!("row generation failed: {err}"),
        };
        let mut colors: Vec<i32> = row
            .iter()
            .map(|panel| panel.get_attr(0, 0, Attribute::Color))
            .collect();
        colors.sort_unstable();
        colors.dedup();
        assert_eq!(colors.len(), 3);
    }

    #[test]
    fn test_empty_rule_set_repeats_the_seed() {
        let mut generator = RowGenerator::new(Vec::new());
        let mut selector = RandomSelector::new(1);
        let seed = single_entity(4);
        let row = match generator.generate(std::slice::from_ref(&seed), &mut selector) {
            Ok(row) => row,
            Err(err) => unreachable!("row generation failed: {err}"),
        };
        assert!(row.iter().all(|panel| *panel == seed));
    }
}
