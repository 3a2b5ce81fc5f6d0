//! Distribute-three: three values cycled across rows and columns

use crate::generator::RandomSelector;
use crate::io::error::{GenerationError, Result};
use crate::panel::Panel;
use crate::rules::RuleDescriptor;
use crate::schema::Attribute;

/// Cyclically permutes three attribute values across a 3x3 grid
///
/// On first use the rule draws three distinct values from the
/// attribute's range and fixes a permutation scheme: row 1 shows the
/// values in drawn order, rows 2 and 3 each show one of the two cyclic
/// rotations, assigned by a single coin flip. An application counter
/// (two applications per row, mod 6) tracks the grid position, so the
/// rule must be driven in row/column order; [`Self::reset`] restores the
/// unchosen state for reuse on an independent grid.
#[derive(Clone, Debug)]
pub struct DistributeThreeRule {
    attribute: Attribute,
    pattern: Option<[[i32; 3]; 3]>,
    applications: usize,
}

impl DistributeThreeRule {
    /// Create a distribute-three rule
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::UnsupportedAttribute`] for `exists`;
    /// only per-entity attributes can be distributed.
    pub fn new(attribute: Attribute) -> Result<Self> {
        if attribute == Attribute::Exists {
            return Err(GenerationError::UnsupportedAttribute {
                rule: "distribute_three",
                attribute: attribute.name().to_string(),
            });
        }
        Ok(Self {
            attribute,
            pattern: None,
            applications: 0,
        })
    }

    /// Rewrite a row's first panel to the row's leading value
    ///
    /// Draws the value triple and permutation scheme on first use. The
    /// returned panel is a clone with every entity's attribute set to the
    /// current row's first pattern value.
    ///
    /// # Errors
    ///
    /// Forwards attribute validation failures from the rewrite.
    pub fn prepare_seed(&mut self, seed: &Panel, selector: &mut RandomSelector) -> Result<Panel> {
        self.ensure_pattern(selector);
        let row = self.current_row();
        self.paint(seed, self.value_at(row, 0))
    }

    /// Produce the next column of the current row
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::InsufficientSeedPanels`] without an
    /// input and forwards attribute validation failures.
    pub fn apply(&mut self, panels: &[Panel], selector: &mut RandomSelector) -> Result<Panel> {
        let input = crate::rules::first_panel(panels, 1)?;
        self.ensure_pattern(selector);
        let row = self.current_row();
        let col = 1 + self.applications % 2;
        let result = self.paint(input, self.value_at(row, col))?;
        self.applications = (self.applications + 1) % 6;
        Ok(result)
    }

    /// Realign the application counter to a row boundary
    pub fn reset_row(&mut self) {
        self.applications = (self.applications + self.applications % 2) % 6;
    }

    /// Forget the value triple and permutation scheme
    pub fn reset(&mut self) {
        self.pattern = None;
        self.applications = 0;
    }

    /// Metadata record for this rule
    pub fn descriptor(&self) -> RuleDescriptor {
        RuleDescriptor {
            name: "distribute_three",
            target: Some(self.attribute.name().to_string()),
            detail: String::new(),
        }
    }

    fn ensure_pattern(&mut self, selector: &mut RandomSelector) {
        if self.pattern.is_some() {
            return;
        }
        let (min, max) = self.attribute.bounds();
        let values = selector.distinct_values(min, max, 3);
        let v0 = values.first().copied().unwrap_or(min);
        let v1 = values.get(1).copied().unwrap_or(min);
        let v2 = values.get(2).copied().unwrap_or(min);

        let first = [v0, v1, v2];
        let rotations = ([v1, v2, v0], [v2, v0, v1]);
        let (second, third) = if selector.coin() {
            (rotations.0, rotations.1)
        } else {
            (rotations.1, rotations.0)
        };
        self.pattern = Some([first, second, third]);
    }

    const fn current_row(&self) -> usize {
        (self.applications / 2) % 3
    }

    fn value_at(&self, row: usize, col: usize) -> i32 {
        self.pattern
            .as_ref()
            .and_then(|rows| rows.get(row))
            .and_then(|cols| cols.get(col))
            .copied()
            .unwrap_or(self.attribute.bounds().0)
    }

    fn paint(&self, panel: &Panel, value: i32) -> Result<Panel> {
        let mut result = panel.clone();
        for (row, col) in result.filled_positions() {
            result.set_attr(row, col, self.attribute, value)?;
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panel::sampler::uniform_triangles;

    fn row_value(panel: &Panel, attribute: Attribute) -> i32 {
        let positions = panel.filled_positions();
        let (row, col) = positions.first().copied().unwrap_or((0, 0));
        let value = panel.get_attr(row, col, attribute);
        for (r, c) in positions {
            assert_eq!(panel.get_attr(r, c, attribute), value);
        }
        value
    }

    fn generate_grid_values(seed: u64) -> [[i32; 3]; 3] {
        let mut rule = match DistributeThreeRule::new(Attribute::Color) {
            Ok(rule) => rule,
            Err(err) => unreachable!("color must be distributable: {err}"),
        };
        let mut selector = RandomSelector::new(seed);
        let mut grid = [[0; 3]; 3];
        for row_values in &mut grid {
            rule.reset_row();
            let seed_panel = uniform_triangles(4);
            let first = match rule.prepare_seed(&seed_panel, &mut selector) {
                Ok(panel) => panel,
                Err(err) => unreachable!("prepare_seed failed: {err}"),
            };
            let second = match rule.apply(&[first.clone()], &mut selector) {
                Ok(panel) => panel,
                Err(err) => unreachable!("apply failed: {err}"),
            };
            let third = match rule.apply(&[second.clone()], &mut selector) {
                Ok(panel) => panel,
                Err(err) => unreachable!("apply failed: {err}"),
            };
            *row_values = [
                row_value(&first, Attribute::Color),
                row_value(&second, Attribute::Color),
                row_value(&third, Attribute::Color),
            ];
        }
        grid
    }

    #[test]
    fn test_each_row_shows_three_distinct_values() {
        for seed in [0, 1, 2, 99] {
            let grid = generate_grid_values(seed);
            for row in grid {
                let mut sorted = row;
                sorted.sort_unstable();
                assert_ne!(sorted.first(), sorted.get(1));
                assert_ne!(sorted.get(1), sorted.get(2));
            }
        }
    }

    #[test]
    fn test_rows_are_cyclic_rotations_of_the_first() {
        for seed in [3, 7, 21, 1000] {
            let grid = generate_grid_values(seed);
            let first = grid.first().copied().unwrap_or_default();
            let rotation_one = [
                first.get(1).copied().unwrap_or(0),
                first.get(2).copied().unwrap_or(0),
                first.first().copied().unwrap_or(0),
            ];
            let rotation_two = [
                first.get(2).copied().unwrap_or(0),
                first.first().copied().unwrap_or(0),
                first.get(1).copied().unwrap_or(0),
            ];
            let second = grid.get(1).copied().unwrap_or_default();
            let third = grid.get(2).copied().unwrap_or_default();
            assert!(
                (second == rotation_one && third == rotation_two)
                    || (second == rotation_two && third == rotation_one),
                "rows 2 and 3 must be the two cyclic rotations"
            );
        }
    }

    #[test]
    fn test_reset_allows_fresh_reuse() {
        let mut rule = match DistributeThreeRule::new(Attribute::Size) {
            Ok(rule) => rule,
            Err(err) => unreachable!("size must be distributable: {err}"),
        };
        let mut selector = RandomSelector::new(5);
        let seed_panel = uniform_triangles(3);
        let before = rule.prepare_seed(&seed_panel, &mut selector);
        assert!(before.is_ok());
        assert!(rule.apply(&[seed_panel.clone()], &mut selector).is_ok());

        rule.reset();
        let after = rule.prepare_seed(&seed_panel, &mut selector);
        assert!(after.is_ok());
        match rule.apply(&[seed_panel], &mut selector) {
            Ok(panel) => {
                // Counter restarted: this application paints row 1, column 2
                assert_eq!(rule.applications, 1);
                assert!(panel.total_entities() > 0);
            }
            Err(err) => unreachable!("apply after reset failed: {err}"),
        }
    }

    #[test]
    fn test_exists_cannot_be_distributed() {
        assert!(DistributeThreeRule::new(Attribute::Exists).is_err());
    }

    #[test]
    fn test_row_realignment_rounds_up_mid_row_state() {
        let mut rule = match DistributeThreeRule::new(Attribute::Angle) {
            Ok(rule) => rule,
            Err(err) => unreachable!("angle must be distributable: {err}"),
        };
        let mut selector = RandomSelector::new(2);
        let seed_panel = uniform_triangles(2);
        assert!(rule.prepare_seed(&seed_panel, &mut selector).is_ok());
        assert!(rule.apply(&[seed_panel], &mut selector).is_ok());
        assert_eq!(rule.applications, 1);
        rule.reset_row();
        assert_eq!(rule.applications, 2);
        rule.reset_row();
        assert_eq!(rule.applications, 2);
    }
}
