//! Plausible wrong answers perturbed from the true answer

use crate::generator::selection::RandomSelector;
use crate::io::configuration::{AttributeRanges, MAX_DISTRACTOR_REDRAWS};
use crate::io::error::Result;
use crate::panel::sampler::sample_entity;
use crate::panel::{Panel, transforms};
use crate::schema::Attribute;
use std::fmt;

/// Distractor difficulty level
///
/// Selects both the severity-tier weights and the obviousness scalar
/// that scales perturbation sizes. Easy distractors are blatant and
/// numerous; hard distractors are subtle single changes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Difficulty {
    /// Blatant perturbations, simple to reject
    Easy,
    /// Balanced mix of severities
    #[default]
    Medium,
    /// Subtle perturbations, hard to tell from the answer
    Hard,
}

impl Difficulty {
    /// Every level, mildest first
    pub const ALL: [Self; 3] = [Self::Easy, Self::Medium, Self::Hard];

    /// Parse a level from its lowercase name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level.name() == name)
    }

    /// Canonical lowercase name
    pub const fn name(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }

    /// Obviousness scalar scaling perturbation sizes
    ///
    /// High values allow blatant multi-step changes, low values keep
    /// changes subtle.
    pub const fn scalar(self) -> f64 {
        match self {
            Self::Easy => 0.8,
            Self::Medium => 0.5,
            Self::Hard => 0.2,
        }
    }

    /// Severity tier weights in (hard, medium, easy) order
    const fn tier_weights(self) -> [f64; 3] {
        match self {
            Self::Easy => [0.05, 0.35, 0.6],
            Self::Medium => [0.3, 0.5, 0.2],
            Self::Hard => [0.7, 0.25, 0.05],
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Copy, Debug)]
enum Strategy {
    AttributeStep,
    PositionSwap,
    AttributeSwap,
    GlobalShift,
    RotateEntities,
    AddEntities,
    RemoveEntities,
    Reflect,
    Scramble,
}

const HARD_TIER: [Strategy; 3] = [
    Strategy::AttributeStep,
    Strategy::PositionSwap,
    Strategy::AttributeSwap,
];
const MEDIUM_TIER: [Strategy; 4] = [
    Strategy::GlobalShift,
    Strategy::RotateEntities,
    Strategy::AddEntities,
    Strategy::RemoveEntities,
];
const EASY_TIER: [Strategy; 2] = [Strategy::Reflect, Strategy::Scramble];

/// Produces incorrect-but-plausible candidate panels from the answer
///
/// Each distractor applies one perturbation strategy to a clone of the
/// answer. The strategy comes from a severity tier drawn with
/// difficulty-dependent weights, then uniformly within the tier.
/// Strategies that need more entities than the answer holds degrade to a
/// no-op clone rather than failing.
#[derive(Clone, Copy, Debug)]
pub struct DistractorGenerator {
    difficulty: Difficulty,
    ranges: AttributeRanges,
}

impl DistractorGenerator {
    /// Create a generator for one difficulty level
    ///
    /// `ranges` bounds the attributes of any freshly added entities.
    pub const fn new(difficulty: Difficulty, ranges: AttributeRanges) -> Self {
        Self { difficulty, ranges }
    }

    /// The configured difficulty level
    pub const fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Generate `count` distractors by perturbing the answer
    ///
    /// A candidate identical to the answer is redrawn up to a bounded
    /// number of times; once the cap is reached the duplicate is accepted,
    /// so degenerate answers (an empty panel, all-identical entities)
    /// still terminate.
    ///
    /// # Errors
    ///
    /// Forwards [`crate::GenerationError::InvalidAttributeValue`] if a
    /// strategy writes outside the schema, which indicates a broken
    /// strategy rather than a bad draw.
    pub fn generate(
        &self,
        answer: &Panel,
        count: usize,
        selector: &mut RandomSelector,
    ) -> Result<Vec<Panel>> {
        let mut distractors = Vec::with_capacity(count);
        for _ in 0..count {
            let mut candidate = self.perturb_once(answer, selector)?;
            let mut redraws = 0;
            while candidate == *answer && redraws < MAX_DISTRACTOR_REDRAWS {
                candidate = self.perturb_once(answer, selector)?;
                redraws += 1;
            }
            distractors.push(candidate);
        }
        Ok(distractors)
    }

    fn perturb_once(&self, answer: &Panel, selector: &mut RandomSelector) -> Result<Panel> {
        let strategy = match selector.weighted_choice(&self.difficulty.tier_weights()) {
            0 => HARD_TIER.get(selector.index(HARD_TIER.len())),
            1 => MEDIUM_TIER.get(selector.index(MEDIUM_TIER.len())),
            _ => EASY_TIER.get(selector.index(EASY_TIER.len())),
        }
        .copied()
        .unwrap_or(Strategy::AttributeStep);

        match strategy {
            Strategy::AttributeStep => self.step_attributes(answer, selector),
            Strategy::PositionSwap => Ok(swap_positions(answer, selector)),
            Strategy::AttributeSwap => self.swap_attribute_values(answer, selector),
            Strategy::GlobalShift => global_shift(answer, selector),
            Strategy::RotateEntities => rotate_entities(answer, selector),
            Strategy::AddEntities => self.add_entities(answer, selector),
            Strategy::RemoveEntities => Ok(self.remove_entities(answer, selector)),
            Strategy::Reflect => Ok(reflect(answer, selector)),
            Strategy::Scramble => scramble(answer, selector),
        }
    }

    fn step_attributes(&self, answer: &Panel, selector: &mut RandomSelector) -> Result<Panel> {
        let mut panel = answer.clone();
        for _ in 0..perturbation_count(self.difficulty, 5.0) {
            let filled = panel.filled_positions();
            let Some(&(row, col)) = filled.get(selector.index(filled.len())) else {
                return Ok(panel);
            };
            let attribute = random_target(selector);
            let delta = nonzero_delta(selector, 2);
            let stepped = attribute.next_value(panel.get_attr(row, col, attribute), delta);
            panel.set_attr(row, col, attribute, stepped)?;
        }
        Ok(panel)
    }

    fn swap_attribute_values(
        &self,
        answer: &Panel,
        selector: &mut RandomSelector,
    ) -> Result<Panel> {
        let mut panel = answer.clone();
        let filled = panel.filled_positions();
        if filled.len() < 2 {
            return Ok(panel);
        }
        let attribute = random_target(selector);
        let pair_budget =
            (2 + (self.difficulty.scalar() * 3.0) as usize).min(filled.len() / 2);
        let mut pool = selector.choose_distinct(&filled, filled.len());
        for _ in 0..pair_budget {
            let (Some(first), Some(second)) = (pool.pop(), pool.pop()) else {
                break;
            };
            let left = panel.get_attr(first.0, first.1, attribute);
            let right = panel.get_attr(second.0, second.1, attribute);
            panel.set_attr(first.0, first.1, attribute, right)?;
            panel.set_attr(second.0, second.1, attribute, left)?;
        }
        Ok(panel)
    }

    fn add_entities(&self, answer: &Panel, selector: &mut RandomSelector) -> Result<Panel> {
        let mut panel = answer.clone();
        let empty = panel.empty_positions();
        let budget = perturbation_count(self.difficulty, 2.0);
        for (row, col) in selector.choose_distinct(&empty, budget) {
            let entity = sample_entity(selector, &self.ranges);
            panel.set_entity(row, col, entity)?;
        }
        Ok(panel)
    }

    fn remove_entities(&self, answer: &Panel, selector: &mut RandomSelector) -> Panel {
        let mut panel = answer.clone();
        let filled = panel.filled_positions();
        let budget = perturbation_count(self.difficulty, 2.0);
        for (row, col) in selector.choose_distinct(&filled, budget) {
            panel.clear_cell(row, col);
        }
        panel
    }
}

fn swap_positions(answer: &Panel, selector: &mut RandomSelector) -> Panel {
    let filled = answer.filled_positions();
    if filled.len() < 2 {
        return answer.clone();
    }
    let pair = selector.choose_distinct(&filled, 2);
    match (pair.first(), pair.get(1)) {
        (Some(&first), Some(&second)) => transforms::swap_cells(answer, first, second),
        _ => answer.clone(),
    }
}

fn global_shift(answer: &Panel, selector: &mut RandomSelector) -> Result<Panel> {
    let mut panel = answer.clone();
    let filled = panel.filled_positions();
    if filled.is_empty() {
        return Ok(panel);
    }
    let attribute = random_target(selector);
    let delta = nonzero_delta(selector, 3);
    for (row, col) in filled {
        let stepped = attribute.next_value(panel.get_attr(row, col, attribute), delta);
        panel.set_attr(row, col, attribute, stepped)?;
    }
    Ok(panel)
}

fn rotate_entities(answer: &Panel, selector: &mut RandomSelector) -> Result<Panel> {
    let mut panel = answer.clone();
    // Quarter turn and up; a 45-degree nudge reads as a hard distractor
    let turns = [2, 3, 4, 6];
    let delta = turns.get(selector.index(turns.len())).copied().unwrap_or(4);
    for (row, col) in panel.filled_positions() {
        let angle = panel.get_attr(row, col, Attribute::Angle);
        panel.set_attr(row, col, Attribute::Angle, Attribute::Angle.next_value(angle, delta))?;
    }
    Ok(panel)
}

fn reflect(answer: &Panel, selector: &mut RandomSelector) -> Panel {
    if selector.coin() {
        transforms::reflect_horizontal(answer)
    } else {
        transforms::reflect_vertical(answer)
    }
}

fn scramble(answer: &Panel, selector: &mut RandomSelector) -> Result<Panel> {
    let filled = answer.filled_positions();
    if filled.len() < 2 {
        return Ok(answer.clone());
    }
    let mut panel = answer.clone();
    for &(row, col) in &filled {
        panel.clear_cell(row, col);
    }
    let mut entities: Vec<[i32; 5]> = filled
        .iter()
        .filter_map(|&(row, col)| answer.entity(row, col))
        .collect();
    selector.shuffle(&mut entities);
    let mut targets = filled;
    selector.shuffle(&mut targets);
    for (entity, (row, col)) in entities.into_iter().zip(targets) {
        panel.set_entity(row, col, entity)?;
    }
    Ok(panel)
}

fn random_target(selector: &mut RandomSelector) -> Attribute {
    Attribute::TARGETABLE
        .get(selector.index(Attribute::TARGETABLE.len()))
        .copied()
        .unwrap_or(Attribute::Color)
}

fn nonzero_delta(selector: &mut RandomSelector, max_magnitude: i32) -> i32 {
    let magnitude = selector.range_value(1, max_magnitude);
    if selector.coin() { magnitude } else { -magnitude }
}

const fn perturbation_count(difficulty: Difficulty, scale: f64) -> usize {
    let count = (difficulty.scalar() * scale) as usize;
    if count == 0 { 1 } else { count }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panel::sampler::gradient_colors;

    fn distinct_answer() -> Panel {
        let mut panel = Panel::new();
        let entities = [
            (0, 0, [1, 1, 2, 0, 1]),
            (0, 2, [1, 2, 3, 2, 4]),
            (1, 1, [1, 3, 4, 4, 7]),
            (2, 0, [1, 4, 5, 6, 9]),
        ];
        for (row, col, vector) in entities {
            match panel.set_entity(row, col, vector) {
                Ok(()) => {}
                Err(err) => unreachable!("test entity out of range: {err}"),
            }
        }
        panel
    }

    fn assert_within_schema(panel: &Panel) {
        assert!(panel.total_entities() <= 9);
        for (row, col) in panel.filled_positions() {
            for attribute in Attribute::ALL {
                let value = panel.get_attr(row, col, attribute);
                assert!(attribute.validate(value).is_ok());
            }
        }
    }

    #[test]
    fn test_generates_requested_count_at_every_level() {
        let answer = gradient_colors();
        for difficulty in Difficulty::ALL {
            let generator = DistractorGenerator::new(difficulty, AttributeRanges::default());
            let mut selector = RandomSelector::new(17);
            let distractors = match generator.generate(&answer, 7, &mut selector) {
                Ok(distractors) => distractors,
                Err(err) => unreachable!("generation failed: {err}"),
            };
            assert_eq!(distractors.len(), 7);
            for panel in &distractors {
                assert_within_schema(panel);
            }
        }
    }

    #[test]
    fn test_distractors_differ_from_a_distinct_answer() {
        let answer = distinct_answer();
        let generator = DistractorGenerator::new(Difficulty::Medium, AttributeRanges::default());
        let mut selector = RandomSelector::new(41);
        let distractors = match generator.generate(&answer, 20, &mut selector) {
            Ok(distractors) => distractors,
            Err(err) => unreachable!("generation failed: {err}"),
        };
        for panel in &distractors {
            assert_ne!(*panel, answer);
            assert_within_schema(panel);
        }
    }

    #[test]
    fn test_degenerate_answers_terminate() {
        // Every strategy except entity addition no-ops on an empty panel,
        // so the redraw cap has to fire without hanging or failing.
        let answer = Panel::new();
        let generator = DistractorGenerator::new(Difficulty::Hard, AttributeRanges::default());
        let mut selector = RandomSelector::new(2);
        let distractors = match generator.generate(&answer, 5, &mut selector) {
            Ok(distractors) => distractors,
            Err(err) => unreachable!("generation failed: {err}"),
        };
        assert_eq!(distractors.len(), 5);
        for panel in &distractors {
            assert_within_schema(panel);
        }
    }

    #[test]
    fn test_same_seed_reproduces_distractors() {
        let answer = distinct_answer();
        let generator = DistractorGenerator::new(Difficulty::Easy, AttributeRanges::default());
        let mut first = RandomSelector::new(99);
        let mut second = RandomSelector::new(99);
        let a = generator.generate(&answer, 7, &mut first);
        let b = generator.generate(&answer, 7, &mut second);
        match (a, b) {
            (Ok(a), Ok(b)) => assert_eq!(a, b),
            other => unreachable!("generation failed: {other:?}"),
        }
    }

    #[test]
    fn test_difficulty_names_and_scalars() {
        for difficulty in Difficulty::ALL {
            assert_eq!(Difficulty::from_name(difficulty.name()), Some(difficulty));
        }
        assert_eq!(Difficulty::from_name("brutal"), None);
        assert!(Difficulty::Easy.scalar() > Difficulty::Medium.scalar());
        assert!(Difficulty::Medium.scalar() > Difficulty::Hard.scalar());
        assert_eq!(Difficulty::default(), Difficulty::Medium);
    }
}
