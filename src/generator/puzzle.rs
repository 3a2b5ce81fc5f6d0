//! Batch puzzle assembly with bounded retry

use crate::generator::distractor::{Difficulty, DistractorGenerator};
use crate::generator::row::RowGenerator;
use crate::generator::selection::RandomSelector;
use crate::io::configuration::GeneratorConfig;
use crate::io::error::Result;
use crate::panel::{Panel, PanelSampler};
use crate::rules::{Rule, RuleDescriptor, RuleSpec, build_rule};

/// One fully assembled puzzle
#[derive(Clone, Debug, PartialEq)]
pub struct Puzzle {
    /// The nine grid panels in row-major order
    pub grid: Vec<Panel>,
    /// The true answer, equal to the bottom-right grid panel
    pub answer: Panel,
    /// Shuffled candidate list holding the answer and every distractor
    pub candidates: Vec<Panel>,
    /// Index of the answer within `candidates`
    pub target_index: usize,
    /// Descriptors of the rules that shaped the grid
    pub rules: Vec<RuleDescriptor>,
    /// Difficulty the distractors were drawn at
    pub difficulty: Difficulty,
}

impl Puzzle {
    /// The eight context panels shown to a solver, in row-major order
    ///
    /// The bottom-right panel is withheld; it lives in `candidates`.
    pub fn context(&self) -> Vec<&Panel> {
        self.grid.iter().take(8).collect()
    }
}

/// Outcome of one batch request
///
/// Batches are best effort: a puzzle that exhausts its attempts is
/// recorded as a failure and generation moves on, so `succeeded` may be
/// less than `requested` without any error having escaped.
#[derive(Debug, Default, PartialEq)]
pub struct GenerationReport {
    /// Puzzles that assembled successfully
    pub puzzles: Vec<Puzzle>,
    /// How many puzzles the batch asked for
    pub requested: usize,
    /// How many assembled
    pub succeeded: usize,
    /// How many exhausted their attempt budget
    pub failed: usize,
    /// Attempts consumed across the whole batch
    pub attempts: usize,
}

/// Drives seed sampling, row generation, and candidate assembly
pub struct PuzzleGenerator {
    config: GeneratorConfig,
    selector: RandomSelector,
}

impl PuzzleGenerator {
    /// Create a generator with a fixed seed
    ///
    /// Equal seeds and configurations reproduce batches exactly.
    pub fn new(config: GeneratorConfig, seed: u64) -> Self {
        Self {
            config,
            selector: RandomSelector::new(seed),
        }
    }

    /// The active configuration
    pub const fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate a batch of puzzles
    ///
    /// Each puzzle gets up to `max_attempts` tries. Recoverable errors
    /// (constraint violations, entity bounds, insufficient seeds) burn an
    /// attempt and the puzzle is retried; an exhausted budget records a
    /// failure and the batch continues.
    ///
    /// # Errors
    ///
    /// Configuration errors such as
    /// [`crate::GenerationError::UnknownRuleType`] abort the whole batch
    /// immediately; they mean the template is broken, not that a random
    /// draw went badly.
    pub fn generate(
        &mut self,
        num_puzzles: usize,
        max_attempts: usize,
    ) -> Result<GenerationReport> {
        let mut report = GenerationReport {
            puzzles: Vec::with_capacity(num_puzzles),
            requested: num_puzzles,
            succeeded: 0,
            failed: 0,
            attempts: 0,
        };

        for _ in 0..num_puzzles {
            let mut produced = false;
            for _ in 0..max_attempts {
                report.attempts += 1;
                match self.attempt_puzzle() {
                    Ok(puzzle) => {
                        report.puzzles.push(puzzle);
                        report.succeeded += 1;
                        produced = true;
                        break;
                    }
                    Err(err) if err.is_recoverable() => {}
                    Err(err) => return Err(err),
                }
            }
            if !produced {
                report.failed += 1;
            }
        }

        Ok(report)
    }

    fn attempt_puzzle(&mut self) -> Result<Puzzle> {
        let rules = self.build_rules()?;
        let mut row_generator = RowGenerator::new(rules);
        let sampler = PanelSampler::new(self.config.constraints);

        let top = self.build_row(&mut row_generator, &sampler)?;
        let middle = self.build_row(&mut row_generator, &sampler)?;
        let [bottom_left, bottom_center, answer] = self.build_row(&mut row_generator, &sampler)?;

        let grid: Vec<Panel> = top
            .into_iter()
            .chain(middle)
            .chain([bottom_left, bottom_center, answer.clone()])
            .collect();

        let distractors = DistractorGenerator::new(
            self.config.difficulty,
            self.config.constraints.ranges,
        )
        .generate(&answer, self.config.distractor_count, &mut self.selector)?;

        let mut candidates = Vec::with_capacity(distractors.len() + 1);
        candidates.push(answer.clone());
        candidates.extend(distractors);
        self.selector.shuffle(&mut candidates);
        let target_index = candidates
            .iter()
            .position(|candidate| *candidate == answer)
            .unwrap_or(0);

        Ok(Puzzle {
            grid,
            answer,
            candidates,
            target_index,
            rules: row_generator.descriptors(),
            difficulty: self.config.difficulty,
        })
    }

    fn build_rules(&mut self) -> Result<Vec<Rule>> {
        if self.config.rules.is_empty() {
            let spec = RuleSpec::sample(&mut self.selector);
            return Ok(vec![build_rule(&spec)?]);
        }
        self.config.rules.iter().map(build_rule).collect()
    }

    fn build_row(
        &mut self,
        row_generator: &mut RowGenerator,
        sampler: &PanelSampler,
    ) -> Result<[Panel; 3]> {
        let mut seeds = Vec::with_capacity(row_generator.required_panels());
        for _ in 0..row_generator.required_panels() {
            seeds.push(sampler.sample_panel(&mut self.selector)?);
        }
        row_generator.generate(&seeds, &mut self.selector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::configuration::PanelConstraints;
    use crate::io::error::GenerationError;
    use crate::rules::factory::RuleParameters;

    fn pinned_config(specs: Vec<RuleSpec>) -> GeneratorConfig {
        GeneratorConfig {
            rules: specs,
            ..GeneratorConfig::default()
        }
    }

    #[test]
    fn test_pinned_color_progression_fills_the_batch() {
        let config = pinned_config(vec![RuleSpec::progression("color", 1)]);
        let mut generator = PuzzleGenerator::new(config, 7);
        let report = match generator.generate(3, 10) {
            Ok(report) => report,
            Err(err) => unreachable!("batch failed: {err}"),
        };
        assert_eq!(report.succeeded, 3);
        assert_eq!(report.failed, 0);
        assert_eq!(report.attempts, 3);
        assert_eq!(report.puzzles.len(), 3);

        for puzzle in &report.puzzles {
            assert_eq!(puzzle.grid.len(), 9);
            assert_eq!(puzzle.grid.get(8), Some(&puzzle.answer));
            assert_eq!(puzzle.context().len(), 8);
            assert_eq!(puzzle.candidates.len(), 8);
            assert_eq!(puzzle.candidates.get(puzzle.target_index), Some(&puzzle.answer));
            assert_eq!(puzzle.rules.len(), 1);
        }
    }

    #[test]
    fn test_impossible_constraints_exhaust_attempts_quietly() {
        let mut config = pinned_config(vec![RuleSpec::constant()]);
        config.constraints = PanelConstraints {
            min_entities: 5,
            max_entities: 2,
            ..PanelConstraints::default()
        };
        let mut generator = PuzzleGenerator::new(config, 1);
        let report = match generator.generate(5, 10) {
            Ok(report) => report,
            Err(err) => unreachable!("impossible constraints must not escape: {err}"),
        };
        assert!(report.puzzles.is_empty());
        assert_eq!(report.succeeded, 0);
        assert_eq!(report.failed, 5);
        assert_eq!(report.attempts, 50);
    }

    #[test]
    fn test_unknown_rule_type_aborts_the_batch() {
        let config = pinned_config(vec![RuleSpec {
            kind: "wormhole".to_string(),
            attribute: None,
            parameters: RuleParameters::default(),
            rules: Vec::new(),
        }]);
        let mut generator = PuzzleGenerator::new(config, 1);
        match generator.generate(2, 10) {
            Err(GenerationError::UnknownRuleType { name }) => assert_eq!(name, "wormhole"),
            other => unreachable!("expected UnknownRuleType, got {other:?}"),
        }
    }

    #[test]
    fn test_equal_seeds_reproduce_batches() {
        let config = pinned_config(vec![RuleSpec::progression("angle", 2)]);
        let mut first = PuzzleGenerator::new(config.clone(), 404);
        let mut second = PuzzleGenerator::new(config, 404);
        match (first.generate(2, 10), second.generate(2, 10)) {
            (Ok(a), Ok(b)) => assert_eq!(a, b),
            other => unreachable!("batch failed: {other:?}"),
        }
    }

    #[test]
    fn test_unpinned_config_draws_a_rule_per_puzzle() {
        let mut generator = PuzzleGenerator::new(GeneratorConfig::default(), 23);
        let report = match generator.generate(4, 10) {
            Ok(report) => report,
            Err(err) => unreachable!("batch failed: {err}"),
        };
        assert_eq!(report.succeeded + report.failed, 4);
        for puzzle in &report.puzzles {
            assert_eq!(puzzle.rules.len(), 1);
            assert_eq!(puzzle.candidates.len(), 8);
        }
    }
}
