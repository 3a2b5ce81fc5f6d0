//! Command-line interface for batch puzzle generation

use crate::generator::{Difficulty, GenerationReport, PuzzleGenerator};
use crate::io::configuration::{
    DEFAULT_DISTRACTOR_COUNT, DEFAULT_MAX_ATTEMPTS, DEFAULT_PUZZLE_COUNT, DEFAULT_SEED,
    GeneratorConfig, MAX_ENTITIES, MIN_ENTITIES, PanelConstraints,
};
use crate::io::error::{Result, invalid_parameter};
use crate::io::export::save_puzzle;
use crate::io::progress::ProgressManager;
use crate::rules::{RuleParameters, RuleSpec};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ravengen")]
#[command(
    author,
    version,
    about = "Generate matrix reasoning puzzles from rule-governed panel grids"
)]
/// Command-line arguments for the puzzle generation tool
pub struct Cli {
    /// Number of puzzles to generate
    #[arg(short, long, default_value_t = DEFAULT_PUZZLE_COUNT)]
    pub count: usize,

    /// Random seed for reproducible generation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Distractor difficulty: easy, medium, or hard
    #[arg(short, long, default_value = "medium")]
    pub difficulty: String,

    /// Generation attempts allowed per puzzle
    #[arg(short, long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    pub attempts: usize,

    /// Directory for rendered puzzles and metadata
    #[arg(short, long, default_value = "puzzles")]
    pub output: PathBuf,

    /// Pin every puzzle to one rule kind (e.g. progression, rotation)
    #[arg(short, long)]
    pub rule: Option<String>,

    /// Attribute the pinned rule targets (type, size, angle, color, number)
    #[arg(long)]
    pub attribute: Option<String>,

    /// Step for the pinned rule
    #[arg(long, default_value_t = 1)]
    pub step: i32,

    /// Operation for a pinned arithmetic rule (add or subtract)
    #[arg(long)]
    pub operation: Option<String>,

    /// Direction for a pinned shift rule (right, left, up, down,
    /// diagonal, or reverse_diagonal)
    #[arg(long)]
    pub direction: Option<String>,

    /// Wrong answers generated per puzzle
    #[arg(long, default_value_t = DEFAULT_DISTRACTOR_COUNT)]
    pub distractors: usize,

    /// Fewest entities in a sampled seed panel
    #[arg(long, default_value_t = MIN_ENTITIES)]
    pub min_entities: usize,

    /// Most entities in a sampled seed panel
    #[arg(long, default_value_t = MAX_ENTITIES)]
    pub max_entities: usize,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Skip image and metadata export
    #[arg(long)]
    pub no_render: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Check if puzzles should be written to disk
    pub const fn should_render(&self) -> bool {
        !self.no_render
    }
}

/// Orchestrates batch generation with progress tracking and export
pub struct BatchProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl BatchProcessor {
    /// Create a new batch processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Generate and export puzzles according to CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if the arguments do not form a usable
    /// configuration, a pinned rule fails to build, or export fails
    pub fn process(&mut self) -> Result<()> {
        let config = self.build_config()?;
        let mut generator = PuzzleGenerator::new(config, self.cli.seed);

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(self.cli.count);
        }

        let mut report = GenerationReport {
            requested: self.cli.count,
            ..GenerationReport::default()
        };
        let mut exported = 0;

        for index in 0..self.cli.count {
            let single = generator.generate(1, self.cli.attempts)?;

            if self.cli.should_render() {
                for puzzle in &single.puzzles {
                    save_puzzle(puzzle, exported, &self.cli.output)?;
                    exported += 1;
                }
            }

            if let Some(ref pm) = self.progress_manager {
                pm.complete_puzzle(index, single.succeeded > 0);
            }

            report.succeeded += single.succeeded;
            report.failed += single.failed;
            report.attempts += single.attempts;
            report.puzzles.extend(single.puzzles);
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish(report.succeeded, report.requested);
        }

        self.print_summary(&report);
        Ok(())
    }

    fn build_config(&self) -> Result<GeneratorConfig> {
        let difficulty = Difficulty::from_name(&self.cli.difficulty).ok_or_else(|| {
            invalid_parameter(
                "difficulty",
                &self.cli.difficulty,
                &"expected easy, medium, or hard",
            )
        })?;

        let constraints = PanelConstraints {
            min_entities: self.cli.min_entities,
            max_entities: self.cli.max_entities,
            ..PanelConstraints::default()
        };
        constraints.validate()?;

        let rules = self.cli.rule.as_ref().map_or_else(Vec::new, |kind| {
            vec![RuleSpec {
                kind: kind.clone(),
                attribute: self.cli.attribute.clone(),
                parameters: RuleParameters {
                    step: self.cli.step,
                    operation: self.cli.operation.clone(),
                    direction: self.cli.direction.clone(),
                    ..RuleParameters::default()
                },
                rules: Vec::new(),
            }]
        });

        Ok(GeneratorConfig {
            rules,
            constraints,
            difficulty,
            distractor_count: self.cli.distractors,
        })
    }

    // Allow print for the end-of-batch summary
    #[allow(clippy::print_stderr)]
    fn print_summary(&self, report: &GenerationReport) {
        if self.cli.quiet {
            return;
        }
        eprintln!(
            "Generated {} of {} puzzles in {} attempts ({} failed)",
            report.succeeded, report.requested, report.attempts, report.failed
        );
        if self.cli.should_render() && report.succeeded > 0 {
            eprintln!("Wrote output to {}", self.cli.output.display());
        }
    }
}
