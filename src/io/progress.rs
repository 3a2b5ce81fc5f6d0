//! Batch progress display for puzzle generation

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::LazyLock;

/// Coordinates the progress display for a generation batch
///
/// Shows one bar across the whole batch with the most recent puzzle
/// outcome as its trailing message.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "[{{elapsed_precise}}] Puzzles: [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
        }
    }

    /// Set up the batch bar for the requested puzzle count
    pub fn initialize(&mut self, puzzle_count: usize) {
        let bar = ProgressBar::new(puzzle_count as u64);
        bar.set_style(BATCH_STYLE.clone());
        self.batch_bar = Some(self.multi_progress.add(bar));
    }

    /// Advance the batch bar after one puzzle finishes
    pub fn complete_puzzle(&self, index: usize, succeeded: bool) {
        if let Some(ref bar) = self.batch_bar {
            bar.inc(1);
            let mark = if succeeded { '✓' } else { '✗' };
            bar.set_message(format!("{mark} puzzle {index:04}"));
        }
    }

    /// Clean up the progress display
    pub fn finish(&self, succeeded: usize, requested: usize) {
        if let Some(ref bar) = self.batch_bar {
            bar.finish_with_message(format!("{succeeded}/{requested} puzzles generated"));
        }
        let _ = self.multi_progress.clear();
    }
}
