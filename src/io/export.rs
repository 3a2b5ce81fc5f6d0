//! Writing finished puzzles to disk

use crate::generator::Puzzle;
use crate::io::error::{GenerationError, Result};
use crate::io::render;
use crate::panel::Panel;
use crate::schema::Attribute;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// Save one puzzle as a context sheet, a candidate strip, and a
/// plain-text metadata sidecar
///
/// Files land in `output_dir` as `puzzle_NNNN_context.png`,
/// `puzzle_NNNN_candidates.png`, and `puzzle_NNNN_meta.txt`. Returns
/// the three paths in that order.
///
/// # Errors
///
/// Returns [`GenerationError::FileSystem`] when the directory cannot be
/// created or the sidecar cannot be written, and
/// [`GenerationError::ImageExport`] when PNG encoding fails.
pub fn save_puzzle(puzzle: &Puzzle, index: usize, output_dir: &Path) -> Result<[PathBuf; 3]> {
    std::fs::create_dir_all(output_dir).map_err(|e| GenerationError::FileSystem {
        path: output_dir.to_path_buf(),
        operation: "create directory",
        source: e,
    })?;

    let context_path = output_dir.join(file_name(index, "context.png"));
    let candidates_path = output_dir.join(file_name(index, "candidates.png"));
    let meta_path = output_dir.join(file_name(index, "meta.txt"));

    save_image(&render::render_context_sheet(puzzle), &context_path)?;
    save_image(&render::render_candidate_strip(puzzle), &candidates_path)?;

    std::fs::write(&meta_path, describe_puzzle(puzzle, index)).map_err(|e| {
        GenerationError::FileSystem {
            path: meta_path.clone(),
            operation: "write metadata",
            source: e,
        }
    })?;

    Ok([context_path, candidates_path, meta_path])
}

fn file_name(index: usize, suffix: &str) -> String {
    format!("puzzle_{index:04}_{suffix}")
}

fn save_image(image: &image::RgbaImage, path: &Path) -> Result<()> {
    image.save(path).map_err(|e| GenerationError::ImageExport {
        path: path.to_path_buf(),
        source: e,
    })
}

fn describe_puzzle(puzzle: &Puzzle, index: usize) -> String {
    let mut text = String::new();
    let _ = writeln!(text, "puzzle: {index:04}");
    let _ = writeln!(text, "difficulty: {}", puzzle.difficulty);
    let _ = writeln!(text, "answer index: {}", puzzle.target_index);
    let _ = writeln!(text, "rules:");
    for rule in &puzzle.rules {
        let _ = writeln!(text, "  {rule}");
    }
    let _ = writeln!(text, "answer entities:");
    describe_panel(&puzzle.answer, &mut text);
    text
}

fn describe_panel(panel: &Panel, text: &mut String) {
    for (row, col) in panel.filled_positions() {
        if let Some(entity) = panel.entity(row, col) {
            let _ = write!(text, "  ({row}, {col}):");
            for attribute in Attribute::TARGETABLE {
                let value = entity.get(attribute.slot()).copied().unwrap_or(0);
                let _ = write!(text, " {}={}", attribute.name(), attribute.to_display(value));
            }
            let _ = writeln!(text);
        }
    }
}
