//! CLI entry point for the matrix puzzle generator

use clap::Parser;
use ravengen::io::cli::{BatchProcessor, Cli};

fn main() -> ravengen::Result<()> {
    let cli = Cli::parse();
    let mut processor = BatchProcessor::new(cli);
    processor.process()
}
