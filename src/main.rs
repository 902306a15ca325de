//! CLI entry point for frieze pattern classification

use clap::Parser;
use frieze::io::cli::{Cli, FileProcessor};
use frieze::io::logging::init_tracing;

fn main() -> frieze::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);
    let mut processor = FileProcessor::new(cli)?;
    processor.process()?;
    Ok(())
}
