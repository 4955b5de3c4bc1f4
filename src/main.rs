//! CLI entry point for the block program synthesizer

use blocoder::io::cli::{Cli, TargetProcessor};
use blocoder::io::logging;
use clap::Parser;

fn main() -> blocoder::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);
    let processor = TargetProcessor::new(cli);
    processor.process()?;
    Ok(())
}
