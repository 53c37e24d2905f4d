//! `scoring` command line tool

// external crates
use anyhow::Result;
use clap::Parser;
use scoring_cli::{init_logging, run, Cli};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet)?;

    // the progress bar is noise when only errors are wanted
    let mut stdout = std::io::stdout().lock();
    run(&cli.command, !cli.quiet, &mut stdout)
}
