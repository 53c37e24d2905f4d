//! Command line tools for scoring outputs
#![doc = include_str!("../readme.md")]

// Split into subfiles for development, but anything important is re-exported
mod cli;
mod commands;

#[doc(inline)]
pub use cli::{Cli, Command, HistogramArgs, ReduceArgs, SliceArgs, Source};

#[doc(inline)]
pub use commands::{load, run, write_info, write_table};

/// Install the stderr logger for the given verbosity flags
///
/// Warnings are always shown unless `quiet`, and every `-v` raises the level
/// through info, debug, and trace.
pub fn init_logging(verbose: u8, quiet: bool) -> anyhow::Result<()> {
    stderrlog::new()
        .modules(["scoring", "scoring_cli", "scoring_matrix"])
        .verbosity(1 + verbose as usize)
        .quiet(quiet)
        .init()?;
    Ok(())
}
