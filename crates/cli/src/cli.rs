// scoring modules
use scoring_matrix::{Axis, Notation, TableFormat};

// standard library
use std::path::PathBuf;

// external crates
use clap::{Args, Parser, Subcommand};

/// Browse volumetric scoring outputs
///
/// Files are plain text `x,y,z,value` records with optional `#` comment lines,
/// or datasets in HDF5 files when built with the `hdf5` feature.
#[derive(Parser, Debug)]
#[command(name = "scoring", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Verbose logging (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Shape, header, and summary statistics
    Info(Source),

    /// Print or export a 2D cross section
    Slice(SliceArgs),

    /// Sum blocks of voxels into a coarser grid
    Reduce(ReduceArgs),

    /// Frequency of values over the whole grid
    Histogram(HistogramArgs),

    /// List every dataset in an HDF5 file
    Datasets {
        /// Path to the HDF5 file
        file: PathBuf,
    },
}

/// Where the scoring data come from
#[derive(Args, Debug, Clone)]
pub struct Source {
    /// Path to the scoring file
    pub file: PathBuf,

    /// Load this dataset from an HDF5 file instead, e.g. "run/edep"
    #[arg(long, value_name = "path")]
    pub dataset: Option<String>,
}

/// Options for the `slice` subcommand
#[derive(Args, Debug, Clone)]
pub struct SliceArgs {
    #[command(flatten)]
    pub source: Source,

    /// Plane or fixed axis ("xy" or "z", "xz" or "y", "yz" or "x")
    #[arg(short, long, default_value = "xy", value_parser = parse_axis)]
    pub plane: Axis,

    /// Index of the slice along the fixed axis
    #[arg(short, long, default_value_t = 0)]
    pub index: usize,

    /// Values relative to the largest absolute value
    #[arg(short, long)]
    pub relative: bool,

    /// Write comma separated values to a file instead
    #[arg(short, long, value_name = "path")]
    pub output: Option<PathBuf>,

    /// Display notation ("normal" or "scientific")
    #[arg(long, default_value = "normal", value_parser = parse_notation)]
    pub notation: Notation,

    /// Display digits after the decimal point
    #[arg(long, default_value_t = 5)]
    pub digits: usize,
}

impl SliceArgs {
    /// Display options for the table
    pub fn format(&self) -> TableFormat {
        TableFormat {
            notation: self.notation,
            digits: self.digits,
        }
    }
}

/// Options for the `reduce` subcommand
#[derive(Args, Debug, Clone)]
pub struct ReduceArgs {
    #[command(flatten)]
    pub source: Source,

    /// Reduction factor along x, y, and z
    #[arg(short, long, num_args = 3, value_names = ["rx", "ry", "rz"], required = true)]
    pub factors: Vec<usize>,

    /// Write the reduced grid to a file instead
    #[arg(short, long, value_name = "path")]
    pub output: Option<PathBuf>,
}

/// Options for the `histogram` subcommand
#[derive(Args, Debug, Clone)]
pub struct HistogramArgs {
    #[command(flatten)]
    pub source: Source,

    /// Number of equal width bins
    #[arg(short, long, default_value_t = 100)]
    pub bins: usize,
}

fn parse_axis(s: &str) -> Result<Axis, String> {
    s.parse::<Axis>().map_err(|e| e.to_string())
}

fn parse_notation(s: &str) -> Result<Notation, String> {
    s.parse::<Notation>().map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arguments_are_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn slice_defaults() {
        let cli = Cli::parse_from(["scoring", "slice", "edep.txt"]);
        let Command::Slice(args) = cli.command else {
            panic!("expected the slice subcommand");
        };
        assert_eq!(args.plane, Axis::Z);
        assert_eq!(args.index, 0);
        assert!(!args.relative);
        assert_eq!(args.format(), TableFormat::default());
    }

    #[test]
    fn plane_by_name() {
        let cli = Cli::parse_from(["scoring", "slice", "edep.txt", "--plane", "yz", "-i", "3"]);
        let Command::Slice(args) = cli.command else {
            panic!("expected the slice subcommand");
        };
        assert_eq!(args.plane, Axis::X);
        assert_eq!(args.index, 3);
    }

    #[test]
    fn three_reduction_factors() {
        let cli = Cli::parse_from(["scoring", "reduce", "edep.txt", "--factors", "2", "2", "1"]);
        let Command::Reduce(args) = cli.command else {
            panic!("expected the reduce subcommand");
        };
        assert_eq!(args.factors, vec![2, 2, 1]);
        assert!(Cli::try_parse_from(["scoring", "reduce", "edep.txt", "-f", "2", "2"]).is_err());
    }

    #[test]
    fn global_verbosity() {
        let cli = Cli::parse_from(["scoring", "info", "edep.txt", "-vv"]);
        assert_eq!(cli.verbose, 2);
        assert!(!cli.quiet);
    }
}
