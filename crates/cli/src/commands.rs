//! Implementations of every subcommand

// crate modules
use crate::cli::{Command, HistogramArgs, ReduceArgs, SliceArgs, Source};

// scoring modules
use scoring_matrix::reader::ScoringReader;
use scoring_matrix::{
    list_datasets, read_dataset, write_scoring, write_scoring_file, DataMatrix, SliceView,
};
use scoring_utils::{f, OptionExt, ValueExt};

// standard library
use std::fs::File;
use std::io::{BufWriter, Write};

// external crates
use anyhow::{anyhow, Context, Result};
use log::info;

/// Run a subcommand, writing any results to `out`
pub fn run<W: Write>(command: &Command, show_progress: bool, out: &mut W) -> Result<()> {
    match command {
        Command::Info(source) => {
            let matrix = load(source, show_progress)?;
            write_info(&matrix, out)
        }
        Command::Slice(args) => slice(args, show_progress, out),
        Command::Reduce(args) => reduce(args, show_progress, out),
        Command::Histogram(args) => histogram(args, show_progress, out),
        Command::Datasets { file } => {
            let list = list_datasets(file)
                .with_context(|| f!("Failed to list datasets in {}", file.display()))?;
            for dataset in list {
                writeln!(out, "{dataset}")?;
            }
            Ok(())
        }
    }
}

/// Load a matrix from either a scoring file or an HDF5 dataset
pub fn load(source: &Source, show_progress: bool) -> Result<DataMatrix> {
    let path = &source.file;
    let matrix = match &source.dataset {
        Some(locator) => read_dataset(path, locator).with_context(|| {
            f!("Failed to read dataset \"{locator}\" from {}", path.display())
        })?,
        None => {
            let mut reader = ScoringReader::new();
            if !show_progress {
                reader.disable_progress();
            }
            reader
                .parse(path)
                .with_context(|| f!("Failed to read scoring data from {}", path.display()))?
        }
    };
    info!("Loaded {matrix} from {}", path.display());
    Ok(matrix)
}

/// Summary of the shape, header, and values of a matrix
pub fn write_info<W: Write>(matrix: &DataMatrix, out: &mut W) -> Result<()> {
    let [sx, sy, sz] = matrix.shape();
    writeln!(out, "Shape     : {sx} x {sy} x {sz} ({} cells)", matrix.len())?;
    writeln!(out, "Max value : {}", matrix.max_value().sci(5, 2))?;

    let stats = matrix.statistics()?;
    writeln!(out, "Total     : {}", stats.total.sci(5, 2))?;
    writeln!(out, "Minimum   : {}", stats.min.map(|v| v.sci(5, 2)).display())?;
    writeln!(out, "Mean      : {}", stats.mean.map(|v| v.sci(5, 2)).display())?;
    writeln!(out, "Maximum   : {}", stats.max.map(|v| v.sci(5, 2)).display())?;
    writeln!(out, "Std. dev. : {}", stats.stdev.map(|v| v.sci(5, 2)).display())?;

    let reductions = matrix
        .allowed_reductions()
        .iter()
        .map(|factors| f!("{factors:?}"))
        .collect::<Vec<String>>()
        .join(" ");
    writeln!(out, "Reductions: {reductions}")?;

    if !matrix.header().is_empty() {
        writeln!(out, "Header    :")?;
        write!(out, "{}", textwrap::indent(matrix.header(), "    "))?;
    }
    Ok(())
}

/// Print a formatted table of the slice, or export it as CSV
fn slice<W: Write>(args: &SliceArgs, show_progress: bool, out: &mut W) -> Result<()> {
    let matrix = load(&args.source, show_progress)?;
    let slice = matrix.slice(args.plane, args.index)?;

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| f!("Failed to create {}", path.display()))?;
            slice.write_csv(BufWriter::new(file), args.relative)?;
            info!("Slice written to {}", path.display());
        }
        None => write_table(&slice, args, out)?,
    }
    Ok(())
}

/// Aligned table with the row axis down the side and column axis along the top
pub fn write_table<W: Write>(slice: &SliceView, args: &SliceArgs, out: &mut W) -> Result<()> {
    let table = slice.formatted(&args.format(), args.relative)?;
    let plane = slice.plane_name();
    let (column_axis, row_axis) = (&plane[0..1], &plane[1..2]);

    let width = table
        .iter()
        .flatten()
        .map(String::len)
        .max()
        .unwrap_or(0)
        .max(column_axis.len() + 4);

    writeln!(out, "{}={} plane {plane}", slice.axis_name(), slice.index())?;

    let mut heading = f!("{:>6}", f!("{row_axis}\\{column_axis}"));
    for column in 0..slice.column_count() {
        heading += &f!(" {:>width$}", column);
    }
    writeln!(out, "{heading}")?;

    for (row, values) in table.iter().enumerate() {
        let mut line = f!("{row:>6}");
        for value in values {
            line += &f!(" {value:>width$}");
        }
        writeln!(out, "{line}")?;
    }

    writeln!(out, "{}", slice.statistics()?)?;
    Ok(())
}

/// Sum blocks of cells and write the coarser grid
fn reduce<W: Write>(args: &ReduceArgs, show_progress: bool, out: &mut W) -> Result<()> {
    let factors: [usize; 3] = args
        .factors
        .as_slice()
        .try_into()
        .map_err(|_| anyhow!("Expected 3 reduction factors, found {}", args.factors.len()))?;

    let matrix = load(&args.source, show_progress)?;
    let reduced = matrix.reduced(factors).with_context(|| {
        let [x, y, z] = matrix.allowed_reductions();
        f!("Allowed factors are x: {x:?}, y: {y:?}, z: {z:?}")
    })?;

    match &args.output {
        Some(path) => {
            write_scoring_file(&reduced, path)
                .with_context(|| f!("Failed to write {}", path.display()))?;
            info!("Reduced {matrix} to {reduced} in {}", path.display());
        }
        None => write_scoring(&reduced, out)?,
    }
    Ok(())
}

/// Text histogram of every value in the grid
fn histogram<W: Write>(args: &HistogramArgs, show_progress: bool, out: &mut W) -> Result<()> {
    let matrix = load(&args.source, show_progress)?;
    let histogram = matrix.histogram(args.bins)?;
    writeln!(out, "Bin width: {}", histogram.bin_width().sci(3, 2))?;
    write!(out, "{histogram}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Cli;
    use clap::Parser;
    use scoring_matrix::read_scoring_str;

    fn output_of(matrix: &DataMatrix, arguments: &[&str]) -> String {
        let cli = Cli::parse_from(arguments.iter().copied());
        let mut buffer = Vec::new();
        match &cli.command {
            Command::Slice(args) => {
                let slice = matrix.slice(args.plane, args.index).unwrap();
                write_table(&slice, args, &mut buffer).unwrap();
            }
            _ => write_info(matrix, &mut buffer).unwrap(),
        }
        String::from_utf8(buffer).unwrap()
    }

    fn matrix() -> DataMatrix {
        read_scoring_str("# edep\n0,0,0,1\n0,1,0,2\n1,0,0,3\n1,1,0,4\n").unwrap()
    }

    #[test]
    fn info_summary() {
        let text = output_of(&matrix(), &["scoring", "info", "edep.txt"]);
        assert!(text.contains("Shape     : 2 x 2 x 1 (4 cells)"));
        assert!(text.contains("Max value : 4.00000e+00"));
        assert!(text.contains("Reductions: [1, 2] [1, 2] [1]"));
        assert!(text.ends_with("Header    :\n    # edep\n"));
    }

    #[test]
    fn slice_table() {
        let arguments = ["scoring", "slice", "edep.txt", "--digits", "1"];
        let text = output_of(&matrix(), &arguments);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "z=0 plane xy");
        // rows are y, columns are x
        assert!(lines[2].trim_start().starts_with("0"));
        assert!(lines[2].ends_with("1.0   3.0"));
        assert!(lines[3].ends_with("2.0   4.0"));
        assert!(lines[4].starts_with("count = 4"));
    }

    #[test]
    fn missing_file_is_reported() {
        let cli = Cli::parse_from(["scoring", "reduce", "missing.txt", "-f", "2", "2", "2"]);
        let mut buffer = Vec::new();
        assert!(run(&cli.command, false, &mut buffer).is_err());
    }
}
