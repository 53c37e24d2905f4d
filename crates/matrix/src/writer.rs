//! Write operations for scoring data

// standard library
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

// crate modules
use crate::error::Result;
use crate::inbox::ArrayMessage;
use crate::matrix::DataMatrix;

/// Write a [DataMatrix] as coordinate-tuple text
///
/// The header is written verbatim, followed by one `x,y,z,value` line for
/// every cell in row-major order. Values are written in their shortest form
/// that parses back exactly, so reading the output again with
/// [read_scoring()](crate::read_scoring) reproduces the matrix.
///
/// ```rust
/// # use scoring_matrix::{write_scoring, DataMatrix};
/// let matrix = DataMatrix::new([2, 1, 1], vec![1.5, -2.0])
///     .unwrap()
///     .with_header("# edep\n");
///
/// let mut buffer = Vec::new();
/// write_scoring(&matrix, &mut buffer).unwrap();
///
/// let text = String::from_utf8(buffer).unwrap();
/// assert_eq!(text, "# edep\n0,0,0,1.5\n1,0,0,-2.0\n");
/// ```
pub fn write_scoring<W: Write>(matrix: &DataMatrix, mut writer: W) -> Result<()> {
    let header = matrix.header();
    write!(writer, "{header}")?;
    if !header.is_empty() && !header.ends_with('\n') {
        writeln!(writer)?;
    }

    for ([x, y, z], value) in matrix.iter_indexed() {
        writeln!(writer, "{x},{y},{z},{value:?}")?;
    }

    writer.flush()?;
    Ok(())
}

/// Write a [DataMatrix] to a coordinate-tuple text file
///
/// See [write_scoring()] for details.
///
/// ```rust, no_run
/// # use scoring_matrix::{read_scoring, write_scoring_file};
/// let matrix = read_scoring("path/to/scoring.txt").unwrap();
/// let reduced = matrix.reduced([2, 2, 1]).unwrap();
/// write_scoring_file(&reduced, "path/to/reduced.txt").unwrap();
/// ```
pub fn write_scoring_file<P: AsRef<Path>>(matrix: &DataMatrix, path: P) -> Result<()> {
    write_scoring(matrix, init_writer(path)?)
}

/// Write a [DataMatrix] to a JSON file as a named array
///
/// The layout is the same as an [ArrayMessage], so the file can be sent
/// straight to an [Inbox](crate::Inbox).
pub fn write_json<P: AsRef<Path>>(matrix: &DataMatrix, name: &str, path: P) -> Result<()> {
    let writer = init_writer(path)?;
    serde_json::to_writer(writer, &ArrayMessage::from_matrix(name, matrix))?;
    Ok(())
}

/// Initialise a writer from anything that can be turned into a path
fn init_writer<P: AsRef<Path>>(path: P) -> Result<BufWriter<File>> {
    let file = File::create(path)?;
    Ok(BufWriter::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::read_scoring_str;

    #[test]
    fn written_text_reads_back() {
        let matrix = DataMatrix::from_fn([3, 2, 2], |x, y, z| {
            (x as f64 - 1.0) * 1e-7 + (y * z) as f64 / 3.0
        })
        .unwrap()
        .with_header("# first\n# second\n");

        let mut buffer = Vec::new();
        write_scoring(&matrix, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert_eq!(read_scoring_str(&text).unwrap(), matrix);
    }

    #[test]
    fn header_gets_line_ending() {
        let matrix = DataMatrix::filled([1, 1, 1], 0.0)
            .unwrap()
            .with_header("# no newline");

        let mut buffer = Vec::new();
        write_scoring(&matrix, &mut buffer).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "# no newline\n0,0,0,0.0\n");
    }
}
