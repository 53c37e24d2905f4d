// crate modules
use crate::error::{Error, Result};
use crate::matrix::DataMatrix;
use crate::reader::parsers::{self, Record};

// standard library
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

// external crates
use kdam::{Bar, BarBuilder, BarExt};
use log::{debug, warn};

/// A reader for coordinate-tuple scoring files
///
/// Every line of the file is one of:
///
/// - A data line `x,y,z,value` for a single cell of the grid
/// - A comment line starting with `#`, kept verbatim in the header
/// - Anything else, which is ignored
///
/// The extent of each axis is inferred as one more than the largest index
/// found along it. The file is only accepted if it has exactly one record for
/// every cell of that grid, otherwise [Error::IncompleteData] is returned
/// before any dense buffer is allocated.
///
/// Minimal Example:
/// ```rust, no_run
/// # use scoring_matrix::reader::ScoringReader;
/// # use std::path::Path;
/// let path = Path::new("path/to/scoring.txt");
/// let mut reader = ScoringReader::new();
/// let matrix = reader.parse(path).unwrap();
/// ```
#[derive(Debug, Default)]
pub struct ScoringReader {
    /// Disable progress bar?
    disable_progress: bool,
}

// ! ------------------------------------------------------------------------
// !                                Public API
// ! ------------------------------------------------------------------------

impl ScoringReader {
    /// New reader with the progress bar enabled
    pub fn new() -> Self {
        Default::default()
    }

    /// Parse a scoring file into a [DataMatrix]
    ///
    /// The file is read line by line through a buffered stream, and closed
    /// again as soon as the last line is read or any error occurs.
    pub fn parse(&mut self, path: &Path) -> Result<DataMatrix> {
        self.collect_file(path)?.into_matrix()
    }

    /// Parse scoring data already in memory
    ///
    /// ```rust
    /// # use scoring_matrix::reader::ScoringReader;
    /// let text = "# energy deposit\n0,0,0,1.5\n1,0,0,-2.0\n";
    /// let matrix = ScoringReader::new().parse_str(text).unwrap();
    ///
    /// assert_eq!(matrix.shape(), [2, 1, 1]);
    /// assert_eq!(matrix.header(), "# energy deposit\n");
    /// ```
    pub fn parse_str(&mut self, text: &str) -> Result<DataMatrix> {
        let mut data = ScoringData::default();
        for line in text.lines() {
            data.push_line(line);
        }
        data.into_matrix()
    }

    /// Collect the raw records and header of a file without building a grid
    ///
    /// Useful for checking what is wrong with an incomplete file.
    pub fn parse_records(&mut self, path: &Path) -> Result<ScoringData> {
        self.collect_file(path)
    }

    /// Do not print the progress indicators
    pub fn disable_progress(&mut self) {
        self.disable_progress = true;
    }
}

impl ScoringReader {
    /// Main loop over every line of the file
    ///
    /// Lines are split on raw bytes and decoded lossily, so stray non-UTF-8
    /// bytes only affect the line they are on.
    fn collect_file(&self, path: &Path) -> Result<ScoringData> {
        debug!("Reading scoring data from {}", path.display());
        let reader = BufReader::new(File::open(path)?);
        let mut progress_bar = self.init_progress_bar()?;
        let mut data = ScoringData::default();

        if !self.disable_progress {
            progress_bar.refresh()?;
        };

        for bytes in reader.split(b'\n') {
            progress_bar.update(1)?;
            let bytes = bytes?;
            let line = bytes.strip_suffix(b"\r").unwrap_or(&bytes[..]);
            data.push_line(&String::from_utf8_lossy(line));
        }

        // need an extra line for clean spacing if the progress bar is printed
        if !self.disable_progress {
            eprintln!()
        };

        Ok(data)
    }

    /// Initialise the progress bar, if wanted
    fn init_progress_bar(&self) -> Result<Bar> {
        BarBuilder::default()
            .unit(" lines")
            .unit_scale(true)
            .disable(self.disable_progress)
            .bar_format("{count} lines [{rate} lines/s]   ")
            .build()
            .map_err(|e| Error::IOError(std::io::Error::other(e)))
    }
}

/// Records and header of a scoring file, before conversion to a grid
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ScoringData {
    /// Data records in file order
    pub records: Vec<Record>,
    /// Comment lines, each terminated by a newline
    pub header: String,
}

impl ScoringData {
    /// Shape inferred from the largest index along each axis
    ///
    /// Returns `None` if there are no records at all.
    pub fn shape(&self) -> Option<[usize; 3]> {
        if self.records.is_empty() {
            return None;
        }

        let mut shape = [0; 3];
        for record in &self.records {
            for (extent, index) in shape.iter_mut().zip(record.index) {
                *extent = (*extent).max(index.saturating_add(1));
            }
        }
        Some(shape)
    }

    /// Convert the records into a dense [DataMatrix]
    ///
    /// The number of records must equal the number of cells implied by the
    /// [shape()](ScoringData::shape). Records are placed in order, so for
    /// repeated coordinates the last value wins.
    pub fn into_matrix(self) -> Result<DataMatrix> {
        let shape = self.shape().ok_or(Error::EmptyInput)?;
        let found = self.records.len();

        // an overflowing cell count can never be complete
        let expected = shape
            .iter()
            .try_fold(1usize, |acc, n| acc.checked_mul(*n))
            .unwrap_or(usize::MAX);

        if expected != found {
            return Err(Error::IncompleteData { expected, found });
        }

        let [_, ny, nz] = shape;
        let mut values = vec![0.0; expected];
        let mut seen = vec![false; expected];
        let mut duplicates = 0;

        for Record {
            index: [x, y, z],
            value,
        } in self.records
        {
            let i = (x * ny + y) * nz + z;
            if seen[i] {
                duplicates += 1;
            }
            seen[i] = true;
            values[i] = value;
        }

        if duplicates > 0 {
            warn!("Found {duplicates} repeated coordinates, the last value is kept");
            warn!("  - {duplicates} cells have no record and are set to 0.0");
        }

        Ok(DataMatrix::new(shape, values)?.with_header(self.header))
    }

    /// Sort a single line into a record, the header, or nowhere
    fn push_line(&mut self, line: &str) {
        if parsers::is_comment(line) {
            self.header.push_str(line);
            self.header.push('\n');
        } else if let Ok((_, record)) = parsers::data_line(line) {
            self.records.push(record);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(text: &str) -> Result<DataMatrix> {
        ScoringReader::new().parse_str(text)
    }

    #[test]
    fn complete_grid() {
        let matrix = read("0,0,0,1\n1,0,0,2\n").unwrap();
        assert_eq!(matrix.shape(), [2, 1, 1]);
        assert_eq!(matrix.values(), &[1.0, 2.0]);
    }

    #[test]
    fn incomplete_grid() {
        let result = read("1,0,0,2\n");
        assert!(matches!(
            result,
            Err(Error::IncompleteData {
                expected: 2,
                found: 1
            })
        ));
    }

    #[test]
    fn no_data_lines() {
        assert!(matches!(read("# only a comment\n"), Err(Error::EmptyInput)));
        assert!(matches!(read(""), Err(Error::EmptyInput)));
        assert!(matches!(read("0,0,0,nan\n0,0,0,infinity\n"), Err(Error::EmptyInput)));
    }

    #[test]
    fn huge_index_is_incomplete() {
        let result = read("18446744073709551615,2,0,1.0\n");
        assert!(matches!(result, Err(Error::IncompleteData { .. })));
    }

    #[test]
    fn header_and_ignored_lines() {
        let text = "# first\r\nnot data\r\n0,0,0,3.0\r\n# second\r\n";
        let matrix = read(text).unwrap();
        assert_eq!(matrix.header(), "# first\n# second\n");
        assert_eq!(matrix.values(), &[3.0]);
    }

    #[test]
    fn records_out_of_order() {
        let matrix = read("0,1,0,4\n0,0,1,2\n0,1,1,8\n0,0,0,1\n").unwrap();
        assert_eq!(matrix.shape(), [1, 2, 2]);
        assert_eq!(matrix.values(), &[1.0, 2.0, 4.0, 8.0]);
    }

    #[test]
    fn repeated_coordinate_keeps_last() {
        let error = read("0,0,0,1\n0,0,0,5\n").unwrap_err();
        // two records, but only one cell in the implied grid
        assert!(matches!(
            error,
            Error::IncompleteData {
                expected: 1,
                found: 2
            }
        ));

        let matrix = read("1,0,0,1\n1,0,0,5\n").unwrap();
        assert_eq!(matrix.values(), &[0.0, 5.0]);
    }
}
