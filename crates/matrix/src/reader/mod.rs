//! Parsers and logic for loading scoring data
//!
//! All functions are re-exported to the crate root for easy access.
//!
//! # Quickstart
//!
//! The simplest way to load a scoring file is the convenience function:
//!
//! ```rust, no_run
//! # use scoring_matrix::{read_scoring, DataMatrix};
//! // Read a complete coordinate-tuple file into a DataMatrix
//! let matrix: DataMatrix = read_scoring("/path/to/scoring.txt").unwrap();
//! ```
//!
//! Under the hood this initialises the [ScoringReader]. This is made public for
//! fine control if needed, such as keeping the progress bar.
//!
//! ```rust, no_run
//! # use scoring_matrix::reader::ScoringReader;
//! # use std::path::Path;
//! let mut reader = ScoringReader::new();
//! let matrix = reader.parse(Path::new("/path/to/scoring.txt")).unwrap();
//! ```
//!
//! # File format
//!
//! Scoring files are plain text with one record per cell of a regular grid.
//!
//! ```text
//! # Geant4 scoring output
//! # primitive: eDep
//! 0,0,0,1.2e-03
//! 0,0,1,0.0
//! ...
//! ```
//!
//! - Data lines are `x,y,z,value` with integer indices and a floating point
//!   value, which may be signed and use exponent notation
//! - Lines starting with `#` are collected verbatim into the matrix header
//! - Any other line is silently ignored
//!
//! Records may come in any order, and the size of each axis is one more than
//! the largest index found. Files that do not contain exactly one record per
//! cell are rejected as incomplete.
//!
//! # HDF5 datasets
//!
//! With the `hdf5` feature enabled, arrays of up to three dimensions can also
//! be loaded from HDF5 containers with [read_dataset()], and the available
//! datasets listed with [list_datasets()]. Without the feature, both functions
//! exist but return [Error::FeatureUnavailable](crate::Error::FeatureUnavailable).

// reader modules
#[cfg(feature = "hdf5")]
mod container;
mod parsers;
mod scoring;

// re-exports for clean API + documentation
#[doc(inline)]
pub use parsers::Record;
#[doc(inline)]
pub use scoring::{ScoringData, ScoringReader};

// library imports
#[cfg(not(feature = "hdf5"))]
use crate::error::Error;
use crate::error::Result;
use crate::matrix::DataMatrix;
use std::path::Path;

/// Read a coordinate-tuple scoring file
///
/// Returns a result containing the [DataMatrix] extracted from the file at
/// `path`, with any comment lines kept as the header.
///
/// - `path` - Path to the scoring file, can be [&str], [String], [Path], etc...
///
/// Example
/// ```rust, no_run
/// # use scoring_matrix::{DataMatrix, read_scoring};
/// let matrix: DataMatrix = read_scoring("path/to/scoring.txt").unwrap();
/// println!("{matrix} with maximum {}", matrix.max_value());
/// ```
pub fn read_scoring<P: AsRef<Path>>(path: P) -> Result<DataMatrix> {
    let path: &Path = Path::new(path.as_ref());
    let mut reader = ScoringReader::new();
    reader.disable_progress();
    reader.parse(path)
}

/// Parse coordinate-tuple scoring data from a string
///
/// Example
/// ```rust
/// # use scoring_matrix::read_scoring_str;
/// let matrix = read_scoring_str("0,0,0,1.0\n0,1,0,2.0\n").unwrap();
/// assert_eq!(matrix.shape(), [1, 2, 1]);
/// ```
pub fn read_scoring_str(text: &str) -> Result<DataMatrix> {
    ScoringReader::new().parse_str(text)
}

impl DataMatrix {
    /// Load a coordinate-tuple scoring file, see [read_scoring()]
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<DataMatrix> {
        read_scoring(path)
    }
}

/// Path and shape of a dataset in a hierarchical container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetInfo {
    /// Full slash separated path, e.g. `/run/edep`
    pub path: String,
    /// Extent of every dimension
    pub shape: Vec<usize>,
}

impl std::fmt::Display for DatasetInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} {:?}", self.path, self.shape)
    }
}

/// Read a dataset from an HDF5 file
///
/// The dataset at the slash separated `locator` is read as `f64` values.
/// Arrays with fewer than three dimensions are padded with trailing extents of
/// 1, and anything above three dimensions is an error.
///
/// - `path` - Path to the HDF5 file
/// - `locator` - Dataset path within the file, e.g. `run/edep`
///
/// Example
/// ```rust, no_run
/// # use scoring_matrix::read_dataset;
/// let matrix = read_dataset("path/to/output.h5", "run/edep").unwrap();
/// ```
pub fn read_dataset<P: AsRef<Path>>(path: P, locator: &str) -> Result<DataMatrix> {
    #[cfg(feature = "hdf5")]
    {
        container::read_dataset(path.as_ref(), locator)
    }

    #[cfg(not(feature = "hdf5"))]
    {
        let _ = (path, locator);
        Err(Error::FeatureUnavailable("hdf5".to_string()))
    }
}

/// List every dataset in an HDF5 file
///
/// Returns the full path and shape of each dataset, sorted by path.
///
/// Example
/// ```rust, no_run
/// # use scoring_matrix::list_datasets;
/// for info in list_datasets("path/to/output.h5").unwrap() {
///     println!("{} {:?}", info.path, info.shape);
/// }
/// ```
pub fn list_datasets<P: AsRef<Path>>(path: P) -> Result<Vec<DatasetInfo>> {
    #[cfg(feature = "hdf5")]
    {
        container::list_datasets(path.as_ref())
    }

    #[cfg(not(feature = "hdf5"))]
    {
        let _ = path;
        Err(Error::FeatureUnavailable("hdf5".to_string()))
    }
}
