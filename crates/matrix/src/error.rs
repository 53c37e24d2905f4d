//! Result and Error types for scoring-matrix

use crate::axis::Axis;

/// Type alias for Result<T, matrix::Error>
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for the `scoring-matrix` crate
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("failed input/output stream")]
    IOError(#[from] std::io::Error),

    #[error("failed csv operation")]
    CsvError(#[from] csv::Error),

    #[error("failed serde JSON operation")]
    JSONError(#[from] serde_json::Error),

    #[cfg(feature = "hdf5")]
    #[error("hdf5 error")]
    Hdf5Error(#[from] hdf5::Error),

    #[error("parser failed: {0}")]
    ParseError(String),

    #[error("no data lines found")]
    EmptyInput,

    #[error("incomplete scoring data (expected {expected:?} data lines, found {found:?})")]
    IncompleteData { expected: usize, found: usize },

    #[error("inconsistent number of values for shape {shape:?} (expected {expected:?}, found {found:?})")]
    UnexpectedNumberOfValues {
        shape: [usize; 3],
        expected: usize,
        found: usize,
    },

    #[error("shapes do not match ({lhs:?} and {rhs:?})")]
    ShapeMismatch { lhs: [usize; 3], rhs: [usize; 3] },

    #[error("reduction by {factor} is not a divisor of the {axis} extent {size}")]
    InvalidReduction {
        axis: Axis,
        factor: usize,
        size: usize,
    },

    #[error("index {index:?} is outside of shape {shape:?}")]
    IndexOutOfBounds { index: [usize; 3], shape: [usize; 3] },

    #[error("failed to infer axis or plane from \"{0}\"")]
    UnknownAxis(String),

    #[error("arrays with {0} dimensions are not supported")]
    UnsupportedDimensions(usize),

    #[error("dataset \"{0}\" not found")]
    DatasetNotFound(String),

    #[error("\"{0}\" support is not enabled in this build")]
    FeatureUnavailable(String),

    #[error("failed to compute statistics")]
    StatisticsError(#[from] scoring_utils::Error),
}
