//! Dense scoring grids and file parsing
#![doc = include_str!("../readme.md")]

// Split into subfiles for development, but anything important is re-exported
mod axis;
mod error;
mod inbox;
mod matrix;
mod reduce;
mod slice;
mod statistics;
mod table;
mod writer;

pub mod reader;

// inline the important modules for a nice public API
#[doc(inline)]
pub use reader::{list_datasets, read_dataset, read_scoring, read_scoring_str, DatasetInfo};

#[doc(inline)]
pub use axis::Axis;

#[doc(inline)]
pub use matrix::DataMatrix;

#[doc(inline)]
pub use slice::SliceView;

#[doc(inline)]
pub use statistics::{stat_number, Histogram, Statistics};

#[doc(inline)]
pub use table::{read_table_csv, Notation, TableFormat};

#[doc(inline)]
pub use writer::{write_json, write_scoring, write_scoring_file};

#[doc(inline)]
pub use inbox::{ArrayMessage, Handler, Inbox, DEFAULT_INTERVAL};

#[doc(inline)]
pub use error::{Error, Result};
