//! Tabular export of slices and display formatting of values

// crate modules
use crate::error::{Error, Result};
use crate::slice::SliceView;

// scoring modules
use scoring_utils::{f, ValueExt};

// standard library
use std::io::{Read, Write};

/// Notation used when displaying values in a table
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Notation {
    /// Fixed point, e.g. `1234.50000`
    #[default]
    Normal,
    /// Scientific with a signed two digit exponent, e.g. `1.23450e+03`
    Scientific,
}

impl std::str::FromStr for Notation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "normal" | "fixed" => Ok(Self::Normal),
            "scientific" | "sci" => Ok(Self::Scientific),
            _ => Err(Error::ParseError(f!("unknown notation \"{s}\""))),
        }
    }
}

/// Display options for values in a table
///
/// ```rust
/// # use scoring_matrix::{Notation, TableFormat};
/// let format = TableFormat::default();
/// assert_eq!(format.format_value(1234.5), "1234.50000");
///
/// let format = TableFormat {
///     notation: Notation::Scientific,
///     digits: 3,
/// };
/// assert_eq!(format.format_value(1234.5), "1.234e+03");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableFormat {
    /// Fixed or scientific notation
    pub notation: Notation,
    /// Number of digits after the decimal point
    pub digits: usize,
}

impl Default for TableFormat {
    fn default() -> Self {
        Self {
            notation: Notation::Normal,
            digits: 5,
        }
    }
}

impl TableFormat {
    /// Format a single value with these options
    pub fn format_value(&self, value: f64) -> String {
        match self.notation {
            Notation::Normal => f!("{value:.digits$}", digits = self.digits),
            Notation::Scientific => value.sci(self.digits, 2),
        }
    }
}

impl SliceView<'_> {
    /// Write the slice as comma separated text
    ///
    /// Every row is written on its own line with each column value followed
    /// by a comma, so lines end in a trailing comma. Values are written in the
    /// shortest form that parses back to exactly the same number.
    ///
    /// ```rust
    /// # use scoring_matrix::{Axis, DataMatrix};
    /// let matrix = DataMatrix::from_fn([2, 2, 1], |x, y, _| (x + 2 * y) as f64).unwrap();
    /// let slice = matrix.slice(Axis::Z, 0).unwrap();
    ///
    /// let mut buffer = Vec::new();
    /// slice.write_csv(&mut buffer, false).unwrap();
    /// assert_eq!(String::from_utf8(buffer).unwrap(), "0.0,1.0,\n2.0,3.0,\n");
    /// ```
    pub fn write_csv<W: Write>(&self, writer: W, relative: bool) -> Result<()> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .quote_style(csv::QuoteStyle::Never)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(writer);

        for row in 0..self.row_count() {
            let mut record = (0..self.column_count())
                .map(|column| -> Result<String> {
                    Ok(f!("{:?}", self.value(column, row, relative)?))
                })
                .collect::<Result<Vec<String>>>()?;
            // empty final field for the trailing comma
            record.push(String::new());
            writer.write_record(&record)?;
        }

        writer.flush()?;
        Ok(())
    }

    /// All values formatted for display, indexed as `[row][column]`
    pub fn formatted(&self, format: &TableFormat, relative: bool) -> Result<Vec<Vec<String>>> {
        (0..self.row_count())
            .map(|row| {
                (0..self.column_count())
                    .map(|column| -> Result<String> {
                        Ok(format.format_value(self.value(column, row, relative)?))
                    })
                    .collect::<Result<Vec<String>>>()
            })
            .collect()
    }
}

/// Read a table written by [SliceView::write_csv()]
///
/// Returns the values indexed as `[row][column]`. Empty fields, such as the
/// trailing comma on every line, are skipped.
///
/// ```rust
/// # use scoring_matrix::read_table_csv;
/// let table = read_table_csv("1.0,2.0,\n3.0,4.5,\n".as_bytes()).unwrap();
/// assert_eq!(table, vec![vec![1.0, 2.0], vec![3.0, 4.5]]);
/// ```
pub fn read_table_csv<R: Read>(reader: R) -> Result<Vec<Vec<f64>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut table = Vec::new();
    for record in reader.records() {
        let row = record?
            .iter()
            .filter(|field| !field.is_empty())
            .map(|field| {
                field
                    .parse::<f64>()
                    .map_err(|_| Error::ParseError(f!("invalid table value \"{field}\"")))
            })
            .collect::<Result<Vec<f64>>>()?;
        table.push(row);
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Axis, DataMatrix};

    #[test]
    fn notation_names() {
        assert_eq!("normal".parse::<Notation>().unwrap(), Notation::Normal);
        assert_eq!("Scientific".parse::<Notation>().unwrap(), Notation::Scientific);
        assert!("engineering".parse::<Notation>().is_err());
    }

    #[test]
    fn fixed_digits() {
        let format = TableFormat {
            notation: Notation::Normal,
            digits: 2,
        };
        assert_eq!(format.format_value(-0.126), "-0.13");
        assert_eq!(format.format_value(3.0), "3.00");
    }

    #[test]
    fn extreme_values_round_trip() {
        let values = vec![1e-300, -2.5e17, 0.1, 1.0 / 3.0];
        let matrix = DataMatrix::new([4, 1, 1], values.clone()).unwrap();
        let slice = matrix.slice(Axis::Y, 0).unwrap();

        let mut buffer = Vec::new();
        slice.write_csv(&mut buffer, false).unwrap();
        let table = read_table_csv(buffer.as_slice()).unwrap();

        assert_eq!(table, vec![values]);
    }

    #[test]
    fn relative_export() {
        let matrix = DataMatrix::new([2, 1, 1], vec![4.0, -2.0]).unwrap();
        let slice = matrix.slice(Axis::Z, 0).unwrap();

        let mut buffer = Vec::new();
        slice.write_csv(&mut buffer, true).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "1.0,-0.5,\n");
    }

    #[test]
    fn formatted_layout() {
        let matrix = DataMatrix::from_fn([3, 2, 1], |x, y, _| (x + 10 * y) as f64).unwrap();
        let slice = matrix.slice(Axis::Z, 0).unwrap();
        let table = slice
            .formatted(
                &TableFormat {
                    notation: Notation::Normal,
                    digits: 0,
                },
                false,
            )
            .unwrap();
        assert_eq!(table, vec![vec!["0", "1", "2"], vec!["10", "11", "12"]]);
    }

    #[test]
    fn invalid_table_value() {
        assert!(read_table_csv("1.0,abc,\n".as_bytes()).is_err());
    }
}
