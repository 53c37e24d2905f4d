//! Library of parser functions

// nom parser combinators
use nom::character::complete::{char, digit1};
use nom::combinator::map_res;
use nom::number::complete::recognize_float;
use nom::sequence::{terminated, tuple};
use nom::IResult;

/// A single `x,y,z,value` data record
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Record {
    /// Grid coordinate as `[x, y, z]`
    pub index: [usize; 3],
    /// Scored value in the cell
    pub value: f64,
}

// ! Boolean checks

/// Check for comment lines, which always start with `#`
pub fn is_comment(i: &str) -> bool {
    i.starts_with('#')
}

// ! Parser combinators

/// Unsigned integer coordinate
fn coordinate(i: &str) -> IResult<&str, usize> {
    map_res(digit1, str::parse::<usize>)(i)
}

/// Decimal value with optional sign and exponent, never `nan` or `inf`
fn decimal(i: &str) -> IResult<&str, f64> {
    map_res(recognize_float, str::parse::<f64>)(i)
}

/// Parse a data record e.g. `3,0,12,-1.5e-03`
///
/// Only the start of the line has to match, and anything after a complete
/// record is left in the remaining input. Coordinates are plain unsigned
/// integers, while the value may be signed and use exponent notation.
pub fn data_line(i: &str) -> IResult<&str, Record> {
    let (i, (x, y, z, value)) = tuple((
        terminated(coordinate, char(',')),
        terminated(coordinate, char(',')),
        terminated(coordinate, char(',')),
        decimal,
    ))(i)?;

    Ok((
        i,
        Record {
            index: [x, y, z],
            value,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_record() {
        let (rest, record) = data_line("1,2,3,4.5").unwrap();
        assert_eq!(rest, "");
        assert_eq!(record.index, [1, 2, 3]);
        assert_eq!(record.value, 4.5);
    }

    #[test]
    fn exponent_and_sign() {
        assert_eq!(data_line("0,0,0,-1.5e-03").unwrap().1.value, -1.5e-3);
        assert_eq!(data_line("0,0,0,2E+2").unwrap().1.value, 200.0);
        assert_eq!(data_line("0,0,0,7").unwrap().1.value, 7.0);
        assert_eq!(data_line("0,0,0,+.5").unwrap().1.value, 0.5);
    }

    #[test]
    fn trailing_text_is_left_over() {
        let (rest, record) = data_line("4,5,6,1.0 extra").unwrap();
        assert_eq!(rest, " extra");
        assert_eq!(record.index, [4, 5, 6]);
    }

    fn is_data_line(i: &str) -> bool {
        data_line(i).is_ok()
    }

    #[test]
    fn rejected_lines() {
        assert!(!is_data_line("# 1,2,3,4"));
        assert!(!is_data_line("1,2,4.0"));
        assert!(!is_data_line("-1,2,3,4.0"));
        assert!(!is_data_line("1, 2, 3, 4.0"));
        assert!(!is_data_line("1,2,3,"));
        assert!(!is_data_line(""));
        assert!(!is_data_line("0,0,0,nan"));
        assert!(!is_data_line("0,0,0,inf"));
        assert!(!is_data_line("0,0,0,-infinity"));
    }

    #[test]
    fn comments() {
        assert!(is_comment("# Geant4 scoring"));
        assert!(is_comment("#"));
        assert!(!is_comment(" # indented"));
    }
}
