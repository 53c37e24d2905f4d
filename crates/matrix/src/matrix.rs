//! Module for the dense scoring grid and its derived values

// crate modules
use crate::axis::Axis;
use crate::error::{Error, Result};
use crate::slice::SliceView;
use crate::statistics::{Histogram, Statistics};

// scoring modules
use scoring_utils::f;

// standard library
use std::ops::{Add, Mul, Sub};
use std::sync::OnceLock;

// external crates
use itertools::iproduct;

/// Dense 3D grid of scoring results
///
/// Every cell of a `(size_x, size_y, size_z)` grid holds one `f64` value. The
/// values are stored in a flat buffer in row-major order, so that `z` changes
/// fastest:
///
/// ```text
/// index = (x * size_y + y) * size_z + z
/// ```
///
/// ## Immutability
///
/// A [DataMatrix] never changes after construction. Arithmetic, reduction and
/// normalisation all produce new instances, which means the derived values
/// below never need to be invalidated.
///
/// ## Derived values
///
/// The maximum absolute value and the relative (normalised) matrix are
/// computed on first request and cached for the lifetime of the matrix.
///
/// - [max_value()](DataMatrix::max_value) is `max(|min|, |max|)`, so that
///   fields with negative values scale symmetrically
/// - [relative()](DataMatrix::relative) is a sibling matrix of
///   `value / max_value`
///
/// ## Examples
///
/// ```rust
/// # use scoring_matrix::DataMatrix;
/// let matrix = DataMatrix::new([2, 1, 1], vec![-10.0, 5.0]).unwrap();
///
/// assert_eq!(matrix.max_value(), 10.0);
/// assert_eq!(matrix.value_at(1, 0, 0).unwrap(), 5.0);
/// assert_eq!(matrix.relative_value_at(0, 0, 0).unwrap(), -1.0);
/// ```
///
/// Matrices of the same shape can be combined, and scaled by any value that
/// converts into an `f64`.
///
/// ```rust
/// # use scoring_matrix::DataMatrix;
/// let a = DataMatrix::filled([2, 2, 1], 1.0).unwrap();
/// let b = DataMatrix::filled([2, 2, 1], 3.0).unwrap();
///
/// let sum = (&a + &b).unwrap();
/// assert_eq!(sum.values(), &[4.0; 4]);
///
/// let scaled = &sum * 0.5;
/// assert_eq!(scaled.values(), &[2.0; 4]);
/// ```
#[derive(Debug, Clone)]
pub struct DataMatrix {
    /// Number of cells along x, y, z
    shape: [usize; 3],
    /// Flat buffer of all cell values
    values: Vec<f64>,
    /// Comment lines from the source file, kept verbatim
    header: String,
    /// Cached maximum absolute value
    max_value: OnceLock<f64>,
    /// Cached normalised matrix
    relative: OnceLock<Box<DataMatrix>>,
}

impl DataMatrix {
    /// Wrap an existing buffer of values as a matrix
    ///
    /// The buffer is moved into the matrix without copying, and must be in
    /// row-major order with exactly one value for every cell. All dimensions
    /// must be at least 1.
    ///
    /// ```rust
    /// # use scoring_matrix::DataMatrix;
    /// let matrix = DataMatrix::new([1, 2, 3], vec![0.0; 6]).unwrap();
    /// assert_eq!(matrix.len(), 6);
    ///
    /// // wrong number of values for the shape
    /// assert!(DataMatrix::new([1, 2, 3], vec![0.0; 5]).is_err());
    /// ```
    pub fn new(shape: [usize; 3], values: Vec<f64>) -> Result<Self> {
        let expected = Self::checked_len(shape)?;
        if values.len() != expected {
            return Err(Error::UnexpectedNumberOfValues {
                shape,
                expected,
                found: values.len(),
            });
        }

        Ok(Self {
            shape,
            values,
            header: String::new(),
            max_value: OnceLock::new(),
            relative: OnceLock::new(),
        })
    }

    /// Build a matrix by evaluating `f(x, y, z)` for every cell
    ///
    /// ```rust
    /// # use scoring_matrix::DataMatrix;
    /// let matrix = DataMatrix::from_fn([2, 3, 4], |x, y, z| (x + y + z) as f64).unwrap();
    /// assert_eq!(matrix.value_at(1, 2, 3).unwrap(), 6.0);
    /// ```
    pub fn from_fn<F>(shape: [usize; 3], mut f: F) -> Result<Self>
    where
        F: FnMut(usize, usize, usize) -> f64,
    {
        Self::checked_len(shape)?;
        let values = iproduct!(0..shape[0], 0..shape[1], 0..shape[2])
            .map(|(x, y, z)| f(x, y, z))
            .collect();
        Self::new(shape, values)
    }

    /// Build a matrix with every cell set to the same value
    pub fn filled(shape: [usize; 3], value: f64) -> Result<Self> {
        let len = Self::checked_len(shape)?;
        Self::new(shape, vec![value; len])
    }

    /// Wrap a buffer with a shape of one to three dimensions
    ///
    /// Missing trailing dimensions are padded with an extent of 1, so a 2D
    /// `(nx, ny)` array becomes `(nx, ny, 1)`. This is the shape of arrays
    /// coming from outside sources, such as HDF5 datasets or network messages.
    ///
    /// ```rust
    /// # use scoring_matrix::DataMatrix;
    /// let matrix = DataMatrix::from_shape_vec(&[2, 3], vec![0.0; 6]).unwrap();
    /// assert_eq!(matrix.shape(), [2, 3, 1]);
    ///
    /// assert!(DataMatrix::from_shape_vec(&[1, 1, 1, 1], vec![0.0]).is_err());
    /// ```
    pub fn from_shape_vec(shape: &[usize], values: Vec<f64>) -> Result<Self> {
        if shape.is_empty() || shape.len() > 3 {
            return Err(Error::UnsupportedDimensions(shape.len()));
        }
        let mut padded = [1; 3];
        padded[..shape.len()].copy_from_slice(shape);
        Self::new(padded, values)
    }

    /// Attach a header, replacing any existing one
    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = header.into();
        self.reset_cache();
        self
    }

    /// Deep copy of the matrix
    ///
    /// Equivalent to `clone()`, spelled out for readability at call sites
    /// that need to be explicit about not sharing any data.
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Number of cells along x, y, and z
    pub fn shape(&self) -> [usize; 3] {
        self.shape
    }

    /// Number of cells along x
    pub fn size_x(&self) -> usize {
        self.shape[0]
    }

    /// Number of cells along y
    pub fn size_y(&self) -> usize {
        self.shape[1]
    }

    /// Number of cells along z
    pub fn size_z(&self) -> usize {
        self.shape[2]
    }

    /// Number of cells along the given axis
    pub fn extent(&self, axis: Axis) -> usize {
        self.shape[axis.index()]
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false, as every dimension is at least 1
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Flat buffer of all values in row-major order
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Take ownership of the flat buffer of values
    pub fn into_values(self) -> Vec<f64> {
        self.values
    }

    /// Comment lines retained from the source, each ending with a newline
    pub fn header(&self) -> &str {
        &self.header
    }

    /// Value of the cell at (x, y, z)
    ///
    /// Coordinates outside of the grid are an error, never a default value.
    ///
    /// ```rust
    /// # use scoring_matrix::DataMatrix;
    /// let matrix = DataMatrix::filled([2, 2, 2], 1.0).unwrap();
    /// assert_eq!(matrix.value_at(1, 1, 1).unwrap(), 1.0);
    /// assert!(matrix.value_at(2, 0, 0).is_err());
    /// ```
    pub fn value_at(&self, x: usize, y: usize, z: usize) -> Result<f64> {
        let index = self.flat_index(x, y, z)?;
        Ok(self.values[index])
    }

    /// Value of the cell at (x, y, z) relative to the maximum absolute value
    ///
    /// The result is in the range [-1, 1]. For a matrix of only zeros the
    /// result is `NaN`.
    ///
    /// ```rust
    /// # use scoring_matrix::DataMatrix;
    /// let matrix = DataMatrix::new([3, 1, 1], vec![2.0, -4.0, 1.0]).unwrap();
    /// assert_eq!(matrix.relative_value_at(0, 0, 0).unwrap(), 0.5);
    ///
    /// let zeros = DataMatrix::filled([3, 1, 1], 0.0).unwrap();
    /// assert!(zeros.relative_value_at(0, 0, 0).unwrap().is_nan());
    /// ```
    pub fn relative_value_at(&self, x: usize, y: usize, z: usize) -> Result<f64> {
        self.relative().value_at(x, y, z)
    }

    /// Either the raw or relative value of a cell
    ///
    /// Useful for display code that toggles between raw and normalised values.
    pub fn value(&self, x: usize, y: usize, z: usize, relative: bool) -> Result<f64> {
        if relative {
            self.relative_value_at(x, y, z)
        } else {
            self.value_at(x, y, z)
        }
    }

    /// Largest absolute value in the matrix
    ///
    /// Computed once as `max(|min|, |max|)` and cached. `NaN` cells are
    /// ignored.
    pub fn max_value(&self) -> f64 {
        *self.max_value.get_or_init(|| {
            self.values
                .iter()
                .fold(0.0_f64, |max, value| max.max(value.abs()))
        })
    }

    /// Matrix of every value divided by the [max_value()](DataMatrix::max_value)
    ///
    /// Computed once and cached. The header is shared with the relative
    /// matrix. Dividing an all-zero matrix gives `NaN` for every cell.
    pub fn relative(&self) -> &DataMatrix {
        self.relative.get_or_init(|| {
            let max_value = self.max_value();
            if max_value == 0.0 {
                log::debug!("{self} contains only zeros, relative values are undefined");
            }
            Box::new(Self {
                shape: self.shape,
                values: self.values.iter().map(|v| v / max_value).collect(),
                header: self.header.clone(),
                max_value: OnceLock::new(),
                relative: OnceLock::new(),
            })
        })
    }

    /// Elementwise sum of two matrices with identical shapes
    ///
    /// The header of `self` is kept.
    pub fn try_add(&self, other: &DataMatrix) -> Result<DataMatrix> {
        self.zip_with(other, |a, b| a + b)
    }

    /// Elementwise difference of two matrices with identical shapes
    ///
    /// The header of `self` is kept.
    pub fn try_sub(&self, other: &DataMatrix) -> Result<DataMatrix> {
        self.zip_with(other, |a, b| a - b)
    }

    /// New matrix with every value multiplied by a constant factor
    ///
    /// ```rust
    /// # use scoring_matrix::DataMatrix;
    /// let matrix = DataMatrix::new([2, 1, 1], vec![12.0, -4.0]).unwrap();
    /// assert_eq!(matrix.scaled(0.5).values(), &[6.0, -2.0]);
    /// ```
    pub fn scaled(&self, factor: f64) -> DataMatrix {
        self.map(|value| value * factor)
    }

    /// New matrix with a function applied to every value
    pub fn map<F>(&self, f: F) -> DataMatrix
    where
        F: Fn(f64) -> f64,
    {
        Self {
            shape: self.shape,
            values: self.values.iter().map(|v| f(*v)).collect(),
            header: self.header.clone(),
            max_value: OnceLock::new(),
            relative: OnceLock::new(),
        }
    }

    /// 2D cross section of the matrix with `axis` fixed at `index`
    ///
    /// See [SliceView] for details.
    pub fn slice(&self, axis: Axis, index: usize) -> Result<SliceView<'_>> {
        SliceView::new(self, axis, index)
    }

    /// Summary statistics over every cell in the matrix
    pub fn statistics(&self) -> Result<Statistics> {
        Statistics::from_values(&self.values)
    }

    /// Histogram of every cell value with `bins` equal width bins
    pub fn histogram(&self, bins: usize) -> Result<Histogram> {
        Histogram::new(&self.values, bins)
    }

    /// Iterate over every ([x, y, z], value) pair in row-major order
    pub fn iter_indexed(&self) -> impl Iterator<Item = ([usize; 3], f64)> + '_ {
        iproduct!(0..self.shape[0], 0..self.shape[1], 0..self.shape[2])
            .zip(self.values.iter())
            .map(|((x, y, z), value)| ([x, y, z], *value))
    }
}

// Crate internals
impl DataMatrix {
    /// Flat buffer index of (x, y, z), checked against the shape
    pub(crate) fn flat_index(&self, x: usize, y: usize, z: usize) -> Result<usize> {
        let [sx, sy, sz] = self.shape;
        if x >= sx || y >= sy || z >= sz {
            return Err(Error::IndexOutOfBounds {
                index: [x, y, z],
                shape: self.shape,
            });
        }
        Ok((x * sy + y) * sz + z)
    }

    /// Number of cells for a shape, rejecting empty and overflowing shapes
    pub(crate) fn checked_len(shape: [usize; 3]) -> Result<usize> {
        if shape.contains(&0) {
            return Err(Error::EmptyInput);
        }
        shape
            .iter()
            .try_fold(1_usize, |acc, n| acc.checked_mul(*n))
            .ok_or_else(|| Error::ParseError(f!("shape {shape:?} is too large")))
    }

    fn zip_with<F>(&self, other: &DataMatrix, f: F) -> Result<DataMatrix>
    where
        F: Fn(f64, f64) -> f64,
    {
        if self.shape != other.shape {
            return Err(Error::ShapeMismatch {
                lhs: self.shape,
                rhs: other.shape,
            });
        }

        let values = self
            .values
            .iter()
            .zip(other.values.iter())
            .map(|(a, b)| f(*a, *b))
            .collect();

        Ok(Self::new(self.shape, values)?.with_header(self.header.clone()))
    }

    fn reset_cache(&mut self) {
        self.max_value = OnceLock::new();
        self.relative = OnceLock::new();
    }
}

impl PartialEq for DataMatrix {
    fn eq(&self, other: &Self) -> bool {
        self.shape == other.shape && self.values == other.values && self.header == other.header
    }
}

impl std::fmt::Display for DataMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let [x, y, z] = self.shape;
        write!(f, "DataMatrix({x}, {y}, {z})")
    }
}

impl Add<&DataMatrix> for &DataMatrix {
    type Output = Result<DataMatrix>;
    fn add(self, rhs: &DataMatrix) -> Self::Output {
        self.try_add(rhs)
    }
}

impl Add<DataMatrix> for DataMatrix {
    type Output = Result<DataMatrix>;
    fn add(self, rhs: DataMatrix) -> Self::Output {
        self.try_add(&rhs)
    }
}

impl Sub<&DataMatrix> for &DataMatrix {
    type Output = Result<DataMatrix>;
    fn sub(self, rhs: &DataMatrix) -> Self::Output {
        self.try_sub(rhs)
    }
}

impl Sub<DataMatrix> for DataMatrix {
    type Output = Result<DataMatrix>;
    fn sub(self, rhs: DataMatrix) -> Self::Output {
        self.try_sub(&rhs)
    }
}

impl<T> Mul<T> for &DataMatrix
where
    T: Into<f64>,
{
    type Output = DataMatrix;
    fn mul(self, rhs: T) -> DataMatrix {
        self.scaled(rhs.into())
    }
}

impl<T> Mul<T> for DataMatrix
where
    T: Into<f64>,
{
    type Output = DataMatrix;
    fn mul(self, rhs: T) -> DataMatrix {
        self.scaled(rhs.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_major_layout() {
        let matrix = DataMatrix::from_fn([2, 3, 4], |x, y, z| (100 * x + 10 * y + z) as f64)
            .unwrap();
        assert_eq!(matrix.values()[0], 0.0);
        assert_eq!(matrix.values()[1], 1.0);
        assert_eq!(matrix.values()[4], 10.0);
        assert_eq!(matrix.values()[12], 100.0);
        assert_eq!(matrix.value_at(1, 2, 3).unwrap(), 123.0);
    }

    #[test]
    fn zero_sized_shape_is_empty_input() {
        assert!(matches!(
            DataMatrix::new([0, 1, 1], vec![]),
            Err(Error::EmptyInput)
        ));
    }

    #[test]
    fn normalisation_is_symmetric() {
        let matrix = DataMatrix::new([3, 1, 1], vec![-10.0, 5.0, 0.0]).unwrap();
        assert_eq!(matrix.max_value(), 10.0);
        assert_eq!(matrix.relative_value_at(0, 0, 0).unwrap(), -1.0);
        assert_eq!(matrix.relative_value_at(1, 0, 0).unwrap(), 0.5);
        assert_eq!(matrix.value(1, 0, 0, true).unwrap(), 0.5);
        assert_eq!(matrix.value(1, 0, 0, false).unwrap(), 5.0);
    }

    #[test]
    fn relative_shares_header() {
        let matrix = DataMatrix::filled([1, 1, 2], 2.0)
            .unwrap()
            .with_header("# test\n");
        assert_eq!(matrix.relative().header(), "# test\n");
        assert_eq!(matrix.relative().values(), &[1.0, 1.0]);
    }

    #[test]
    fn shape_mismatch() {
        let a = DataMatrix::filled([2, 1, 1], 1.0).unwrap();
        let b = DataMatrix::filled([1, 2, 1], 1.0).unwrap();
        assert!(matches!(
            &a - &b,
            Err(Error::ShapeMismatch {
                lhs: [2, 1, 1],
                rhs: [1, 2, 1]
            })
        ));
    }

    #[test]
    fn difference_keeps_left_header() {
        let a = DataMatrix::filled([2, 1, 1], 3.0)
            .unwrap()
            .with_header("# a\n");
        let b = DataMatrix::filled([2, 1, 1], 1.0)
            .unwrap()
            .with_header("# b\n");
        let c = (a - b).unwrap();
        assert_eq!(c.values(), &[2.0, 2.0]);
        assert_eq!(c.header(), "# a\n");
    }

    #[test]
    fn copy_does_not_alias() {
        let a = DataMatrix::filled([2, 1, 1], 3.0).unwrap();
        let b = a.copy();
        assert_eq!(a, b);
        assert_ne!(a.values().as_ptr(), b.values().as_ptr());
    }

    #[test]
    fn indexed_iteration() {
        let matrix = DataMatrix::from_fn([2, 2, 1], |x, y, _| (2 * x + y) as f64).unwrap();
        let cells: Vec<([usize; 3], f64)> = matrix.iter_indexed().collect();
        assert_eq!(
            cells,
            vec![
                ([0, 0, 0], 0.0),
                ([0, 1, 0], 1.0),
                ([1, 0, 0], 2.0),
                ([1, 1, 0], 3.0)
            ]
        );
    }
}
