//! Two dimensional cross sections of a [DataMatrix]

// crate modules
use crate::axis::Axis;
use crate::error::{Error, Result};
use crate::matrix::DataMatrix;
use crate::statistics::Statistics;

/// A read-only 2D slice of a [DataMatrix]
///
/// One axis is fixed at a given index, and the other two make up a plane. The
/// slice only borrows the matrix, so nothing is copied until values are
/// requested.
///
/// Display coordinates are `(column, row)`, where the column axis is the first
/// letter of the [plane_name()](SliceView::plane_name) and the row axis the
/// second. See [Axis] for the full table.
///
/// ```rust
/// # use scoring_matrix::{Axis, DataMatrix};
/// let matrix = DataMatrix::filled([3, 4, 5], 0.0).unwrap();
/// let slice = matrix.slice(Axis::Z, 2).unwrap();
///
/// assert_eq!(slice.plane_name(), "xy");
/// assert_eq!(slice.shape(), (3, 4));
/// assert_eq!(slice.real_index(1, 2), [1, 2, 2]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SliceView<'a> {
    matrix: &'a DataMatrix,
    axis: Axis,
    index: usize,
}

impl<'a> SliceView<'a> {
    /// Slice of `matrix` with `axis` fixed at `index`
    ///
    /// The index must be inside the extent of the matrix along `axis`.
    pub fn new(matrix: &'a DataMatrix, axis: Axis, index: usize) -> Result<Self> {
        let extent = matrix.extent(axis);
        if index >= extent {
            let mut coordinate = [0; 3];
            coordinate[axis.index()] = index;
            return Err(Error::IndexOutOfBounds {
                index: coordinate,
                shape: matrix.shape(),
            });
        }
        Ok(Self {
            matrix,
            axis,
            index,
        })
    }

    /// Slice of `matrix`, with an out of range index pinned to the last plane
    ///
    /// Handy when swapping in a smaller matrix, for example after a reduction,
    /// while keeping the same plane selected.
    ///
    /// ```rust
    /// # use scoring_matrix::{Axis, DataMatrix};
    /// let matrix = DataMatrix::filled([2, 2, 2], 0.0).unwrap();
    /// let slice = matrix.slice_clamped(Axis::X, 10);
    /// assert_eq!(slice.index(), 1);
    /// ```
    pub fn clamped(matrix: &'a DataMatrix, axis: Axis, index: usize) -> Self {
        // extents are never zero, so the last plane always exists
        let index = index.min(matrix.extent(axis) - 1);
        Self {
            matrix,
            axis,
            index,
        }
    }

    /// The matrix this slice is taken from
    pub fn matrix(&self) -> &'a DataMatrix {
        self.matrix
    }

    /// The fixed axis
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Index of the slice along the fixed axis
    pub fn index(&self) -> usize {
        self.index
    }

    /// Single letter name of the fixed axis
    pub fn axis_name(&self) -> &'static str {
        self.axis.name()
    }

    /// Two letter name of the plane, as (column, row) axes
    pub fn plane_name(&self) -> &'static str {
        self.axis.plane_name()
    }

    /// Number of columns, i.e. the extent of the first plane axis
    pub fn column_count(&self) -> usize {
        self.matrix.extent(self.axis.plane_axes().0)
    }

    /// Number of rows, i.e. the extent of the second plane axis
    pub fn row_count(&self) -> usize {
        self.matrix.extent(self.axis.plane_axes().1)
    }

    /// Shape of the slice as (columns, rows)
    pub fn shape(&self) -> (usize, usize) {
        (self.column_count(), self.row_count())
    }

    /// Coordinate in the source matrix for a (column, row) in the slice
    ///
    /// The slice index is substituted for the fixed axis. No bounds checks are
    /// made here, as the result is checked when used to access the matrix.
    pub fn real_index(&self, column: usize, row: usize) -> [usize; 3] {
        let (column_axis, row_axis) = self.axis.plane_axes();
        let mut coordinate = [0; 3];
        coordinate[self.axis.index()] = self.index;
        coordinate[column_axis.index()] = column;
        coordinate[row_axis.index()] = row;
        coordinate
    }

    /// Raw or relative value at a (column, row) in the slice
    pub fn value(&self, column: usize, row: usize, relative: bool) -> Result<f64> {
        let [x, y, z] = self.real_index(column, row);
        self.matrix.value(x, y, z, relative)
    }

    /// Copy of the slice values, indexed as `data[column][row]`
    ///
    /// ```rust
    /// # use scoring_matrix::{Axis, DataMatrix};
    /// let matrix = DataMatrix::from_fn([2, 3, 1], |x, y, _| (10 * x + y) as f64).unwrap();
    /// let data = matrix.slice(Axis::Z, 0).unwrap().data();
    /// assert_eq!(data, vec![vec![0.0, 1.0, 2.0], vec![10.0, 11.0, 12.0]]);
    /// ```
    pub fn data(&self) -> Vec<Vec<f64>> {
        (0..self.column_count())
            .map(|column| {
                (0..self.row_count())
                    .map(|row| self.cell(column, row))
                    .collect()
            })
            .collect()
    }

    /// Iterate over every raw value in the slice, row by row
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.row_count())
            .flat_map(move |row| (0..self.column_count()).map(move |column| (column, row)))
            .map(move |(column, row)| self.cell(column, row))
    }

    /// Summary statistics of every raw value in the slice
    pub fn statistics(&self) -> Result<Statistics> {
        Statistics::from_values(&self.values().collect::<Vec<f64>>())
    }

    /// Value for a (column, row) known to be inside the slice
    fn cell(&self, column: usize, row: usize) -> f64 {
        let [x, y, z] = self.real_index(column, row);
        // (column, row) come from the slice extents, so always in bounds
        let index = (x * self.matrix.size_y() + y) * self.matrix.size_z() + z;
        self.matrix.values()[index]
    }
}

impl DataMatrix {
    /// Slice with an out of range index pinned to the last plane
    ///
    /// See [SliceView::clamped()].
    pub fn slice_clamped(&self, axis: Axis, index: usize) -> SliceView<'_> {
        SliceView::clamped(self, axis, index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix() -> DataMatrix {
        DataMatrix::from_fn([3, 4, 5], |x, y, z| (100 * x + 10 * y + z) as f64).unwrap()
    }

    #[test]
    fn plane_names() {
        let m = matrix();
        assert_eq!(m.slice(Axis::X, 0).unwrap().plane_name(), "yz");
        assert_eq!(m.slice(Axis::Y, 0).unwrap().plane_name(), "xz");
        assert_eq!(m.slice(Axis::Z, 0).unwrap().plane_name(), "xy");
        assert_eq!(m.slice(Axis::Y, 0).unwrap().axis_name(), "y");
    }

    #[test]
    fn shapes_follow_plane_order() {
        let m = matrix();
        assert_eq!(m.slice(Axis::X, 1).unwrap().shape(), (4, 5));
        assert_eq!(m.slice(Axis::Y, 1).unwrap().shape(), (3, 5));
        assert_eq!(m.slice(Axis::Z, 1).unwrap().shape(), (3, 4));
    }

    #[test]
    fn coordinate_mapping() {
        let m = matrix();
        assert_eq!(m.slice(Axis::X, 2).unwrap().real_index(1, 3), [2, 1, 3]);
        assert_eq!(m.slice(Axis::Y, 2).unwrap().real_index(1, 3), [1, 2, 3]);
        assert_eq!(m.slice(Axis::Z, 2).unwrap().real_index(1, 2), [1, 2, 2]);
    }

    #[test]
    fn values_match_matrix() {
        let m = matrix();
        let slice = m.slice(Axis::Y, 3).unwrap();
        let data = slice.data();
        assert_eq!(data.len(), 3);
        assert_eq!(data[0].len(), 5);
        assert_eq!(data[2][4], 234.0);
        assert_eq!(slice.value(2, 4, false).unwrap(), 234.0);
        assert_eq!(slice.values().count(), 15);
    }

    #[test]
    fn out_of_range_index() {
        let m = matrix();
        assert!(m.slice(Axis::Z, 5).is_err());
        assert_eq!(m.slice_clamped(Axis::Z, 5).index(), 4);
        assert_eq!(m.slice_clamped(Axis::Z, 3).index(), 3);
    }
}
