//! Block reduction of a [DataMatrix] into coarser voxels

// crate modules
use crate::axis::Axis;
use crate::error::{Error, Result};
use crate::matrix::DataMatrix;

// external crates
use log::debug;

impl DataMatrix {
    /// Possible reduction factors along each axis
    ///
    /// A factor is allowed when it divides the extent of the axis exactly, so
    /// these are just the integer divisors of `size_x`, `size_y`, and `size_z`
    /// in ascending order.
    ///
    /// ```rust
    /// # use scoring_matrix::DataMatrix;
    /// let matrix = DataMatrix::filled([6, 5, 1], 0.0).unwrap();
    /// let [x, y, z] = matrix.allowed_reductions();
    /// assert_eq!(x, vec![1, 2, 3, 6]);
    /// assert_eq!(y, vec![1, 5]);
    /// assert_eq!(z, vec![1]);
    /// ```
    pub fn allowed_reductions(&self) -> [Vec<usize>; 3] {
        self.shape().map(divisors)
    }

    /// New matrix with every `rx × ry × rz` box summed into a single cell
    ///
    /// Each axis is partitioned into contiguous blocks of the given size and
    /// every output cell is the *sum* of the source cells in its block, not
    /// the average.
    ///
    /// Every factor must be one of the [allowed_reductions()](DataMatrix::allowed_reductions)
    /// for its axis. The header is carried over unchanged.
    ///
    /// ```rust
    /// # use scoring_matrix::DataMatrix;
    /// let matrix = DataMatrix::filled([2, 2, 1], 1.0).unwrap();
    /// let reduced = matrix.reduced([2, 2, 1]).unwrap();
    ///
    /// assert_eq!(reduced.shape(), [1, 1, 1]);
    /// assert_eq!(reduced.value_at(0, 0, 0).unwrap(), 4.0);
    ///
    /// // 2 does not divide an extent of 5
    /// let matrix = DataMatrix::filled([5, 1, 1], 1.0).unwrap();
    /// assert!(matrix.reduced([2, 1, 1]).is_err());
    /// ```
    pub fn reduced(&self, factors: [usize; 3]) -> Result<DataMatrix> {
        self.check_reduction(factors)?;

        let shape = self.shape();
        let [rx, ry, rz] = factors;
        let reduced_shape = [shape[0] / rx, shape[1] / ry, shape[2] / rz];
        let [_, ny, nz] = reduced_shape;
        debug!("Reducing {self} by {factors:?} to {reduced_shape:?}");

        // every source cell is visited once and added to its block
        let mut values = vec![0.0; reduced_shape.iter().product()];
        for ([x, y, z], value) in self.iter_indexed() {
            let index = ((x / rx) * ny + (y / ry)) * nz + (z / rz);
            values[index] += value;
        }

        Ok(DataMatrix::new(reduced_shape, values)?.with_header(self.header()))
    }

    /// Make sure every factor divides the extent of its axis
    fn check_reduction(&self, factors: [usize; 3]) -> Result<()> {
        for axis in Axis::ALL {
            let factor = factors[axis.index()];
            let size = self.extent(axis);
            if factor == 0 || size % factor != 0 {
                return Err(Error::InvalidReduction { axis, factor, size });
            }
        }
        Ok(())
    }
}

/// All integer divisors of `n` in ascending order
fn divisors(n: usize) -> Vec<usize> {
    (1..=n).filter(|i| n % i == 0).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_sums() {
        // value encodes the coordinate so every block sum is unique
        let matrix = DataMatrix::from_fn([6, 4, 2], |x, y, z| (100 * x + 10 * y + z) as f64)
            .unwrap();
        let reduced = matrix.reduced([2, 2, 1]).unwrap();
        assert_eq!(reduced.shape(), [3, 2, 2]);

        for (x, y, z) in itertools::iproduct!(0..3, 0..2, 0..2) {
            let mut expected = 0.0;
            for (i, j) in itertools::iproduct!(0..2, 0..2) {
                expected += matrix.value_at(2 * x + i, 2 * y + j, z).unwrap();
            }
            assert_eq!(reduced.value_at(x, y, z).unwrap(), expected);
        }
    }

    #[test]
    fn identity_reduction() {
        let matrix = DataMatrix::from_fn([3, 2, 1], |x, y, _| (x * y) as f64)
            .unwrap()
            .with_header("# kept\n");
        assert_eq!(matrix.reduced([1, 1, 1]).unwrap(), matrix);
    }

    #[test]
    fn full_reduction_is_total() {
        let matrix = DataMatrix::from_fn([4, 3, 2], |x, y, z| (x + y + z) as f64).unwrap();
        let total: f64 = matrix.values().iter().sum();
        let reduced = matrix.reduced([4, 3, 2]).unwrap();
        assert_eq!(reduced.values(), &[total]);
    }

    #[test]
    fn invalid_factors() {
        let matrix = DataMatrix::filled([5, 1, 1], 1.0).unwrap();
        assert!(matches!(
            matrix.reduced([2, 1, 1]),
            Err(Error::InvalidReduction {
                axis: Axis::X,
                factor: 2,
                size: 5
            })
        ));
        assert!(matrix.reduced([0, 1, 1]).is_err());
        assert!(matrix.reduced([5, 1, 1]).is_ok());
        assert!(matrix.reduced([1, 1, 1]).is_ok());
    }

    #[test]
    fn divisors_of_twelve() {
        assert_eq!(divisors(12), vec![1, 2, 3, 4, 6, 12]);
        assert_eq!(divisors(1), vec![1]);
    }
}
