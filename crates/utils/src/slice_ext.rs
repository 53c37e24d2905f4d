use crate::error::{Error, Result};

/// Extends functionality for slices of float arrays
pub trait SliceExt<T> {
    /// Find the minimum value in float arrays
    ///
    /// Only provides the minimum value from a collection of valid numbers. Any
    /// NAN values, infinite values, or empty slices will return an error.
    ///
    /// ```rust
    /// # use scoring_utils::SliceExt;
    /// # use scoring_utils::Error;
    /// // Successful cases
    /// assert_eq!([1.1, 0.5, 2.2].try_min(), Ok(0.5));
    /// assert_eq!([1.1, f64::MIN, 2.2].try_min(), Ok(f64::MIN));
    ///
    /// // Error cases
    /// assert_eq!([1.1, f64::NAN, 2.2].try_min(), Err(Error::SliceContainsUndefinedValues));
    /// assert_eq!([1.1, f64::INFINITY, 2.2].try_min(), Err(Error::SliceContainsUndefinedValues));
    /// assert_eq!(Vec::<f64>::new().try_min(), Err(Error::SliceContainsNoValues));
    /// ```
    ///
    /// The float primitives do not implement `Ord` due to `NaN` being
    /// incomparable, so `total_cmp` is used to always produce an ordering.
    fn try_min(&self) -> Result<T>;

    /// Find the maximum value in float arrays
    ///
    /// Only provides the maximum value from a collection of valid numbers. Any
    /// NAN values, infinite values, or empty slices will return an error.
    ///
    /// ```rust
    /// # use scoring_utils::SliceExt;
    /// # use scoring_utils::Error;
    /// // Successful cases
    /// assert_eq!([1.1, 0.5, 2.2].try_max(), Ok(2.2));
    /// assert_eq!([-4.0, -8.0].try_max(), Ok(-4.0));
    ///
    /// // Error cases
    /// assert_eq!([1.1, f64::NAN, 2.2].try_max(), Err(Error::SliceContainsUndefinedValues));
    /// assert_eq!(Vec::<f64>::new().try_max(), Err(Error::SliceContainsNoValues));
    /// ```
    fn try_max(&self) -> Result<T>;

    /// Find index bin containing 'value', where bins are low <= value < high
    ///
    /// A value on a bin edge returns the bin above. Values equal to the highest
    /// bound are considered part of the last bin, which is how histogram bins
    /// are usually closed.
    ///
    /// ```text
    ///     edges: 0.0 1.0 2.0 4.0
    ///
    ///     0.0 <= bin 0 < 1.0
    ///     1.0 <= bin 1 < 2.0
    ///     2.0 <= bin 2 <= 4.0
    /// ```
    ///
    /// ```rust
    /// # use scoring_utils::SliceExt;
    /// let edges = vec![0.0, 1.0, 2.0, 4.0];
    ///
    /// // Find values in the array
    /// assert_eq!(edges.find_bin_exclusive(0.0), Ok(0));
    /// assert_eq!(edges.find_bin_exclusive(0.5), Ok(0));
    /// assert_eq!(edges.find_bin_exclusive(1.0), Ok(1));
    /// assert_eq!(edges.find_bin_exclusive(4.0), Ok(2));
    ///
    /// // Values outside the bin bounds are an error case
    /// assert!(edges.find_bin_exclusive(-1.0).is_err());
    /// assert!(edges.find_bin_exclusive(4.1).is_err());
    /// ```
    fn find_bin_exclusive(&self, value: T) -> Result<usize>;
}

impl SliceExt<f64> for [f64] {
    fn try_min(&self) -> Result<f64> {
        if self.iter().any(|v| !v.is_finite()) {
            return Err(Error::SliceContainsUndefinedValues);
        };

        self.iter()
            .min_by(|a, b| a.total_cmp(b))
            .copied()
            .ok_or(Error::SliceContainsNoValues)
    }

    fn try_max(&self) -> Result<f64> {
        if self.iter().any(|v| !v.is_finite()) {
            return Err(Error::SliceContainsUndefinedValues);
        };

        self.iter()
            .max_by(|a, b| a.total_cmp(b))
            .copied()
            .ok_or(Error::SliceContainsNoValues)
    }

    fn find_bin_exclusive(&self, value: f64) -> Result<usize> {
        // make sure there are bin edges to check against
        let n = self.len();
        if n < 2 {
            return Err(Error::BelowMinimumSliceLength {
                length: n,
                minimum_required: 2,
            });
        }

        let lower_bound = self[0];
        let upper_bound = self[n - 1];

        if value < lower_bound || value > upper_bound {
            return Err(Error::ValueOutsideOfBounds {
                value,
                lower_bound,
                upper_bound,
            });
        }

        // special case for being on the upper edge
        if value == upper_bound {
            return Ok(n - 2);
        }

        // edges are ascending, so the first edge above the value closes the bin
        match self.partition_point(|edge| *edge <= value) {
            0 => Err(Error::UncapturedErrorCondition),
            idx => Ok(idx - 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bins_on_inner_edges() {
        let edges = [-1.0, 0.0, 1.0];
        assert_eq!(edges.find_bin_exclusive(-1.0), Ok(0));
        assert_eq!(edges.find_bin_exclusive(-0.5), Ok(0));
        assert_eq!(edges.find_bin_exclusive(0.0), Ok(1));
        assert_eq!(edges.find_bin_exclusive(1.0), Ok(1));
    }

    #[test]
    fn too_few_edges() {
        assert_eq!(
            [1.0].find_bin_exclusive(1.0),
            Err(Error::BelowMinimumSliceLength {
                length: 1,
                minimum_required: 2
            })
        );
    }

    #[test]
    fn extremes_of_negative_values() {
        let values = [-10.0, 5.0, -3.0];
        assert_eq!(values.try_min(), Ok(-10.0));
        assert_eq!(values.try_max(), Ok(5.0));
    }
}
