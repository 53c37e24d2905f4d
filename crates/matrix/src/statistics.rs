//! Summary statistics and histograms of scoring values

// crate modules
use crate::error::Result;

// scoring modules
use scoring_utils::{f, SliceExt, ValueExt};

/// Summary of a selection of values
///
/// The `count` and `total` always exist. The remaining values only make sense
/// for more than one value and are `None` otherwise, with the standard
/// deviation being the sample standard deviation (`n - 1`).
///
/// ```rust
/// # use scoring_matrix::Statistics;
/// let stats = Statistics::from_values(&[1.0, 2.0, 3.0, 4.0]).unwrap();
///
/// assert_eq!(stats.count, 4);
/// assert_eq!(stats.total, 10.0);
/// assert_eq!(stats.mean, Some(2.5));
/// assert_eq!(stats.min, Some(1.0));
/// assert_eq!(stats.max, Some(4.0));
///
/// // single values only have a count and total
/// let stats = Statistics::from_values(&[7.0]).unwrap();
/// assert_eq!(stats.mean, None);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Statistics {
    /// Number of values
    pub count: usize,
    /// Sum of all values
    pub total: f64,
    /// Smallest value
    pub min: Option<f64>,
    /// Arithmetic mean
    pub mean: Option<f64>,
    /// Largest value
    pub max: Option<f64>,
    /// Sample standard deviation
    pub stdev: Option<f64>,
}

impl Statistics {
    /// Summarise a slice of values
    ///
    /// An empty slice is valid and has a count and total of zero. Values that
    /// are `NaN` or infinite are an error for selections of more than one.
    pub fn from_values(values: &[f64]) -> Result<Self> {
        let count = values.len();
        let total = values.iter().sum::<f64>();

        if count < 2 {
            return Ok(Self {
                count,
                total,
                ..Default::default()
            });
        }

        let mean = total / count as f64;
        let sum_square = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>();

        Ok(Self {
            count,
            total,
            min: Some(values.try_min()?),
            mean: Some(mean),
            max: Some(values.try_max()?),
            stdev: Some((sum_square / (count - 1) as f64).sqrt()),
        })
    }
}

impl std::fmt::Display for Statistics {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut s = f!("count = {}, total = {}", self.count, stat_number(self.total));
        let fields = [
            ("min", self.min),
            ("mean", self.mean),
            ("max", self.max),
            ("stdev", self.stdev),
        ];
        for (name, value) in fields {
            if let Some(value) = value {
                s += &f!(", {name} = {}", stat_number(value));
            }
        }
        write!(f, "{s}")
    }
}

/// Format a number with a precision that depends on its magnitude
///
/// ```rust
/// # use scoring_matrix::stat_number;
/// assert_eq!(stat_number(123.456), "123.5");
/// assert_eq!(stat_number(2.3456), "2.35");
/// assert_eq!(stat_number(0.23456), "0.235");
/// assert_eq!(stat_number(0.023456), "0.0235");
/// assert_eq!(stat_number(0.0023456), "2.346e-03");
/// ```
pub fn stat_number(number: f64) -> String {
    if number > 10.0 {
        f!("{number:.1}")
    } else if number > 1.0 {
        f!("{number:.2}")
    } else if number > 0.1 {
        f!("{number:.3}")
    } else if number > 0.01 {
        f!("{number:.4}")
    } else {
        number.sci(3, 2)
    }
}

/// Frequency of values in equal width bins
///
/// Bins span the range from the smallest to the largest value. Every bin
/// includes its lower edge, and the last bin also includes its upper edge so
/// that the maximum is counted.
///
/// If every value is the same, the range is widened to half a unit either
/// side of that value.
///
/// ```rust
/// # use scoring_matrix::Histogram;
/// let histogram = Histogram::new(&[0.0, 1.0, 1.0, 2.0, 4.0], 4).unwrap();
///
/// assert_eq!(histogram.edges, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
/// assert_eq!(histogram.counts, vec![1, 2, 1, 1]);
/// assert_eq!(histogram.bin_width(), 1.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// Bin edges, one more than the number of bins
    pub edges: Vec<f64>,
    /// Number of values in each bin
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Count `values` into `bins` equal width bins
    ///
    /// Fails for empty slices or undefined values. Asking for zero bins gives
    /// a single bin.
    pub fn new(values: &[f64], bins: usize) -> Result<Self> {
        let bins = bins.max(1);
        let (mut low, mut high) = (values.try_min()?, values.try_max()?);
        if low == high {
            low -= 0.5;
            high += 0.5;
        }

        // divided first, the full range may not fit in an f64
        let width = high / bins as f64 - low / bins as f64;
        let mut edges = (0..bins)
            .map(|i| low + i as f64 * width)
            .collect::<Vec<f64>>();
        edges.push(high);

        let mut counts = vec![0; bins];
        for value in values {
            counts[edges.find_bin_exclusive(*value)?] += 1;
        }

        Ok(Self { edges, counts })
    }

    /// Width of every bin
    pub fn bin_width(&self) -> f64 {
        match (self.edges.first(), self.edges.last()) {
            (Some(low), Some(high)) if !self.counts.is_empty() => {
                let bins = self.counts.len() as f64;
                high / bins - low / bins
            }
            _ => 0.0,
        }
    }

    /// Pairs of (lower edge, count) for every bin
    pub fn bins(&self) -> impl Iterator<Item = (f64, usize)> + '_ {
        self.edges.iter().copied().zip(self.counts.iter().copied())
    }
}

impl std::fmt::Display for Histogram {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let widest = self.counts.iter().copied().max().unwrap_or(0).max(1);
        for (edges, count) in self.edges.windows(2).zip(&self.counts) {
            let bar = "#".repeat(count * 40 / widest);
            writeln!(
                f,
                "{:>12} - {:>12} {:>8} {}",
                edges[0].sci(3, 2),
                edges[1].sci(3, 2),
                count,
                bar
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_standard_deviation() {
        let stats = Statistics::from_values(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        let stdev = stats.stdev.unwrap();
        assert!((stdev - 2.138089935299395).abs() < 1e-12);
    }

    #[test]
    fn empty_selection() {
        let stats = Statistics::from_values(&[]).unwrap();
        assert_eq!(stats.count, 0);
        assert_eq!(stats.total, 0.0);
        assert_eq!(stats.to_string(), "count = 0, total = 0.000e+00");
    }

    #[test]
    fn status_text() {
        let stats = Statistics::from_values(&[1.5, 2.5]).unwrap();
        assert_eq!(
            stats.to_string(),
            "count = 2, total = 4.00, min = 1.50, mean = 2.00, max = 2.50, stdev = 0.707"
        );
    }

    #[test]
    fn constant_values_widen_range() {
        let histogram = Histogram::new(&[3.0, 3.0, 3.0], 2).unwrap();
        assert_eq!(histogram.edges, vec![2.5, 3.0, 3.5]);
        assert_eq!(histogram.counts, vec![0, 3]);
    }

    #[test]
    fn histogram_needs_values() {
        assert!(Histogram::new(&[], 10).is_err());
        assert!(Histogram::new(&[1.0, f64::NAN], 10).is_err());
    }

    #[test]
    fn range_wider_than_f64() {
        let histogram = Histogram::new(&[-1e308, 1e308], 4).unwrap();
        assert_eq!(histogram.counts, vec![1, 0, 0, 1]);
        assert_eq!(histogram.edges[0], -1e308);
        assert_eq!(histogram.edges[2], 0.0);
        assert_eq!(histogram.edges[4], 1e308);
        assert!(histogram.bin_width().is_finite());
    }

    #[test]
    fn display_with_missing_edges() {
        let histogram = Histogram {
            edges: vec![0.0, 1.0],
            counts: vec![3, 4, 5],
        };
        let text = histogram.to_string();
        assert_eq!(text.lines().count(), 1);
        assert!(text.contains("       3 "));
    }

    #[test]
    fn every_value_is_counted() {
        let values = (0..1000).map(|i| (i as f64 * 0.37).sin()).collect::<Vec<f64>>();
        let histogram = Histogram::new(&values, 100).unwrap();
        assert_eq!(histogram.counts.iter().sum::<usize>(), 1000);
        assert_eq!(histogram.edges.len(), 101);
    }
}
