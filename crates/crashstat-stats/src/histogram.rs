use std::ops::Range;

use serde::Serialize;

/// A histogram representation of a dataset's distribution.
///
/// The histogram divides the data range into equal-width bins and counts the
/// frequency of values falling into each bin. Every bin is half-open except
/// the last one, which also contains the maximum value, so the counts always
/// add up to the number of input values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    /// The bins comprising the histogram, in ascending order.
    pub bins: Vec<HistogramBin>,
}

/// A single bin in a histogram.
///
/// Each bin represents a range of values and the count of data points falling within that range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    /// The range of values covered by this bin (inclusive start, exclusive end).
    pub range: Range<f64>,
    /// The number of values that fall within this bin's range.
    pub count: u64,
}

impl HistogramBin {
    /// The midpoint of the bin's range.
    #[must_use]
    pub fn center(&self) -> f64 {
        f64::midpoint(self.range.start, self.range.end)
    }
}

impl Histogram {
    /// Creates a histogram with `num_bins` equal-width bins spanning the data range.
    ///
    /// If all values are identical, the bins span `value - 0.5 .. value + 0.5`.
    /// Non-finite values are ignored.
    ///
    /// # Arguments
    ///
    /// * `values` - The data points to create the histogram from
    /// * `num_bins` - The number of bins to create
    ///
    /// # Returns
    ///
    /// A `Histogram` with bins populated based on the input values. Returns an
    /// empty histogram if there are no finite values or `num_bins` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// # use crashstat_stats::histogram::Histogram;
    /// let values = [5.0, 2.0, 8.0, 1.0, 9.0, 3.0, 7.0, 4.0, 6.0, 10.0];
    /// let histogram = Histogram::new(values, 3);
    /// assert_eq!(histogram.bins.len(), 3);
    /// assert_eq!(histogram.total_count(), 10);
    /// assert_eq!(histogram.bins[0].range, 1.0..4.0);
    /// ```
    #[expect(
        clippy::cast_precision_loss,
        clippy::cast_sign_loss,
        clippy::cast_possible_truncation
    )]
    #[must_use]
    pub fn new<I>(values: I, num_bins: usize) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let values = values
            .into_iter()
            .filter(|v| v.is_finite())
            .collect::<Vec<_>>();
        if values.is_empty() || num_bins == 0 {
            return Self { bins: vec![] };
        }

        let mut min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let mut max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if max - min < f64::EPSILON {
            // Degenerate range: center a unit-wide range on the single value
            min -= 0.5;
            max += 0.5;
        }

        let width = (max - min) / num_bins as f64;
        // Recompute edges from the bin index to avoid floating-point accumulation errors
        let edge = |idx: usize| {
            if idx == num_bins {
                max
            } else {
                min + width * idx as f64
            }
        };
        let mut bins = (0..num_bins)
            .map(|idx| HistogramBin {
                range: edge(idx)..edge(idx + 1),
                count: 0,
            })
            .collect::<Vec<_>>();

        for val in values {
            let idx = (((val - min) / width).floor() as usize).min(num_bins - 1);
            bins[idx].count += 1;
        }

        Self { bins }
    }

    /// The width shared by all bins, or `0.0` for an empty histogram.
    #[must_use]
    pub fn bin_width(&self) -> f64 {
        self.bins
            .first()
            .map_or(0.0, |bin| bin.range.end - bin.range.start)
    }

    /// The total number of values counted.
    #[must_use]
    pub fn total_count(&self) -> u64 {
        self.bins.iter().map(|bin| bin.count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_values() {
        let histogram = Histogram::new(Vec::new(), 10);
        assert!(histogram.bins.is_empty());
        assert_eq!(histogram.bin_width(), 0.0);
        assert_eq!(histogram.total_count(), 0);
    }

    #[test]
    fn test_zero_bins() {
        let histogram = Histogram::new([1.0, 2.0], 0);
        assert!(histogram.bins.is_empty());
    }

    #[test]
    fn test_counts_sum_to_input_len() {
        let values = (0..1000).map(|i| f64::from(i).sqrt()).collect::<Vec<_>>();
        let histogram = Histogram::new(values.iter().copied(), 30);
        assert_eq!(histogram.bins.len(), 30);
        assert_eq!(histogram.total_count(), 1000);
    }

    #[test]
    fn test_max_lands_in_last_bin() {
        let histogram = Histogram::new([0.0, 0.5, 1.0], 2);
        assert_eq!(histogram.bins[0].count, 1);
        assert_eq!(histogram.bins[1].count, 2);
        assert_eq!(histogram.bins[1].range.end, 1.0);
    }

    #[test]
    fn test_bins_are_contiguous_and_equal_width() {
        let histogram = Histogram::new([0.0, 3.0, 7.5, 12.0], 4);
        let width = histogram.bin_width();
        assert!((width - 3.0).abs() < 1e-12);
        for pair in histogram.bins.windows(2) {
            assert_eq!(pair[0].range.end, pair[1].range.start);
        }
        assert_eq!(histogram.bins[0].range.start, 0.0);
        assert_eq!(histogram.bins[3].range.end, 12.0);
    }

    #[test]
    fn test_single_value_gets_unit_range() {
        let histogram = Histogram::new([2.0; 5], 4);
        assert_eq!(histogram.bins[0].range.start, 1.5);
        assert_eq!(histogram.bins[3].range.end, 2.5);
        assert_eq!(histogram.total_count(), 5);
    }

    #[test]
    fn test_non_finite_values_ignored() {
        let histogram = Histogram::new([1.0, f64::NAN, 2.0, f64::INFINITY], 2);
        assert_eq!(histogram.total_count(), 2);
    }

    #[test]
    fn test_bin_center() {
        let bin = HistogramBin {
            range: 1.0..3.0,
            count: 0,
        };
        assert_eq!(bin.center(), 2.0);
    }
}
