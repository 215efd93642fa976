use serde::Serialize;

use crate::{StatsError, ensure_count, ensure_finite};

/// Descriptive statistics summarizing a dataset.
///
/// This structure contains common measures of central tendency, dispersion
/// and spread for a dataset of `f64` values. Variance and standard deviation
/// are sample estimates (Bessel's correction, `n - 1` denominator).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DescriptiveStats {
    /// The number of observations.
    pub count: usize,
    /// The minimum value in the dataset.
    pub min: f64,
    /// The maximum value in the dataset.
    pub max: f64,
    /// The arithmetic mean (average) of the dataset.
    pub mean: f64,
    /// The median value of the dataset.
    ///
    /// For an even number of observations this is the average of the two middle values.
    pub median: f64,
    /// The sample variance of the dataset.
    pub variance: f64,
    /// The sample standard deviation of the dataset.
    pub std_dev: f64,
    /// The standard error of the mean (`std_dev / sqrt(count)`).
    pub std_error: f64,
}

impl DescriptiveStats {
    /// The minimum number of observations needed for a sample variance.
    pub const MIN_OBSERVATIONS: usize = 2;

    /// Computes descriptive statistics from unsorted values.
    ///
    /// This method will sort the values internally before computing statistics.
    ///
    /// # Arguments
    ///
    /// * `values` - An iterator over `f64` values. The values will be collected and sorted internally.
    ///
    /// # Errors
    ///
    /// * [`StatsError::TooFewObservations`] - if fewer than two values are given
    /// * [`StatsError::NonFinite`] - if any value is NaN or infinite
    ///
    /// # Examples
    ///
    /// ```
    /// # use crashstat_stats::descriptive::DescriptiveStats;
    /// let values = [5.0, 2.0, 4.0, 1.0, 3.0];
    /// let stats = DescriptiveStats::new(values).unwrap();
    /// assert_eq!(stats.min, 1.0);
    /// assert_eq!(stats.max, 5.0);
    /// assert_eq!(stats.mean, 3.0);
    /// assert_eq!(stats.median, 3.0);
    /// ```
    pub fn new<I>(values: I) -> Result<Self, StatsError>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut values = values.into_iter().collect::<Vec<_>>();
        values.sort_by(f64::total_cmp);
        Self::from_sorted(&values)
    }

    /// Computes descriptive statistics from pre-sorted values.
    ///
    /// This is an optimized version that skips the sorting step.
    /// Use this when you already have sorted data to avoid unnecessary work.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// # use crashstat_stats::descriptive::DescriptiveStats;
    /// let mut values = [4.0, 2.0, 1.0, 3.0];
    /// values.sort_by(f64::total_cmp);
    /// let stats = DescriptiveStats::from_sorted(&values).unwrap();
    /// assert_eq!(stats.median, 2.5);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    pub fn from_sorted(sorted_values: &[f64]) -> Result<Self, StatsError> {
        ensure_finite(sorted_values)?;
        ensure_count(sorted_values, Self::MIN_OBSERVATIONS)?;
        assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );

        let count = sorted_values.len();
        let n = count as f64;
        let min = sorted_values[0];
        let max = sorted_values[count - 1];
        let mean = sorted_values.iter().sum::<f64>() / n;
        let median = if count % 2 == 0 {
            f64::midpoint(sorted_values[count / 2 - 1], sorted_values[count / 2])
        } else {
            sorted_values[count / 2]
        };
        let variance = sorted_values
            .iter()
            .map(|v| (v - mean).powi(2))
            .sum::<f64>()
            / (n - 1.0);
        let std_dev = variance.sqrt();
        let std_error = std_dev / n.sqrt();

        Ok(Self {
            count,
            min,
            max,
            mean,
            median,
            variance,
            std_dev,
            std_error,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn test_sample_variance_uses_bessel_correction() {
        let stats = DescriptiveStats::new([2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert!((stats.mean - 5.0).abs() < EPS);
        // Sum of squared deviations is 32, divided by n - 1 = 7
        assert!((stats.variance - 32.0 / 7.0).abs() < EPS);
        assert!((stats.std_dev - (32.0_f64 / 7.0).sqrt()).abs() < EPS);
    }

    #[test]
    fn test_std_error_is_std_dev_over_sqrt_n() {
        let datasets: [&[f64]; 3] = [
            &[1.0, 2.0, 3.0, 4.0, 5.0],
            &[0.0, 0.0, 0.1, 0.1],
            &[0.01, 0.5, 3.2, 0.0, 0.0, 12.75, 0.3],
        ];
        for values in datasets {
            let stats = DescriptiveStats::new(values.iter().copied()).unwrap();
            #[expect(clippy::cast_precision_loss)]
            let expected = stats.std_dev / (values.len() as f64).sqrt();
            assert!(
                (stats.std_error - expected).abs() < EPS,
                "sem {} != std/sqrt(n) {expected}",
                stats.std_error
            );
        }
    }

    #[test]
    fn test_median_even_and_odd() {
        let odd = DescriptiveStats::new([3.0, 1.0, 2.0]).unwrap();
        assert!((odd.median - 2.0).abs() < EPS);
        let even = DescriptiveStats::new([10.0, 1.0, 3.0, 2.0]).unwrap();
        assert!((even.median - 2.5).abs() < EPS);
    }

    #[test]
    fn test_constant_values_have_zero_spread() {
        let stats = DescriptiveStats::new([7.0; 10]).unwrap();
        assert!(stats.variance.abs() < EPS);
        assert!(stats.std_error.abs() < EPS);
        assert_eq!(stats.min, stats.max);
    }

    #[test]
    fn test_too_few_observations() {
        assert_eq!(
            DescriptiveStats::new(Vec::new()),
            Err(StatsError::TooFewObservations {
                count: 0,
                required: 2
            })
        );
        assert_eq!(
            DescriptiveStats::new([1.0]),
            Err(StatsError::TooFewObservations {
                count: 1,
                required: 2
            })
        );
    }

    #[test]
    fn test_non_finite_rejected() {
        assert_eq!(
            DescriptiveStats::new([1.0, f64::NAN, 2.0]),
            Err(StatsError::NonFinite)
        );
        assert_eq!(
            DescriptiveStats::new([1.0, f64::INFINITY]),
            Err(StatsError::NonFinite)
        );
    }
}
