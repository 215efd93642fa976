use serde::Serialize;

use crate::{StatsError, ensure_count, ensure_finite, percentiles::compute_percentile};

/// Five-number summary with Tukey whiskers, as drawn by a box plot.
///
/// The box spans the first to third quartile. Each whisker extends to the most
/// extreme observation within `whisker_factor × IQR` of the box; observations
/// beyond the whiskers are reported as outliers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxPlotSummary {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub lower_whisker: f64,
    pub upper_whisker: f64,
    /// Observations outside the whiskers, in ascending order.
    pub outliers: Vec<f64>,
}

impl BoxPlotSummary {
    /// Conventional whisker reach, in multiples of the interquartile range.
    pub const DEFAULT_WHISKER_FACTOR: f64 = 1.5;

    /// Computes the summary from unsorted values.
    ///
    /// # Examples
    ///
    /// ```
    /// # use crashstat_stats::boxplot::BoxPlotSummary;
    /// let summary = BoxPlotSummary::new([1.0, 2.0, 3.0, 4.0, 5.0, 100.0], 1.5).unwrap();
    /// assert_eq!(summary.median, 3.5);
    /// assert_eq!(summary.upper_whisker, 5.0);
    /// assert_eq!(summary.outliers, vec![100.0]);
    /// ```
    pub fn new<I>(values: I, whisker_factor: f64) -> Result<Self, StatsError>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut values = values.into_iter().collect::<Vec<_>>();
        values.sort_by(f64::total_cmp);
        Self::from_sorted(&values, whisker_factor)
    }

    /// Computes the summary from values sorted in ascending order.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    pub fn from_sorted(sorted_values: &[f64], whisker_factor: f64) -> Result<Self, StatsError> {
        ensure_finite(sorted_values)?;
        ensure_count(sorted_values, 1)?;
        assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );

        let q1 = compute_percentile(sorted_values, 25.0);
        let median = compute_percentile(sorted_values, 50.0);
        let q3 = compute_percentile(sorted_values, 75.0);
        let reach = whisker_factor * (q3 - q1);
        let low_fence = q1 - reach;
        let high_fence = q3 + reach;

        // The quartiles always lie inside the fences, so both searches find a value
        let lower_whisker = sorted_values
            .iter()
            .copied()
            .find(|&v| v >= low_fence)
            .unwrap_or(q1);
        let upper_whisker = sorted_values
            .iter()
            .rev()
            .copied()
            .find(|&v| v <= high_fence)
            .unwrap_or(q3);
        let outliers = sorted_values
            .iter()
            .copied()
            .filter(|&v| v < low_fence || v > high_fence)
            .collect();

        Ok(Self {
            q1,
            median,
            q3,
            lower_whisker,
            upper_whisker,
            outliers,
        })
    }

    /// The interquartile range.
    #[must_use]
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_outliers_whiskers_at_extremes() {
        let summary = BoxPlotSummary::new([1.0, 2.0, 3.0, 4.0, 5.0], 1.5).unwrap();
        assert_eq!(summary.q1, 2.0);
        assert_eq!(summary.median, 3.0);
        assert_eq!(summary.q3, 4.0);
        assert_eq!(summary.lower_whisker, 1.0);
        assert_eq!(summary.upper_whisker, 5.0);
        assert!(summary.outliers.is_empty());
        assert_eq!(summary.iqr(), 2.0);
    }

    #[test]
    fn test_outliers_on_both_sides() {
        let summary =
            BoxPlotSummary::new([-50.0, 10.0, 11.0, 12.0, 13.0, 14.0, 80.0, 90.0], 1.5).unwrap();
        assert_eq!(summary.outliers, vec![-50.0, 80.0, 90.0]);
        assert_eq!(summary.lower_whisker, 10.0);
        assert_eq!(summary.upper_whisker, 14.0);
    }

    #[test]
    fn test_whiskers_lie_within_data() {
        let values = [0.0, 0.0, 0.0, 0.01, 0.02, 0.1, 0.5, 2.3, 7.9];
        let summary = BoxPlotSummary::new(values, BoxPlotSummary::DEFAULT_WHISKER_FACTOR).unwrap();
        assert!(values.contains(&summary.lower_whisker));
        assert!(values.contains(&summary.upper_whisker));
        assert!(summary.lower_whisker <= summary.q1);
        assert!(summary.q3 <= summary.upper_whisker);
    }

    #[test]
    fn test_single_value() {
        let summary = BoxPlotSummary::new([4.0], 1.5).unwrap();
        assert_eq!(summary.q1, 4.0);
        assert_eq!(summary.upper_whisker, 4.0);
        assert!(summary.outliers.is_empty());
    }

    #[test]
    fn test_empty_is_error() {
        assert_eq!(
            BoxPlotSummary::new(Vec::new(), 1.5),
            Err(StatsError::TooFewObservations {
                count: 0,
                required: 1
            })
        );
    }
}
