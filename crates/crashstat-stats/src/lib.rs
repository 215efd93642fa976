//! Statistical routines for the crashstat project.
//!
//! This crate provides the numeric building blocks used by the statistics service:
//!
//! - **Descriptive statistics**: mean, median, sample variance, standard deviation, standard error
//! - **Percentiles**: linearly interpolated quantiles of sorted data
//! - **Histogram generation**: equal-width frequency distributions
//! - **Kernel density estimation**: Gaussian KDE with Scott's bandwidth
//! - **Box plots**: quartiles, Tukey whiskers and outliers
//! - **Inference**: Student-t confidence intervals, one-sample t-tests and
//!   required-sample-size estimates
//!
//! # Modules
//!
//! - [`descriptive`]: Descriptive statistics for summarizing datasets
//! - [`percentiles`]: Percentile computation
//! - [`histogram`]: Histogram construction for visualizing data distributions
//! - [`kde`]: Gaussian kernel density estimation
//! - [`boxplot`]: Five-number summaries with whiskers and outliers
//! - [`inference`]: Confidence intervals, hypothesis tests and sample-size estimation
//!
//! # Examples
//!
//! ## Computing descriptive statistics
//!
//! ```
//! use crashstat_stats::descriptive::DescriptiveStats;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let stats = DescriptiveStats::new(values).unwrap();
//! assert_eq!(stats.mean, 3.0);
//! assert_eq!(stats.variance, 2.5);
//! ```
//!
//! ## Computing a confidence interval
//!
//! ```
//! use crashstat_stats::inference::ConfidenceInterval;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let ci = ConfidenceInterval::for_mean(&values, 0.95).unwrap();
//! assert!(ci.lower < 3.0 && 3.0 < ci.upper);
//! ```
//!
//! ## Running a one-sample t-test
//!
//! ```
//! use crashstat_stats::inference::OneSampleTTest;
//!
//! let values = [0.0, 0.0, 0.1, 0.1];
//! let test = OneSampleTTest::new(&values, 0.05).unwrap();
//! assert!(test.statistic.abs() < 1e-9);
//! assert!((test.p_value - 1.0).abs() < 1e-9);
//! ```

pub mod boxplot;
pub mod descriptive;
pub mod histogram;
pub mod inference;
pub mod kde;
pub mod percentiles;

/// Errors raised by the statistical routines.
#[derive(Debug, Clone, Copy, PartialEq, derive_more::Display, derive_more::Error)]
pub enum StatsError {
    /// Not enough observations for the requested statistic.
    #[display("{count} observation(s) given; at least {required} are required")]
    TooFewObservations { count: usize, required: usize },
    /// The input contains NaN or infinite values.
    #[display("input contains non-finite values")]
    NonFinite,
    /// All observations are identical, so the standard error is zero.
    #[display("standard error is zero; all observations are identical")]
    ZeroStandardError,
    /// A probability or confidence level outside the open interval (0, 1).
    #[display("probability {_0} is outside (0, 1)")]
    InvalidProbability(#[error(not(source))] f64),
    /// A margin of error that is not a positive finite number.
    #[display("margin of error {_0} must be positive and finite")]
    InvalidMargin(#[error(not(source))] f64),
}

pub(crate) fn ensure_finite(values: &[f64]) -> Result<(), StatsError> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(StatsError::NonFinite)
    }
}

pub(crate) fn ensure_count(values: &[f64], required: usize) -> Result<(), StatsError> {
    if values.len() < required {
        return Err(StatsError::TooFewObservations {
            count: values.len(),
            required,
        });
    }
    Ok(())
}
