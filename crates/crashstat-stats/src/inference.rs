//! Inference about a population mean.
//!
//! All routines use the Student-t distribution with `n - 1` degrees of freedom
//! for statements about the mean, and the standard normal distribution for the
//! a-priori sample-size calculation.

use serde::Serialize;
use statrs::distribution::{ContinuousCDF as _, Normal, StudentsT};

use crate::{StatsError, descriptive::DescriptiveStats};

fn ensure_probability(p: f64) -> Result<(), StatsError> {
    if p > 0.0 && p < 1.0 {
        Ok(())
    } else {
        Err(StatsError::InvalidProbability(p))
    }
}

/// Standard Student-t distribution for a sample of `degrees_of_freedom + 1` observations.
fn students_t(degrees_of_freedom: usize) -> Result<StudentsT, StatsError> {
    let too_few = StatsError::TooFewObservations {
        count: degrees_of_freedom + 1,
        required: 2,
    };
    if degrees_of_freedom == 0 {
        return Err(too_few);
    }
    #[expect(clippy::cast_precision_loss)]
    let freedom = degrees_of_freedom as f64;
    StudentsT::new(0.0, 1.0, freedom).map_err(|_| too_few)
}

/// Two-tailed Student-t critical value for the given confidence `level`.
///
/// Returns the quantile `t(1 - (1 - level) / 2, df)`.
///
/// # Examples
///
/// ```
/// # use crashstat_stats::inference::t_critical;
/// let t = t_critical(0.95, 4).unwrap();
/// assert!((t - 2.776_445).abs() < 1e-5);
/// ```
pub fn t_critical(level: f64, degrees_of_freedom: usize) -> Result<f64, StatsError> {
    ensure_probability(level)?;
    let dist = students_t(degrees_of_freedom)?;
    Ok(dist.inverse_cdf(f64::midpoint(1.0, level)))
}

/// Two-tailed standard-normal critical value for the given confidence `level`.
///
/// # Examples
///
/// ```
/// # use crashstat_stats::inference::z_critical;
/// let z = z_critical(0.90).unwrap();
/// assert!((z - 1.644_854).abs() < 1e-5);
/// ```
pub fn z_critical(level: f64) -> Result<f64, StatsError> {
    ensure_probability(level)?;
    Ok(Normal::standard().inverse_cdf(f64::midpoint(1.0, level)))
}

/// A two-sided confidence interval for a population mean.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfidenceInterval {
    /// Confidence level, e.g. `0.95`.
    pub level: f64,
    /// Sample mean at the center of the interval.
    pub mean: f64,
    /// Half-width of the interval.
    pub margin: f64,
    pub lower: f64,
    pub upper: f64,
}

impl ConfidenceInterval {
    /// Student-t interval for the mean of `values`.
    ///
    /// # Errors
    ///
    /// * [`StatsError::TooFewObservations`] - fewer than two observations
    /// * [`StatsError::NonFinite`] - any observation is NaN or infinite
    /// * [`StatsError::InvalidProbability`] - `level` is not in (0, 1)
    pub fn for_mean(values: &[f64], level: f64) -> Result<Self, StatsError> {
        let stats = DescriptiveStats::new(values.iter().copied())?;
        Self::from_stats(&stats, level)
    }

    /// Student-t interval for the mean from precomputed statistics.
    pub fn from_stats(stats: &DescriptiveStats, level: f64) -> Result<Self, StatsError> {
        let t = t_critical(level, stats.count.saturating_sub(1))?;
        let margin = stats.std_error * t;
        Ok(Self {
            level,
            mean: stats.mean,
            margin,
            lower: stats.mean - margin,
            upper: stats.mean + margin,
        })
    }

    /// Whether `value` lies inside the closed interval.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

/// Number of observations needed to estimate a mean within `margin` at the given
/// `confidence`, for a population with standard deviation `std_dev`.
///
/// Computes `(z × σ / margin)²` and truncates it toward zero.
///
/// # Errors
///
/// * [`StatsError::InvalidMargin`] - `margin` is not positive and finite
/// * [`StatsError::InvalidProbability`] - `confidence` is not in (0, 1)
/// * [`StatsError::NonFinite`] - `std_dev` is NaN or infinite
///
/// # Examples
///
/// ```
/// # use crashstat_stats::inference::required_sample_size;
/// // (1.6449 * 1.0 / 0.1)^2 = 270.55...
/// assert_eq!(required_sample_size(1.0, 0.1, 0.90).unwrap(), 270);
/// ```
#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn required_sample_size(std_dev: f64, margin: f64, confidence: f64) -> Result<u64, StatsError> {
    if !std_dev.is_finite() {
        return Err(StatsError::NonFinite);
    }
    if !(margin.is_finite() && margin > 0.0) {
        return Err(StatsError::InvalidMargin(margin));
    }
    let z = z_critical(confidence)?;
    let n = (z * std_dev.abs() / margin).powi(2);
    // TODO: decide whether to round up; plain truncation can undershoot the margin
    Ok(n as u64)
}

/// A one-sample, two-sided Student-t test of `H0: mean == null_mean`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OneSampleTTest {
    pub null_mean: f64,
    pub mean: f64,
    pub std_error: f64,
    /// `(mean - null_mean) / std_error`
    pub statistic: f64,
    pub degrees_of_freedom: usize,
    /// Probability of a statistic at least as extreme as the observed one under H0.
    pub p_value: f64,
}

impl OneSampleTTest {
    /// Runs the test on `values`.
    ///
    /// # Errors
    ///
    /// * [`StatsError::TooFewObservations`] - fewer than two observations
    /// * [`StatsError::NonFinite`] - any observation or `null_mean` is NaN or infinite
    /// * [`StatsError::ZeroStandardError`] - all observations are identical
    pub fn new(values: &[f64], null_mean: f64) -> Result<Self, StatsError> {
        let stats = DescriptiveStats::new(values.iter().copied())?;
        Self::from_stats(&stats, null_mean)
    }

    /// Runs the test from precomputed statistics.
    pub fn from_stats(stats: &DescriptiveStats, null_mean: f64) -> Result<Self, StatsError> {
        if !null_mean.is_finite() {
            return Err(StatsError::NonFinite);
        }
        let degrees_of_freedom = stats.count.saturating_sub(1);
        let dist = students_t(degrees_of_freedom)?;
        if stats.std_error <= 0.0 {
            return Err(StatsError::ZeroStandardError);
        }
        let statistic = (stats.mean - null_mean) / stats.std_error;
        let p_value = (2.0 * dist.sf(statistic.abs())).clamp(0.0, 1.0);
        Ok(Self {
            null_mean,
            mean: stats.mean,
            std_error: stats.std_error,
            statistic,
            degrees_of_freedom,
            p_value,
        })
    }
}
