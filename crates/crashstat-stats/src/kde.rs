//! Gaussian kernel density estimation.
//!
//! The bandwidth follows Scott's rule, `h = σ · n^(-1/5)`, where `σ` is the
//! sample standard deviation. This is the default rule of common plotting
//! libraries, so the curves match the usual "histogram with KDE" overlay.
//!
//! # Examples
//!
//! ```
//! use crashstat_stats::kde::GaussianKde;
//!
//! let kde = GaussianKde::new(&[1.0, 2.0, 2.5, 3.0, 7.0]).unwrap();
//! let curve = kde.evaluate(0.0, 8.0, 50);
//! assert_eq!(curve.len(), 50);
//! assert!(curve.iter().all(|&(_, density)| density >= 0.0));
//! ```

use std::f64::consts::PI;

use crate::{StatsError, descriptive::DescriptiveStats};

/// A Gaussian kernel density estimator over a fixed sample.
#[derive(Debug, Clone)]
pub struct GaussianKde {
    samples: Vec<f64>,
    bandwidth: f64,
}

impl GaussianKde {
    /// Builds an estimator from the given observations.
    ///
    /// # Errors
    ///
    /// * [`StatsError::TooFewObservations`] - fewer than two observations
    /// * [`StatsError::NonFinite`] - any observation is NaN or infinite
    /// * [`StatsError::ZeroStandardError`] - all observations are identical,
    ///   which leaves the bandwidth at zero
    #[expect(clippy::cast_precision_loss)]
    pub fn new(values: &[f64]) -> Result<Self, StatsError> {
        let stats = DescriptiveStats::new(values.iter().copied())?;
        if stats.std_dev <= 0.0 {
            return Err(StatsError::ZeroStandardError);
        }
        let scott_factor = (values.len() as f64).powf(-0.2);
        Ok(Self {
            samples: values.to_vec(),
            bandwidth: stats.std_dev * scott_factor,
        })
    }

    /// The kernel bandwidth.
    #[must_use]
    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    /// The estimated probability density at `x`.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn density(&self, x: f64) -> f64 {
        let h = self.bandwidth;
        let norm = 1.0 / (self.samples.len() as f64 * h * (2.0 * PI).sqrt());
        let sum = self
            .samples
            .iter()
            .map(|&xi| {
                let u = (x - xi) / h;
                (-0.5 * u * u).exp()
            })
            .sum::<f64>();
        norm * sum
    }

    /// Evaluates the density on `points` evenly spaced grid points in `[start, end]`.
    ///
    /// Returns `(x, density)` pairs in ascending `x` order.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn evaluate(&self, start: f64, end: f64, points: usize) -> Vec<(f64, f64)> {
        match points {
            0 => vec![],
            1 => vec![(start, self.density(start))],
            _ => {
                let step = (end - start) / (points - 1) as f64;
                (0..points)
                    .map(|i| {
                        let x = if i == points - 1 {
                            end
                        } else {
                            start + step * i as f64
                        };
                        (x, self.density(x))
                    })
                    .collect()
            }
        }
    }
}
