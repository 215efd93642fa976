//! Structured query results.
//!
//! Every value here is ephemeral: it is computed for one request and formatted
//! for display by the caller. Nothing is cached.

use std::ops::Range;

use crashstat_stats::{
    boxplot::BoxPlotSummary,
    descriptive::DescriptiveStats,
    histogram::Histogram,
    inference::{ConfidenceInterval, OneSampleTTest},
};
use serde::Serialize;

use crate::{
    field::Field,
    service::{
        CONFIDENCE_LEVEL, NULL_MEAN, QueryError, SAMPLE_SIZE_CONFIDENCE, SAMPLE_SIZE_MARGIN,
        StatisticsService,
    },
};

/// Descriptive statistics of one field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSummary {
    pub field: Field,
    pub stats: DescriptiveStats,
}

/// Confidence interval for the mean of one field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldInterval {
    pub field: Field,
    pub interval: ConfidenceInterval,
}

/// Observations needed to estimate a field's mean within a margin of error.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleSizeEstimate {
    pub field: Field,
    /// Sample standard deviation of the field over the whole dataset.
    pub std_dev: f64,
    pub margin: f64,
    pub confidence: f64,
    /// Two-sided standard-normal critical value for `confidence`.
    pub z_critical: f64,
    pub required: u64,
}

/// Outcome of a hypothesis test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::IsVariant)]
pub enum Decision {
    Reject,
    FailToReject,
}

impl Decision {
    /// Rejects exactly when `p_value < significance`.
    #[must_use]
    pub fn from_p_value(p_value: f64, significance: f64) -> Self {
        if p_value < significance {
            Self::Reject
        } else {
            Self::FailToReject
        }
    }
}

/// One-sample t-test of a field's mean against a null value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HypothesisTestResult {
    pub field: Field,
    pub test: OneSampleTTest,
    pub significance: f64,
    pub decision: Decision,
}

/// Everything needed to draw a field's distribution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionPlot {
    pub field: Field,
    pub histogram: Histogram,
    /// Kernel density curve scaled to histogram counts, as `(x, count)` pairs.
    ///
    /// Empty when the field has no spread to estimate a density from.
    pub density: Vec<(f64, f64)>,
    pub boxplot: BoxPlotSummary,
    /// Horizontal axis range of the histogram, if it is clipped.
    pub x_window: Option<Range<f64>>,
}

impl DistributionPlot {
    /// The horizontal axis range of the histogram: the clip window or the bin range.
    #[must_use]
    pub fn histogram_x_range(&self) -> Range<f64> {
        if let Some(window) = &self.x_window {
            return window.clone();
        }
        match (self.histogram.bins.first(), self.histogram.bins.last()) {
            (Some(first), Some(last)) => first.range.start..last.range.end,
            _ => 0.0..1.0,
        }
    }
}

/// The standard set of queries, as offered by the application.
///
/// Descriptive statistics, confidence intervals and sample sizes cover every
/// analyzed field; the hypothesis test runs on distance only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub source: String,
    pub records: usize,
    pub descriptive: Vec<FieldSummary>,
    pub confidence_intervals: Vec<FieldInterval>,
    pub sample_sizes: Vec<SampleSizeEstimate>,
    pub hypothesis_test: HypothesisTestResult,
}

impl AnalysisReport {
    /// Field the hypothesis test is run on.
    pub const TESTED_FIELD: Field = Field::Distance;

    pub fn collect(service: &StatisticsService) -> Result<Self, QueryError> {
        let confidence_intervals = Field::ANALYZED
            .iter()
            .map(|&field| service.confidence_interval(field, CONFIDENCE_LEVEL))
            .collect::<Result<Vec<_>, _>>()?;
        let sample_sizes = Field::ANALYZED
            .iter()
            .map(|&field| {
                service.sample_size_estimate(field, SAMPLE_SIZE_MARGIN, SAMPLE_SIZE_CONFIDENCE)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            source: service.source_label().to_owned(),
            records: service.dataset().len(),
            descriptive: service.descriptive_stats(&Field::ANALYZED)?,
            confidence_intervals,
            sample_sizes,
            hypothesis_test: service.hypothesis_test(Self::TESTED_FIELD, NULL_MEAN)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decision_matches_threshold() {
        assert!(Decision::from_p_value(0.049, 0.05).is_reject());
        assert!(Decision::from_p_value(0.05, 0.05).is_fail_to_reject());
        assert!(Decision::from_p_value(1.0, 0.05).is_fail_to_reject());
        assert!(Decision::from_p_value(0.0, 0.05).is_reject());
    }

    #[test]
    fn test_decision_from_t_test() {
        let centered = OneSampleTTest::new(&[0.0, 0.0, 0.1, 0.1], 0.05).unwrap();
        assert!(Decision::from_p_value(centered.p_value, 0.05).is_fail_to_reject());

        // two-sided p = 0.01324
        let shifted = OneSampleTTest::new(&[1.0, 2.0, 3.0, 4.0, 5.0], 0.0).unwrap();
        assert!(Decision::from_p_value(shifted.p_value, 0.05).is_reject());
    }
}
