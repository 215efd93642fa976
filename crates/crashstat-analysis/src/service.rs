//! The statistics service.
//!
//! [`StatisticsService`] owns the loaded [`Dataset`] and answers five
//! independent, read-only queries against it. A service only exists once a
//! dataset was loaded successfully, so no query can run on a failed load.
//!
//! # Examples
//!
//! ```
//! use crashstat_analysis::{
//!     dataset::{AccidentRecord, Dataset},
//!     field::Field,
//!     service::{CONFIDENCE_LEVEL, StatisticsService},
//! };
//!
//! let dataset = Dataset::new(vec![
//!     AccidentRecord::new(0.0, 10.0, 2.0),
//!     AccidentRecord::new(0.1, 9.0, 3.0),
//!     AccidentRecord::new(0.2, 10.0, 2.0),
//! ]);
//! let service = StatisticsService::load(&dataset).unwrap();
//! let ci = service.confidence_interval(Field::Distance, CONFIDENCE_LEVEL).unwrap();
//! assert!(ci.interval.contains(0.1));
//! ```

use std::ops::Range;

use crashstat_stats::{
    StatsError,
    boxplot::BoxPlotSummary,
    descriptive::DescriptiveStats,
    histogram::Histogram,
    inference::{self, ConfidenceInterval, OneSampleTTest},
    kde::GaussianKde,
};

use crate::{
    dataset::Dataset,
    field::Field,
    report::{
        Decision, DistributionPlot, FieldInterval, FieldSummary, HypothesisTestResult,
        SampleSizeEstimate,
    },
    source::{DataSource, DataUnavailable},
};

/// Confidence level of the reported intervals.
pub const CONFIDENCE_LEVEL: f64 = 0.95;
/// Target margin of error for the sample-size estimate.
pub const SAMPLE_SIZE_MARGIN: f64 = 0.1;
/// Confidence level for the sample-size estimate.
pub const SAMPLE_SIZE_CONFIDENCE: f64 = 0.90;
/// Mean under the null hypothesis.
pub const NULL_MEAN: f64 = 0.05;
/// Fixed significance threshold of the hypothesis test.
pub const SIGNIFICANCE_LEVEL: f64 = 0.05;
/// Number of histogram bins per plot.
pub const HISTOGRAM_BINS: usize = 30;
/// Number of points the density curve is evaluated at.
pub const DENSITY_GRID_POINTS: usize = 200;
/// Histogram axis window for distance; the data piles up near zero.
pub const DISTANCE_X_WINDOW: Range<f64> = 0.0..1.0;

/// A query could not be answered for a field.
///
/// Recoverable: the caller reports it and may issue other queries.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
#[display("cannot analyze {field}: {source}")]
pub struct QueryError {
    pub field: Field,
    pub source: StatsError,
}

impl QueryError {
    /// Whether the field had too few observations for the query.
    #[must_use]
    pub fn is_degenerate_input(&self) -> bool {
        matches!(self.source, StatsError::TooFewObservations { .. })
    }
}

/// Read-only statistics over a loaded accident dataset.
#[derive(Debug, Clone)]
pub struct StatisticsService {
    dataset: Dataset,
    source_label: String,
}

impl StatisticsService {
    /// Loads the dataset from `source`.
    ///
    /// There is no retry; on failure the caller is expected to report the
    /// error and stop.
    pub fn load<S>(source: &S) -> Result<Self, DataUnavailable>
    where
        S: DataSource + ?Sized,
    {
        let source_label = source.label();
        tracing::info!(source = %source_label, "loading dataset");
        let dataset = source.load().inspect_err(|err| {
            tracing::error!(source = %source_label, error = %err, "dataset unavailable");
        })?;
        tracing::info!(records = dataset.len(), "dataset loaded");
        Ok(Self {
            dataset,
            source_label,
        })
    }

    #[must_use]
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    #[must_use]
    pub fn source_label(&self) -> &str {
        &self.source_label
    }

    fn summarize(&self, field: Field) -> Result<DescriptiveStats, QueryError> {
        let values = self.dataset.values(field);
        tracing::debug!(%field, count = values.len(), "summarizing field");
        DescriptiveStats::new(values).map_err(|source| QueryError { field, source })
    }

    /// Mean, median, variance, standard deviation and standard error per field.
    pub fn descriptive_stats(&self, fields: &[Field]) -> Result<Vec<FieldSummary>, QueryError> {
        fields
            .iter()
            .map(|&field| {
                let stats = self.summarize(field)?;
                Ok(FieldSummary { field, stats })
            })
            .collect()
    }

    /// Student-t confidence interval for the field's mean at `level`.
    pub fn confidence_interval(
        &self,
        field: Field,
        level: f64,
    ) -> Result<FieldInterval, QueryError> {
        let stats = self.summarize(field)?;
        let interval = ConfidenceInterval::from_stats(&stats, level)
            .map_err(|source| QueryError { field, source })?;
        Ok(FieldInterval { field, interval })
    }

    /// Observations needed to estimate the field's mean within `margin` at `confidence`.
    ///
    /// The standard deviation is estimated from the whole dataset. The result
    /// is truncated, not rounded.
    pub fn sample_size_estimate(
        &self,
        field: Field,
        margin: f64,
        confidence: f64,
    ) -> Result<SampleSizeEstimate, QueryError> {
        let to_query_error = |source| QueryError { field, source };
        let stats = self.summarize(field)?;
        let required = inference::required_sample_size(stats.std_dev, margin, confidence)
            .map_err(to_query_error)?;
        let z_critical = inference::z_critical(confidence).map_err(to_query_error)?;
        Ok(SampleSizeEstimate {
            field,
            std_dev: stats.std_dev,
            margin,
            confidence,
            z_critical,
            required,
        })
    }

    /// Two-sided one-sample t-test of `H0: mean == null_mean`.
    ///
    /// The null hypothesis is rejected when the p-value is below
    /// [`SIGNIFICANCE_LEVEL`].
    pub fn hypothesis_test(
        &self,
        field: Field,
        null_mean: f64,
    ) -> Result<HypothesisTestResult, QueryError> {
        let stats = self.summarize(field)?;
        let test = OneSampleTTest::from_stats(&stats, null_mean)
            .map_err(|source| QueryError { field, source })?;
        let decision = Decision::from_p_value(test.p_value, SIGNIFICANCE_LEVEL);
        tracing::debug!(%field, p_value = test.p_value, ?decision, "hypothesis test done");
        Ok(HypothesisTestResult {
            field,
            test,
            significance: SIGNIFICANCE_LEVEL,
            decision,
        })
    }

    /// Histogram, density overlay and box plot of the field.
    #[expect(clippy::cast_precision_loss)]
    pub fn plot_distribution(&self, field: Field) -> Result<DistributionPlot, QueryError> {
        let to_query_error = |source| QueryError { field, source };

        let mut values = self.dataset.values(field);
        values.sort_by(f64::total_cmp);
        let stats = DescriptiveStats::from_sorted(&values).map_err(to_query_error)?;

        let histogram = Histogram::new(values.iter().copied(), HISTOGRAM_BINS);
        let scale = values.len() as f64 * histogram.bin_width();
        let density = match GaussianKde::new(&values) {
            Ok(kde) => kde
                .evaluate(stats.min, stats.max, DENSITY_GRID_POINTS)
                .into_iter()
                .map(|(x, density)| (x, density * scale))
                .collect(),
            Err(StatsError::ZeroStandardError) => vec![],
            Err(source) => return Err(to_query_error(source)),
        };
        let boxplot = BoxPlotSummary::from_sorted(&values, BoxPlotSummary::DEFAULT_WHISKER_FACTOR)
            .map_err(to_query_error)?;
        let x_window = (field == Field::Distance).then_some(DISTANCE_X_WINDOW);

        Ok(DistributionPlot {
            field,
            histogram,
            density,
            boxplot,
            x_window,
        })
    }
}
