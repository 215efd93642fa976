//! Plain-text rendering of query results.

use std::fmt::Write as _;

use crashstat_analysis::report::{
    AnalysisReport, Decision, FieldInterval, FieldSummary, HypothesisTestResult,
    SampleSizeEstimate,
};

pub const DESCRIPTIVE_TITLE: &str = "Descriptive Statistics";
pub const CONFIDENCE_TITLE: &str = "Confidence Intervals";
pub const SAMPLE_SIZE_TITLE: &str = "Sample Size Estimation";
pub const HYPOTHESIS_TITLE: &str = "Hypothesis Test";

const DESCRIPTIVE_COLUMNS: [&str; 5] = ["Mean", "Median", "Variance", "Std Deviation", "Std Error"];

fn percent(level: f64) -> String {
    format!("{:.0}%", level * 100.0)
}

/// One row per field, one column per statistic.
#[must_use]
pub fn descriptive_table(summaries: &[FieldSummary]) -> String {
    let label_width = summaries
        .iter()
        .map(|summary| summary.field.column_name().len())
        .max()
        .unwrap_or(0);

    let mut out = format!("{:label_width$}", "");
    for column in DESCRIPTIVE_COLUMNS {
        write!(&mut out, "  {column:>14}").unwrap();
    }
    for summary in summaries {
        let stats = &summary.stats;
        write!(&mut out, "\n{:<label_width$}", summary.field.column_name()).unwrap();
        for value in [
            stats.mean,
            stats.median,
            stats.variance,
            stats.std_dev,
            stats.std_error,
        ] {
            write!(&mut out, "  {value:>14.6}").unwrap();
        }
    }
    out
}

#[must_use]
pub fn confidence_intervals(intervals: &[FieldInterval]) -> String {
    intervals
        .iter()
        .map(|FieldInterval { field, interval }| {
            format!(
                "{} Confidence Interval for {field}: ({}, {})",
                percent(interval.level),
                interval.lower,
                interval.upper
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[must_use]
pub fn sample_sizes(estimates: &[SampleSizeEstimate]) -> String {
    estimates
        .iter()
        .map(|estimate| {
            format!(
                "Sample size needed for {} (±{}, {} CI): {}",
                estimate.field.short_name(),
                estimate.margin,
                percent(estimate.confidence),
                estimate.required
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[must_use]
pub fn hypothesis_test(result: &HypothesisTestResult) -> String {
    let verdict = match result.decision {
        Decision::Reject => "Reject H0 (significant difference)",
        Decision::FailToReject => "Fail to reject H0 (no significant difference)",
    };
    format!(
        "Hypothesis Test for {}:\nH0: Mean = {}\nt-statistic = {:.4}, p-value = {:.4}\nResult: {verdict}",
        result.field, result.test.null_mean, result.test.statistic, result.test.p_value,
    )
}

/// The whole report as titled sections.
#[must_use]
pub fn report(report: &AnalysisReport) -> String {
    let sections = [
        (DESCRIPTIVE_TITLE, descriptive_table(&report.descriptive)),
        (
            CONFIDENCE_TITLE,
            confidence_intervals(&report.confidence_intervals),
        ),
        (SAMPLE_SIZE_TITLE, sample_sizes(&report.sample_sizes)),
        (HYPOTHESIS_TITLE, hypothesis_test(&report.hypothesis_test)),
    ];

    let mut out = format!("Analyzing: {} ({} records)\n", report.source, report.records);
    for (title, body) in sections {
        write!(&mut out, "\n== {title} ==\n{body}\n").unwrap();
    }
    out
}

#[cfg(test)]
mod tests {
    use crashstat_analysis::{
        dataset::{AccidentRecord, Dataset},
        field::Field,
        service::{
            CONFIDENCE_LEVEL, NULL_MEAN, SAMPLE_SIZE_CONFIDENCE, SAMPLE_SIZE_MARGIN,
            StatisticsService,
        },
    };

    use super::*;

    fn service() -> StatisticsService {
        let records = [0.0, 0.0, 0.1, 0.1]
            .into_iter()
            .zip([10.0, 9.0, 10.0, 7.0])
            .map(|(distance, visibility)| AccidentRecord::new(distance, visibility, 2.0))
            .collect();
        StatisticsService::load(&Dataset::new(records)).unwrap()
    }

    #[test]
    fn test_descriptive_table_layout() {
        let summaries = service().descriptive_stats(&Field::ANALYZED).unwrap();
        let table = descriptive_table(&summaries);
        let lines = table.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 3);
        for column in DESCRIPTIVE_COLUMNS {
            assert!(lines[0].contains(column));
        }
        assert!(lines[1].starts_with("Distance(mi)"));
        assert!(lines[1].contains("0.050000"));
        assert!(lines[2].starts_with("Visibility(mi)"));
        assert!(lines[2].contains("9.000000"));
    }

    #[test]
    fn test_confidence_interval_line() {
        let interval = service()
            .confidence_interval(Field::Distance, CONFIDENCE_LEVEL)
            .unwrap();
        let text = confidence_intervals(&[interval.clone()]);
        assert_eq!(
            text,
            format!(
                "95% Confidence Interval for Distance(mi): ({}, {})",
                interval.interval.lower, interval.interval.upper
            )
        );
    }

    #[test]
    fn test_sample_size_line() {
        let estimate = service()
            .sample_size_estimate(Field::Visibility, SAMPLE_SIZE_MARGIN, SAMPLE_SIZE_CONFIDENCE)
            .unwrap();
        let text = sample_sizes(&[estimate.clone()]);
        assert_eq!(
            text,
            format!(
                "Sample size needed for Visibility (±0.1, 90% CI): {}",
                estimate.required
            )
        );
    }

    #[test]
    fn test_hypothesis_test_text() {
        let result = service().hypothesis_test(Field::Distance, NULL_MEAN).unwrap();
        assert_eq!(
            hypothesis_test(&result),
            "Hypothesis Test for Distance(mi):\n\
             H0: Mean = 0.05\n\
             t-statistic = 0.0000, p-value = 1.0000\n\
             Result: Fail to reject H0 (no significant difference)"
        );
    }

    #[test]
    fn test_report_has_every_section() {
        let report = AnalysisReport::collect(&service()).unwrap();
        let text = super::report(&report);
        assert!(text.starts_with("Analyzing: in-memory dataset (4 records)"));
        for title in [
            DESCRIPTIVE_TITLE,
            CONFIDENCE_TITLE,
            SAMPLE_SIZE_TITLE,
            HYPOTHESIS_TITLE,
        ] {
            assert!(text.contains(&format!("== {title} ==")));
        }
    }
}
