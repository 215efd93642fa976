use std::io::Write as _;

use anyhow::Context as _;
use crashstat_analysis::{report::AnalysisReport, service::StatisticsService};

use crate::{format, util::Output};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ReportArg {
    /// Print the report as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

pub fn run(service: &StatisticsService, arg: &ReportArg) -> anyhow::Result<()> {
    let ReportArg { json } = arg;

    tracing::info!(source = service.source_label(), "collecting report");
    let report = AnalysisReport::collect(service).context("Failed to compute statistics")?;

    let mut output = Output::stdout();
    if *json {
        output.write_json(&report)?;
    } else {
        write!(output, "{}", format::report(&report))
            .with_context(|| format!("Failed to write report to {}", output.display_path()))?;
        output
            .flush()
            .with_context(|| format!("Failed to flush output to {}", output.display_path()))?;
    }
    Ok(())
}
