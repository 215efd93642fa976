use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use crashstat_analysis::{
    service::StatisticsService,
    source::{CsvFileSource, DEFAULT_DATA_FILE},
};

use self::report::ReportArg;

mod analyze;
mod report;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Accident data CSV file
    #[arg(long, global = true, default_value = DEFAULT_DATA_FILE)]
    data_file: PathBuf,
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Explore the dataset interactively (default)
    Analyze,
    /// Print the statistics report without a terminal UI
    Report(#[clap(flatten)] ReportArg),
}

pub fn run() -> anyhow::Result<()> {
    let CommandArgs { data_file, mode } = CommandArgs::parse();

    // Load before any UI is shown; a missing dataset ends the program
    let source = CsvFileSource::new(data_file);
    let service = StatisticsService::load(&source).with_context(|| {
        format!(
            "Failed to load accident data from {}",
            source.path().display()
        )
    })?;

    match mode.unwrap_or(Mode::Analyze) {
        Mode::Analyze => analyze::run(service)?,
        Mode::Report(arg) => report::run(&service, &arg)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn test_command_definition() {
        CommandArgs::command().debug_assert();
    }

    #[test]
    fn test_defaults_to_analyze_with_default_file() {
        let args = CommandArgs::try_parse_from(["crashstat"]).unwrap();
        assert_eq!(args.data_file, PathBuf::from(DEFAULT_DATA_FILE));
        assert!(args.mode.is_none());
    }

    #[test]
    fn test_data_file_after_subcommand() {
        let args =
            CommandArgs::try_parse_from(["crashstat", "report", "--json", "--data-file", "a.csv"])
                .unwrap();
        assert_eq!(args.data_file, PathBuf::from("a.csv"));
        assert!(matches!(args.mode, Some(Mode::Report(ReportArg { json: true }))));
    }
}
