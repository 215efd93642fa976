//! Data sources the statistics service can be loaded from.
//!
//! The service never opens files itself; it is handed a [`DataSource`] at
//! construction. The application uses [`CsvFileSource`] pointed at
//! [`DEFAULT_DATA_FILE`], while tests hand it an in-memory [`Dataset`].

use std::{
    fs::File,
    io::{self, BufReader},
    path::{Path, PathBuf},
};

use crate::dataset::Dataset;

/// Conventional location of the accident dataset, relative to the working directory.
pub const DEFAULT_DATA_FILE: &str = "accidents_small.csv";

/// The dataset could not be loaded.
///
/// This is fatal: no statistics service exists without a dataset.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum DataUnavailable {
    #[display("failed to open data file {}", path.display())]
    Open { path: PathBuf, source: io::Error },
    #[display("failed to read CSV data")]
    Csv { source: csv::Error },
    #[display("required column `{column}` is missing")]
    MissingColumn { column: &'static str },
    #[display("invalid value {value:?} in column `{column}` at line {line}")]
    InvalidValue {
        column: &'static str,
        line: u64,
        value: String,
    },
}

/// Something a [`Dataset`] can be loaded from.
pub trait DataSource {
    /// Short human-readable name of the source, shown in the UI.
    fn label(&self) -> String;

    /// Reads the source and projects the accident fields.
    fn load(&self) -> Result<Dataset, DataUnavailable>;
}

/// A CSV file on disk.
#[derive(Debug, Clone)]
pub struct CsvFileSource {
    path: PathBuf,
}

impl CsvFileSource {
    #[must_use]
    pub fn new<P>(path: P) -> Self
    where
        P: Into<PathBuf>,
    {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for CsvFileSource {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_FILE)
    }
}

impl DataSource for CsvFileSource {
    fn label(&self) -> String {
        self.path.file_name().map_or_else(
            || self.path.display().to_string(),
            |name| name.to_string_lossy().into_owned(),
        )
    }

    fn load(&self) -> Result<Dataset, DataUnavailable> {
        let file = File::open(&self.path).map_err(|source| DataUnavailable::Open {
            path: self.path.clone(),
            source,
        })?;
        Dataset::from_csv_reader(BufReader::new(file))
    }
}

impl DataSource for Dataset {
    fn label(&self) -> String {
        "in-memory dataset".to_owned()
    }

    fn load(&self) -> Result<Dataset, DataUnavailable> {
        Ok(self.clone())
    }
}
