//! The in-memory accident table.
//!
//! Only the three numeric fields of [`Field::ALL`] are kept; every other
//! column of the source is ignored. A cell may be missing (empty or one of
//! the usual "not available" markers); missing cells are skipped when a
//! field's observations are extracted.

use std::io;

use serde::Serialize;

use crate::{field::Field, source::DataUnavailable};

/// Cell contents treated as a missing value.
const MISSING_MARKERS: [&str; 7] = ["", "NA", "N/A", "NaN", "nan", "null", "NULL"];

/// One accident, projected onto the analyzed fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct AccidentRecord {
    pub distance: Option<f64>,
    pub visibility: Option<f64>,
    pub severity: Option<f64>,
}

impl AccidentRecord {
    /// A record with all three fields present.
    #[must_use]
    pub fn new(distance: f64, visibility: f64, severity: f64) -> Self {
        Self {
            distance: Some(distance),
            visibility: Some(visibility),
            severity: Some(severity),
        }
    }

    #[must_use]
    pub fn get(&self, field: Field) -> Option<f64> {
        match field {
            Field::Distance => self.distance,
            Field::Visibility => self.visibility,
            Field::Severity => self.severity,
        }
    }

    fn slot_mut(&mut self, field: Field) -> &mut Option<f64> {
        match field {
            Field::Distance => &mut self.distance,
            Field::Visibility => &mut self.visibility,
            Field::Severity => &mut self.severity,
        }
    }
}

/// Immutable table of accident records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<AccidentRecord>,
}

impl Dataset {
    #[must_use]
    pub fn new(records: Vec<AccidentRecord>) -> Self {
        Self { records }
    }

    /// Parses CSV text with a header row.
    ///
    /// The header must name every column in [`Field::ALL`]; extra columns are ignored.
    ///
    /// # Errors
    ///
    /// * [`DataUnavailable::Csv`] - the input is not valid CSV
    /// * [`DataUnavailable::MissingColumn`] - a required column is absent
    /// * [`DataUnavailable::InvalidValue`] - a present cell is not a number
    pub fn from_csv_reader<R>(reader: R) -> Result<Self, DataUnavailable>
    where
        R: io::Read,
    {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers = reader
            .headers()
            .map_err(|source| DataUnavailable::Csv { source })?;
        let columns = Field::ALL
            .iter()
            .map(|&field| {
                headers
                    .iter()
                    .position(|header| header == field.column_name())
                    .map(|idx| (field, idx))
                    .ok_or(DataUnavailable::MissingColumn {
                        column: field.column_name(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut records = vec![];
        for row in reader.records() {
            let row = row.map_err(|source| DataUnavailable::Csv { source })?;
            let line = row.position().map_or(0, csv::Position::line);
            let mut record = AccidentRecord::default();
            for &(field, idx) in &columns {
                *record.slot_mut(field) = parse_cell(field, row.get(idx).unwrap_or(""), line)?;
            }
            records.push(record);
        }

        Ok(Self { records })
    }

    #[must_use]
    pub fn records(&self) -> &[AccidentRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The present observations of `field`, in record order.
    #[must_use]
    pub fn values(&self, field: Field) -> Vec<f64> {
        self.records
            .iter()
            .filter_map(|record| record.get(field))
            .collect()
    }
}

fn parse_cell(field: Field, cell: &str, line: u64) -> Result<Option<f64>, DataUnavailable> {
    if MISSING_MARKERS.contains(&cell) {
        return Ok(None);
    }
    cell.parse::<f64>()
        .map(Some)
        .map_err(|_| DataUnavailable::InvalidValue {
            column: field.column_name(),
            line,
            value: cell.to_owned(),
        })
}
