//! Traffic-accident statistics over a tabular dataset.
//!
//! This crate loads the accident table from a [`DataSource`](source::DataSource)
//! and answers the queries offered by the application:
//!
//! - **Descriptive statistics** per analyzed field
//! - **Confidence intervals** for the mean
//! - **Sample-size estimates** for a target margin of error
//! - **Hypothesis tests** of the mean against a fixed null value
//! - **Distribution plots**: histogram, density curve and box plot
//!
//! # Modules
//!
//! - [`field`]: The numeric columns of the dataset
//! - [`dataset`]: The in-memory accident table and CSV parsing
//! - [`source`]: Data sources and load failures
//! - [`service`]: The statistics service answering the queries
//! - [`report`]: Structured query results
//!
//! # Examples
//!
//! ```
//! use crashstat_analysis::{
//!     dataset::Dataset,
//!     field::Field,
//!     report::Decision,
//!     service::{NULL_MEAN, StatisticsService},
//! };
//!
//! let csv = "Distance(mi),Visibility(mi),Severity\n0,10,2\n0,9,2\n0.1,10,3\n0.1,8,2\n";
//! let dataset = Dataset::from_csv_reader(csv.as_bytes()).unwrap();
//! let service = StatisticsService::load(&dataset).unwrap();
//!
//! let result = service.hypothesis_test(Field::Distance, NULL_MEAN).unwrap();
//! assert_eq!(result.decision, Decision::FailToReject);
//! ```

pub mod dataset;
pub mod field;
pub mod report;
pub mod service;
pub mod source;
