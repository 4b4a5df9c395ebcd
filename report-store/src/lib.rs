//! Report store: persistence of civic reports behind the [`ReportStore`] trait.
//!
//! ## Modules
//!
//! - [`error`] – StorageError
//! - [`models`] – Report, NewReport, IssueType, Priority
//! - [`repository`] – ReportStore trait
//! - [`csv_store`] – CsvReportStore (append-only CSV file)
//! - [`memory_store`] – InMemoryReportStore

mod csv_store;
mod error;
mod memory_store;
mod models;
mod repository;

pub use csv_store::{CsvReportStore, CSV_HEADER};
pub use error::StorageError;
pub use memory_store::InMemoryReportStore;
pub use models::{IssueType, NewReport, Priority, Report, DEFAULT_STATUS};
pub use repository::ReportStore;
