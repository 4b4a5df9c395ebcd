//! Storage error types.
//!
//! Used by ReportStore implementations and callers of storage APIs.

use thiserror::Error;

/// Errors that can occur when using storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Blocking task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
