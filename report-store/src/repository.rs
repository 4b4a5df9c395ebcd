use async_trait::async_trait;

use crate::error::StorageError;
use crate::models::{NewReport, Report};

/// Append-only report storage. Implementations own ID assignment.
#[async_trait]
pub trait ReportStore: Send + Sync {
    /// Persists a new report and returns it with its assigned, never reused ID.
    async fn append(&self, report: NewReport) -> Result<Report, StorageError>;

    /// Returns the report with `id` only if it was filed by `user`.
    async fn find_by_id_and_user(&self, id: u64, user: &str)
        -> Result<Option<Report>, StorageError>;
}
