//! In-memory report store. Same id semantics as the CSV store; used in tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::StorageError;
use crate::models::{NewReport, Report};
use crate::repository::ReportStore;

#[derive(Default)]
pub struct InMemoryReportStore {
    reports: Mutex<Vec<Report>>,
}

impl InMemoryReportStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored report in append order.
    pub fn reports(&self) -> Vec<Report> {
        self.reports
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[async_trait]
impl ReportStore for InMemoryReportStore {
    async fn append(&self, report: NewReport) -> Result<Report, StorageError> {
        let mut reports = self.reports.lock().unwrap_or_else(|e| e.into_inner());
        let next_id = reports.last().map_or(1, |r| r.report_id + 1);
        let report = report.into_report(next_id);
        reports.push(report.clone());
        Ok(report)
    }

    async fn find_by_id_and_user(
        &self,
        id: u64,
        user: &str,
    ) -> Result<Option<Report>, StorageError> {
        let reports = self.reports.lock().unwrap_or_else(|e| e.into_inner());
        Ok(reports
            .iter()
            .find(|r| r.report_id == id && r.user == user)
            .cloned())
    }
}
