//! Report record model for persistence.
//!
//! Field order and names match the CSV columns written by CsvReportStore.

use serde::{Deserialize, Serialize};

use super::issue::{IssueType, Priority};

/// Status given to every newly filed report.
pub const DEFAULT_STATUS: &str = "Submitted";

/// A stored report. Latitude/longitude are empty in the file when unknown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    #[serde(rename = "ReportID")]
    pub report_id: u64,
    #[serde(rename = "User")]
    pub user: String,
    #[serde(rename = "ImageFile")]
    pub image_file: String,
    #[serde(rename = "Latitude")]
    pub latitude: Option<f64>,
    #[serde(rename = "Longitude")]
    pub longitude: Option<f64>,
    #[serde(rename = "Type")]
    pub issue_type: IssueType,
    #[serde(rename = "Priority")]
    pub priority: Priority,
    #[serde(rename = "Status")]
    pub status: String,
}

/// Input to [`crate::ReportStore::append`]; the store assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewReport {
    pub user: String,
    pub image_file: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub issue_type: IssueType,
    pub priority: Priority,
    pub status: String,
}

impl NewReport {
    /// Creates a report in the default "Submitted" status with the type's mapped priority.
    pub fn new(
        user: impl Into<String>,
        image_file: impl Into<String>,
        latitude: Option<f64>,
        longitude: Option<f64>,
        issue_type: IssueType,
    ) -> Self {
        Self {
            user: user.into(),
            image_file: image_file.into(),
            latitude,
            longitude,
            issue_type,
            priority: issue_type.priority(),
            status: DEFAULT_STATUS.to_string(),
        }
    }

    /// Overrides the priority (e.g. one chosen earlier in a conversation).
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub(crate) fn into_report(self, report_id: u64) -> Report {
        Report {
            report_id,
            user: self.user,
            image_file: self.image_file,
            latitude: self.latitude,
            longitude: self.longitude,
            issue_type: self.issue_type,
            priority: self.priority,
            status: self.status,
        }
    }
}
