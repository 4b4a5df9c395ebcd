//! User-facing message texts.

use report_store::{IssueType, Report};

pub const WELCOME: &str = "👋 Welcome to CivicWatch!\n\n\
Report civic issues like potholes, broken streetlights, or overflowing trash bins.\n\n\
📌 To submit a report, use /report\n\
📌 To check status of your report, use /my_status <report_id>";

pub const SELECT_TYPE: &str = "Select the type of issue:";
pub const SELECT_TYPE_AGAIN: &str = "Please pick one of the issue types below:";
pub const SEND_PHOTO: &str = "Now send a photo of the issue as proof:";
pub const STILL_AWAITING_PHOTO: &str = "Please send a photo of the issue to continue your report.";
pub const NO_GPS_SHARE_LOCATION: &str = "No GPS found. Please share your location:";
pub const STILL_AWAITING_LOCATION: &str = "Please share your location to finish your report.";
pub const SEND_LOCATION_BUTTON: &str = "Send Location";
pub const NO_REPORT_IN_PROGRESS: &str = "No report in progress. Use /report to start over.";
pub const STATUS_USAGE: &str = "Usage: /my_status <report_id>";

/// Labels for the issue-type keyboard, in display order.
pub fn issue_type_options() -> Vec<String> {
    IssueType::ALL.iter().map(|t| t.to_string()).collect()
}

/// Confirmation sent once a report is persisted.
pub fn report_submitted(report: &Report) -> String {
    let location = match (report.latitude, report.longitude) {
        (Some(lat), Some(lon)) => format!("{:.6}, {:.6}", lat, lon),
        _ => "unknown".to_string(),
    };
    format!(
        "✅ Report submitted!\nID: {}\nType: {}\nPriority: {}\nLocation: {}\nStatus: {}",
        report.report_id, report.issue_type, report.priority, location, report.status
    )
}

/// Reply to a successful `/my_status` lookup.
pub fn report_status(report: &Report) -> String {
    format!(
        "Report ID {}\nType: {}\nPriority: {}\nStatus: {}",
        report.report_id, report.issue_type, report.priority, report.status
    )
}

/// Reply when the id is unknown or belongs to someone else; the two cases read the same.
pub fn report_not_found(raw_id: &str) -> String {
    format!("No report found with ID {} for you.", raw_id)
}
