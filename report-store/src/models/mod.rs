//! Report models: the stored record, the append input, and the issue/priority vocabulary.

mod issue;
mod report;

pub use issue::{IssueType, Priority};
pub use report::{NewReport, Report, DEFAULT_STATUS};
