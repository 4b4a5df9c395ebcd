use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Kind of civic issue a report describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IssueType {
    Pothole,
    Streetlight,
    Trash,
    Other,
}

impl IssueType {
    /// All types in the order they are offered to users.
    pub const ALL: [IssueType; 4] = [
        IssueType::Pothole,
        IssueType::Streetlight,
        IssueType::Trash,
        IssueType::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            IssueType::Pothole => "Pothole",
            IssueType::Streetlight => "Streetlight",
            IssueType::Trash => "Trash",
            IssueType::Other => "Other",
        }
    }

    /// Fixed triage priority for this type.
    pub fn priority(self) -> Priority {
        match self {
            IssueType::Pothole => Priority::High,
            IssueType::Streetlight => Priority::Medium,
            IssueType::Trash => Priority::Low,
            IssueType::Other => Priority::Medium,
        }
    }
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IssueType {
    type Err = String;

    /// Case-insensitive match on the type name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        IssueType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown issue type: {}", s))
    }
}

/// Triage priority derived from the issue type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Priority for a free-form type name; anything unrecognized is Medium.
    pub fn for_type_name(name: &str) -> Priority {
        name.parse::<IssueType>()
            .map(IssueType::priority)
            .unwrap_or(Priority::Medium)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
