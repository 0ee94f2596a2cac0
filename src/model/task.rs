use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Workflow status of a task. Each known status is one dashboard tab.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Status {
    Open,
    InProgress,
    Closed,
    /// A value the data source sent that we don't know about. Kept verbatim.
    Other(String),
}

impl Status {
    /// The three statuses that have a tab, in tab order
    pub const ALL: [Status; 3] = [Status::Open, Status::InProgress, Status::Closed];

    /// Wire name, e.g. `IN_PROGRESS`
    pub fn as_str(&self) -> &str {
        match self {
            Status::Open => "OPEN",
            Status::InProgress => "IN_PROGRESS",
            Status::Closed => "CLOSED",
            Status::Other(s) => s,
        }
    }

    /// Human label used in the tab bar and the edit dialog
    pub fn label(&self) -> &str {
        match self {
            Status::Open => "Open",
            Status::InProgress => "In Progress",
            Status::Closed => "Closed",
            Status::Other(s) => s,
        }
    }

    /// Exact wire name. Any other spelling is an unknown status.
    pub fn from_wire(s: &str) -> Option<Status> {
        match s {
            "OPEN" => Some(Status::Open),
            "IN_PROGRESS" => Some(Status::InProgress),
            "CLOSED" => Some(Status::Closed),
            _ => None,
        }
    }

    /// Parse user input such as `--tab in_progress`, case-insensitively
    pub fn parse(s: &str) -> Option<Status> {
        match s.to_ascii_uppercase().as_str() {
            "OPEN" => Some(Status::Open),
            "IN_PROGRESS" => Some(Status::InProgress),
            "CLOSED" => Some(Status::Closed),
            _ => None,
        }
    }

    /// Next known status (wraps). Unknown statuses step to Open.
    pub fn next(&self) -> Status {
        match self {
            Status::Open => Status::InProgress,
            Status::InProgress => Status::Closed,
            Status::Closed | Status::Other(_) => Status::Open,
        }
    }

    /// Previous known status (wraps). Unknown statuses step to Closed.
    pub fn prev(&self) -> Status {
        match self {
            Status::Open | Status::Other(_) => Status::Closed,
            Status::InProgress => Status::Open,
            Status::Closed => Status::InProgress,
        }
    }
}

impl From<String> for Status {
    fn from(s: String) -> Self {
        Status::from_wire(&s).unwrap_or(Status::Other(s))
    }
}

impl From<Status> for String {
    fn from(s: Status) -> Self {
        s.as_str().to_string()
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task priority. Ordered for sorting by the rank in `rank()`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
    Critical,
    Blocker,
    Trivial,
    /// Unknown value from the data source. Kept verbatim, ranks below everything.
    Other(String),
}

impl Priority {
    /// Known priorities in rank order
    pub const ALL: [Priority; 7] = [
        Priority::Low,
        Priority::Medium,
        Priority::High,
        Priority::Urgent,
        Priority::Critical,
        Priority::Blocker,
        Priority::Trivial,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Priority::Low => "LOW",
            Priority::Medium => "MEDIUM",
            Priority::High => "HIGH",
            Priority::Urgent => "URGENT",
            Priority::Critical => "CRITICAL",
            Priority::Blocker => "BLOCKER",
            Priority::Trivial => "TRIVIAL",
            Priority::Other(s) => s,
        }
    }

    /// Sort rank: LOW=1 .. TRIVIAL=7, unknown=0
    pub fn rank(&self) -> u8 {
        match self {
            Priority::Low => 1,
            Priority::Medium => 2,
            Priority::High => 3,
            Priority::Urgent => 4,
            Priority::Critical => 5,
            Priority::Blocker => 6,
            Priority::Trivial => 7,
            Priority::Other(_) => 0,
        }
    }

    /// Exact wire name. Any other spelling is an unknown priority.
    pub fn from_wire(s: &str) -> Option<Priority> {
        Priority::ALL.into_iter().find(|p| p.as_str() == s)
    }

    /// Parse user input, case-insensitively
    pub fn parse(s: &str) -> Option<Priority> {
        Priority::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s))
    }

    /// Next known priority in rank order (wraps)
    pub fn next(&self) -> Priority {
        let idx = self.rank() as usize % Priority::ALL.len();
        Priority::ALL[idx].clone()
    }

    /// Previous known priority in rank order (wraps)
    pub fn prev(&self) -> Priority {
        let rank = self.rank() as usize;
        let idx = if rank <= 1 { Priority::ALL.len() - 1 } else { rank - 2 };
        Priority::ALL[idx].clone()
    }
}

impl From<String> for Priority {
    fn from(s: String) -> Self {
        Priority::from_wire(&s).unwrap_or(Priority::Other(s))
    }
}

impl From<Priority> for String {
    fn from(p: Priority) -> Self {
        p.as_str().to_string()
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A task record as served by the task listing API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique, immutable identifier
    pub id: u64,
    pub name: String,
    /// Ordered labels; duplicates are allowed
    #[serde(default)]
    pub labels: Vec<String>,
    pub status: Status,
    pub priority: Priority,
    #[serde(default)]
    pub assignee: String,
    #[serde(default, deserialize_with = "deserialize_optional_time")]
    pub due_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Audit note from the last mutation (not a history)
    #[serde(default)]
    pub comment: String,
}

impl Task {
    /// Create a task with empty optional fields, stamped with `now`
    pub fn new(id: u64, name: impl Into<String>, status: Status, priority: Priority, now: DateTime<Utc>) -> Self {
        Task {
            id,
            name: name.into(),
            labels: Vec::new(),
            status,
            priority,
            assignee: String::new(),
            due_date: None,
            created_at: now,
            updated_at: now,
            comment: String::new(),
        }
    }
}

/// Accept a timestamp, `null`, or an empty string (the API uses `""` for "no date").
fn deserialize_optional_time<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => DateTime::parse_from_rfc3339(s)
            .map(|dt| Some(dt.with_timezone(&Utc)))
            .map_err(serde::de::Error::custom),
    }
}
