use chrono::{DateTime, NaiveDate, Utc};

use crate::model::task::{Priority, Status, Task};

/// Error type for edit dialog input
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    #[error("invalid due date {0:?}: expected YYYY-MM-DD")]
    InvalidDate(String),
}

/// Result of asking the dialog to save
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The status changed: a comment must be confirmed first
    NeedsComment,
    /// Ready to write back to the store
    Commit(Task),
}

/// An open edit dialog: an independent copy of one task plus the comment gate.
///
/// The snapshot is only written back when `request_save` or `confirm` hands
/// out a committed task. Dropping the session discards the edits.
#[derive(Debug, Clone)]
pub struct EditSession {
    original: Task,
    snapshot: Task,
    /// Status at the moment the dialog opened
    original_status: Status,
    comment: String,
    confirming: bool,
}

impl EditSession {
    pub fn open(task: &Task) -> Self {
        EditSession {
            original: task.clone(),
            snapshot: task.clone(),
            original_status: task.status.clone(),
            comment: task.comment.clone(),
            confirming: false,
        }
    }

    pub fn task_id(&self) -> u64 {
        self.snapshot.id
    }

    pub fn snapshot(&self) -> &Task {
        &self.snapshot
    }

    pub fn original_status(&self) -> &Status {
        &self.original_status
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn is_confirming(&self) -> bool {
        self.confirming
    }

    /// True when any field differs from the task as it was opened
    pub fn is_dirty(&self) -> bool {
        self.snapshot != self.original
    }

    pub fn status_changed(&self) -> bool {
        self.snapshot.status != self.original_status
    }

    pub fn set_name(&mut self, name: &str) {
        self.snapshot.name = name.to_string();
    }

    /// Comma-separated input. Entries are trimmed and empty ones dropped;
    /// duplicates are kept.
    pub fn set_labels(&mut self, input: &str) {
        self.snapshot.labels = input
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
    }

    pub fn set_status(&mut self, status: Status) {
        self.snapshot.status = status;
    }

    pub fn set_priority(&mut self, priority: Priority) {
        self.snapshot.priority = priority;
    }

    pub fn set_assignee(&mut self, assignee: &str) {
        self.snapshot.assignee = assignee.trim().to_string();
    }

    /// `YYYY-MM-DD` (midnight UTC) or empty to clear
    pub fn set_due_date(&mut self, input: &str) -> Result<(), EditError> {
        self.snapshot.due_date = parse_due_date(input)?;
        Ok(())
    }

    pub fn comment_input(&mut self, text: &str) {
        self.comment = text.to_string();
    }

    /// Ask to save. A status change needs a comment; anything else commits
    /// right away with whatever comment is staged (possibly empty).
    pub fn request_save(&mut self, now: DateTime<Utc>) -> SaveOutcome {
        if self.status_changed() {
            self.confirming = true;
            return SaveOutcome::NeedsComment;
        }
        SaveOutcome::Commit(self.committed(now))
    }

    /// Whether the confirm action is enabled
    pub fn can_confirm(&self) -> bool {
        !self.comment.trim().is_empty()
    }

    /// Confirm the comment. Returns None while the comment is blank.
    pub fn confirm(&mut self, now: DateTime<Utc>) -> Option<Task> {
        if !self.can_confirm() {
            return None;
        }
        self.confirming = false;
        Some(self.committed(now))
    }

    /// Back out of the comment prompt without saving; the staged comment is cleared
    pub fn cancel_confirm(&mut self) {
        self.confirming = false;
        self.comment.clear();
    }

    fn committed(&self, now: DateTime<Utc>) -> Task {
        let mut task = self.snapshot.clone();
        task.comment = self.comment.clone();
        task.updated_at = now;
        task
    }
}

/// Parse a dialog due date: empty clears it
pub fn parse_due_date(input: &str) -> Result<Option<DateTime<Utc>>, EditError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    let date = NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|_| EditError::InvalidDate(input.to_string()))?;
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| EditError::InvalidDate(input.to_string()))?;
    Ok(Some(midnight.and_utc()))
}

/// Format a due date the way the dialog edits it
pub fn format_due_date(due: Option<&DateTime<Utc>>) -> String {
    due.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}
