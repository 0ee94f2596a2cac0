use crate::model::task::Task;
use crate::model::view::ViewState;
use crate::ops::edit::format_due_date;
use crate::util::unicode;

const NAME_WIDTH: usize = 32;

/// One-line listing: `#12  HIGH      Task 12  assignee12@company.com  2024-05-01  [bug, feature]`
pub fn format_task_line(task: &Task) -> String {
    let mut line = format!(
        "#{:<4} {:<9} {}  {}  {}",
        task.id,
        task.priority.as_str(),
        unicode::fit_to_width(&task.name, NAME_WIDTH),
        task.assignee,
        task.created_at.format("%Y-%m-%d"),
    );
    if !task.labels.is_empty() {
        line.push_str(&format!("  [{}]", task.labels.join(", ")));
    }
    line
}

/// Header line summarizing the view a listing was derived from
pub fn format_view_header(view: &ViewState, shown: usize) -> String {
    let mut header = format!(
        "{} ({}) sorted by {} {}",
        view.tab.title(),
        shown,
        view.sort_field.label(),
        view.sort_order.arrow()
    );
    if !view.search_query.is_empty() {
        header.push_str(&format!("  /{}", view.search_query));
    }
    header
}

/// Multi-line detail for `td show`
pub fn format_task_detail(task: &Task) -> Vec<String> {
    let mut lines = vec![
        format!("#{} {}", task.id, task.name),
        format!("status: {}", task.status),
        format!("priority: {}", task.priority),
    ];
    if !task.assignee.is_empty() {
        lines.push(format!("assignee: {}", task.assignee));
    }
    if !task.labels.is_empty() {
        lines.push(format!("labels: {}", task.labels.join(", ")));
    }
    if task.due_date.is_some() {
        lines.push(format!("due: {}", format_due_date(task.due_date.as_ref())));
    }
    lines.push(format!("created: {}", task.created_at.to_rfc3339()));
    lines.push(format!("updated: {}", task.updated_at.to_rfc3339()));
    if !task.comment.is_empty() {
        lines.push(format!("comment: {}", task.comment));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::{Priority, Status};
    use crate::model::view::{SortField, SortOrder, Tab};
    use chrono::{TimeZone, Utc};

    fn sample() -> Task {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        let mut task = Task::new(12, "Task 12", Status::Open, Priority::High, now);
        task.assignee = "assignee12@company.com".into();
        task.labels = vec!["bug".into(), "feature".into()];
        task
    }

    #[test]
    fn task_line_columns() {
        let line = format_task_line(&sample());
        assert!(line.starts_with("#12   HIGH      Task 12"));
        assert!(line.contains("assignee12@company.com  2024-05-01"));
        assert!(line.ends_with("[bug, feature]"));
    }

    #[test]
    fn long_names_are_truncated() {
        let mut task = sample();
        task.name = "x".repeat(80);
        let line = format_task_line(&task);
        assert!(line.contains('\u{2026}'));
        assert!(!line.contains(&"x".repeat(40)));
    }

    #[test]
    fn view_header() {
        let view = ViewState {
            tab: Tab::InProgress,
            search_query: "deploy".into(),
            sort_field: SortField::Priority,
            sort_order: SortOrder::Descending,
        };
        assert_eq!(
            format_view_header(&view, 3),
            "In Progress (3) sorted by priority \u{2193}  /deploy"
        );
    }

    #[test]
    fn detail_skips_empty_fields() {
        let mut task = sample();
        task.labels.clear();
        task.assignee.clear();
        let lines = format_task_detail(&task);
        assert_eq!(lines[0], "#12 Task 12");
        assert!(!lines.iter().any(|l| l.starts_with("labels:")));
        assert!(!lines.iter().any(|l| l.starts_with("assignee:")));
        assert!(!lines.iter().any(|l| l.starts_with("due:")));
        assert!(!lines.iter().any(|l| l.starts_with("comment:")));
    }
}
