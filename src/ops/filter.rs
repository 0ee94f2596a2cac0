//! Derive the displayed task list from the paged-in tasks and the view state.
//!
//! Everything here is a pure function of its arguments. Tab switches, search
//! edits and sort changes only ever look at tasks already paged in, so a task
//! that matches but hasn't been loaded yet stays invisible until it is.

use std::cmp::Ordering;

use crate::model::task::{Status, Task};
use crate::model::view::{SortField, SortOrder, Tab, ViewState};

/// Tasks whose status equals `status`, in input order
pub fn filter_by_status<'a>(tasks: &'a [Task], status: &Status) -> Vec<&'a Task> {
    tasks.iter().filter(|t| &t.status == status).collect()
}

/// Keep tasks whose name contains `query`, ignoring case. An empty query keeps everything.
pub fn filter_by_search<'a>(tasks: Vec<&'a Task>, query: &str) -> Vec<&'a Task> {
    if query.is_empty() {
        return tasks;
    }
    let needle = query.to_lowercase();
    tasks
        .into_iter()
        .filter(|t| t.name.to_lowercase().contains(&needle))
        .collect()
}

/// Compare two tasks by `field` in ascending order.
/// Unsupported fields compare equal.
pub fn compare(a: &Task, b: &Task, field: &SortField) -> Ordering {
    match field {
        SortField::CreatedAt => a.created_at.cmp(&b.created_at),
        SortField::Priority => a.priority.rank().cmp(&b.priority.rank()),
        SortField::Other(_) => Ordering::Equal,
    }
}

/// Stable sort. Descending flips the comparator, so ties keep their input
/// order in both directions.
pub fn sort_tasks(tasks: &mut [&Task], field: &SortField, order: SortOrder) {
    tasks.sort_by(|a, b| {
        let ord = compare(a, b, field);
        match order {
            SortOrder::Ascending => ord,
            SortOrder::Descending => ord.reverse(),
        }
    });
}

/// Tasks for `tab`, narrowed by the view's search query and sorted by its sort settings
pub fn tasks_by_status<'a>(tasks: &'a [Task], view: &ViewState, tab: Tab) -> Vec<&'a Task> {
    let by_status = filter_by_status(tasks, &tab.status());
    let mut matched = filter_by_search(by_status, &view.search_query);
    sort_tasks(&mut matched, &view.sort_field, view.sort_order);
    matched
}

/// The list shown for the view's current tab
pub fn derive_view<'a>(tasks: &'a [Task], view: &ViewState) -> Vec<&'a Task> {
    tasks_by_status(tasks, view, view.tab)
}

/// Number of search matches on each tab
pub fn tab_counts(tasks: &[Task], view: &ViewState) -> [(Tab, usize); 3] {
    Tab::ALL.map(|tab| {
        let by_status = filter_by_status(tasks, &tab.status());
        (tab, filter_by_search(by_status, &view.search_query).len())
    })
}
