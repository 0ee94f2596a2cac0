use crate::model::task::Task;

/// Default number of tasks revealed per page
pub const DEFAULT_PAGE_SIZE: usize = 30;

/// Client-side task collection: everything fetched, plus the slice that has
/// been paged in so far.
///
/// Only `visible` is ever shown or edited. `load_more` reveals the next page
/// of `all`; it is split into `begin_load_more` / `complete_load_more` so the
/// caller decides how long the "fetch" takes.
#[derive(Debug, Clone)]
pub struct TaskStore {
    all: Vec<Task>,
    visible: Vec<Task>,
    current_page: usize,
    page_size: usize,
    total_pages: usize,
    has_more: bool,
    loading: bool,
}

impl Default for TaskStore {
    fn default() -> Self {
        TaskStore::new(DEFAULT_PAGE_SIZE)
    }
}

impl TaskStore {
    /// An empty store. A page size of 0 is treated as 1.
    pub fn new(page_size: usize) -> Self {
        TaskStore {
            all: Vec::new(),
            visible: Vec::new(),
            current_page: 1,
            page_size: page_size.max(1),
            total_pages: 0,
            has_more: false,
            loading: false,
        }
    }

    /// Replace the whole collection and reveal the first page
    pub fn load(&mut self, tasks: Vec<Task>) {
        self.visible = tasks.iter().take(self.page_size).cloned().collect();
        self.total_pages = tasks.len().div_ceil(self.page_size);
        self.all = tasks;
        self.current_page = 1;
        self.has_more = self.current_page < self.total_pages;
        self.loading = false;
        tracing::debug!(
            total = self.all.len(),
            pages = self.total_pages,
            "task collection loaded"
        );
    }

    /// Start revealing the next page. Returns false (and does nothing) when
    /// there is nothing left or a load is already in flight.
    pub fn begin_load_more(&mut self) -> bool {
        if !self.has_more || self.loading {
            return false;
        }
        self.loading = true;
        true
    }

    /// Finish an in-flight load: append the next page and advance the cursor.
    /// No-op when nothing is in flight.
    pub fn complete_load_more(&mut self) {
        if !self.loading {
            return;
        }
        let start = (self.current_page * self.page_size).min(self.all.len());
        let end = (start + self.page_size).min(self.all.len());
        self.visible.extend_from_slice(&self.all[start..end]);
        self.current_page += 1;
        self.has_more = self.current_page < self.total_pages;
        self.loading = false;
        tracing::debug!(
            page = self.current_page,
            appended = end - start,
            has_more = self.has_more,
            "page appended"
        );
    }

    /// Begin and immediately complete a load (no latency)
    pub fn load_more_now(&mut self) -> bool {
        if self.begin_load_more() {
            self.complete_load_more();
            true
        } else {
            false
        }
    }

    /// Replace the visible task with the same id. Returns false when no
    /// visible task matches; the collection is left untouched in that case.
    pub fn update(&mut self, task: Task) -> bool {
        let Some(slot) = self.visible.iter_mut().find(|t| t.id == task.id) else {
            tracing::debug!(id = task.id, "update ignored: task not in visible page");
            return false;
        };
        // Keep the backing copy in sync so a reload of this page can't revert it
        if let Some(backing) = self.all.iter_mut().find(|t| t.id == task.id) {
            *backing = task.clone();
        }
        *slot = task;
        true
    }

    pub fn find(&self, id: u64) -> Option<&Task> {
        self.visible.iter().find(|t| t.id == id)
    }

    pub fn visible(&self) -> &[Task] {
        &self.visible
    }

    pub fn all(&self) -> &[Task] {
        &self.all
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::{Priority, Status};
    use chrono::{TimeZone, Utc};

    fn tasks(n: u64) -> Vec<Task> {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        (1..=n)
            .map(|i| Task::new(i, format!("Task {}", i), Status::Open, Priority::Low, now))
            .collect()
    }

    #[test]
    fn load_reveals_first_page() {
        let mut store = TaskStore::new(30);
        store.load(tasks(200));
        assert_eq!(store.visible().len(), 30);
        assert_eq!(store.all().len(), 200);
        assert_eq!(store.current_page(), 1);
        assert_eq!(store.total_pages(), 7);
        assert!(store.has_more());
        assert!(!store.is_loading());
    }

    #[test]
    fn load_smaller_than_page() {
        let mut store = TaskStore::new(30);
        store.load(tasks(10));
        assert_eq!(store.visible().len(), 10);
        assert_eq!(store.total_pages(), 1);
        assert!(!store.has_more());
        assert!(!store.begin_load_more());
    }

    #[test]
    fn load_empty() {
        let mut store = TaskStore::new(30);
        store.load(Vec::new());
        assert!(store.visible().is_empty());
        assert_eq!(store.total_pages(), 0);
        assert!(!store.has_more());
    }

    #[test]
    fn load_more_appends_next_page() {
        let mut store = TaskStore::new(30);
        store.load(tasks(200));
        assert!(store.begin_load_more());
        assert!(store.is_loading());
        store.complete_load_more();
        assert_eq!(store.visible().len(), 60);
        assert_eq!(store.visible()[30].id, 31);
        assert_eq!(store.current_page(), 2);
        assert!(!store.is_loading());
    }

    #[test]
    fn repeated_requests_while_loading_are_ignored() {
        let mut store = TaskStore::new(30);
        store.load(tasks(200));
        assert!(store.begin_load_more());
        assert!(!store.begin_load_more());
        assert!(!store.begin_load_more());
        store.complete_load_more();
        // A stray completion with nothing in flight does nothing
        store.complete_load_more();
        assert_eq!(store.visible().len(), 60);
        assert_eq!(store.current_page(), 2);
    }

    #[test]
    fn load_more_until_exhausted() {
        let mut store = TaskStore::new(30);
        store.load(tasks(200));
        let mut cycles = 0;
        while store.load_more_now() {
            cycles += 1;
        }
        assert_eq!(cycles, 6);
        assert_eq!(store.visible().len(), 200);
        assert!(!store.has_more());
        assert_eq!(store.current_page(), 7);
    }

    #[test]
    fn reload_resets_cursor() {
        let mut store = TaskStore::new(30);
        store.load(tasks(200));
        store.load_more_now();
        store.load(tasks(50));
        assert_eq!(store.current_page(), 1);
        assert_eq!(store.visible().len(), 30);
        assert!(store.has_more());
    }

    #[test]
    fn update_replaces_visible_entry() {
        let mut store = TaskStore::new(30);
        store.load(tasks(200));
        let mut edited = store.find(5).unwrap().clone();
        edited.priority = Priority::High;
        assert!(store.update(edited));
        assert_eq!(store.find(5).unwrap().priority, Priority::High);
        assert_eq!(store.visible().len(), 30);
        assert_eq!(store.all().len(), 200);
        assert_eq!(store.visible()[4].id, 5);
    }

    #[test]
    fn update_of_unpaged_task_is_ignored() {
        let mut store = TaskStore::new(30);
        store.load(tasks(200));
        let mut edited = store.all()[150].clone();
        edited.name = "changed".into();
        assert!(!store.update(edited));
        assert_eq!(store.all()[150].name, "Task 151");
        assert_eq!(store.visible().len(), 30);
    }

    #[test]
    fn update_survives_paging() {
        let mut store = TaskStore::new(2);
        store.load(tasks(4));
        let mut edited = store.find(1).unwrap().clone();
        edited.name = "renamed".into();
        store.update(edited);
        store.load_more_now();
        assert_eq!(store.visible().len(), 4);
        assert_eq!(store.visible()[0].name, "renamed");
    }

    #[test]
    fn zero_page_size_is_clamped() {
        let store = TaskStore::new(0);
        assert_eq!(store.page_size(), 1);
    }
}
