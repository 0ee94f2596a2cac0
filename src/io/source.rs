//! Client side of the task listing API.
//!
//! The API serves `{ tasks, pagination }` for `GET ?status=&limit=&offset=`.
//! Callers go through [`fetch_or_empty`], which turns every failure into an
//! empty page so the dashboard always has something to render.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::model::task::{Status, Task};

/// Default `limit` for a listing request
pub const DEFAULT_LIMIT: usize = 200;

/// Error type for fetching tasks
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        source: reqwest::Error,
    },
    #[error("{url} returned HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse task listing: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("no task source configured (set source.url or source.file, or pass --url/--file)")]
    NotConfigured,
}

/// Query parameters for a listing request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskQuery {
    pub status: Option<Status>,
    pub limit: usize,
    pub offset: usize,
}

impl Default for TaskQuery {
    fn default() -> Self {
        TaskQuery {
            status: None,
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

impl TaskQuery {
    /// Query-string pairs in the order the API documents them
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(status) = &self.status {
            params.push(("status", status.as_str().to_string()));
        }
        params.push(("limit", self.limit.to_string()));
        params.push(("offset", self.offset.to_string()));
        params
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub total: usize,
    pub has_next: bool,
    pub page_size: usize,
    pub offset: usize,
}

/// One response from the listing API
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPage {
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub pagination: Pagination,
}

impl TaskPage {
    /// No tasks, zeroed pagination
    pub fn empty() -> Self {
        TaskPage::default()
    }

    /// Apply a query to an in-memory task list the way the API does
    pub fn from_tasks(tasks: &[Task], query: &TaskQuery) -> Self {
        let matching: Vec<&Task> = tasks
            .iter()
            .filter(|t| query.status.as_ref().is_none_or(|s| &t.status == s))
            .collect();
        let total = matching.len();
        let page: Vec<Task> = matching
            .into_iter()
            .skip(query.offset)
            .take(query.limit)
            .cloned()
            .collect();
        TaskPage {
            tasks: page,
            pagination: Pagination {
                total,
                has_next: total > query.offset + query.limit,
                page_size: query.limit,
                offset: query.offset,
            },
        }
    }
}

/// Anything that can answer a listing request
pub trait TaskSource {
    fn fetch(&self, query: &TaskQuery) -> Result<TaskPage, SourceError>;

    /// Human-readable origin, for logs and the status row
    fn describe(&self) -> String;
}

/// Live API over HTTP
pub struct HttpSource {
    url: String,
    client: reqwest::blocking::Client,
}

impl HttpSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, SourceError> {
        let url = url.into();
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| SourceError::Http {
                url: url.clone(),
                source,
            })?;
        Ok(HttpSource { url, client })
    }
}

impl TaskSource for HttpSource {
    fn fetch(&self, query: &TaskQuery) -> Result<TaskPage, SourceError> {
        let http_err = |source| SourceError::Http {
            url: self.url.clone(),
            source,
        };
        let resp = self
            .client
            .get(&self.url)
            .query(&query.params())
            .send()
            .map_err(http_err)?;
        let status = resp.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                url: self.url.clone(),
                status,
            });
        }
        let body = resp.text().map_err(http_err)?;
        Ok(serde_json::from_str(&body)?)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// A saved listing response on disk. Queries are applied locally.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileSource { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TaskSource for FileSource {
    fn fetch(&self, query: &TaskQuery) -> Result<TaskPage, SourceError> {
        let text = fs::read_to_string(&self.path).map_err(|e| SourceError::ReadError {
            path: self.path.clone(),
            source: e,
        })?;
        let page: TaskPage = serde_json::from_str(&text)?;
        Ok(TaskPage::from_tasks(&page.tasks, query))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Fetch, absorbing any failure into an empty page
pub fn fetch_or_empty(source: &dyn TaskSource, query: &TaskQuery) -> TaskPage {
    match source.fetch(query) {
        Ok(page) => {
            tracing::info!(
                source = %source.describe(),
                count = page.tasks.len(),
                total = page.pagination.total,
                "fetched tasks"
            );
            page
        }
        Err(e) => {
            tracing::warn!(source = %source.describe(), error = %e, "fetch failed, showing no tasks");
            TaskPage::empty()
        }
    }
}

/// Pick a source: an explicit file wins over a URL
pub fn open_source(
    file: Option<&Path>,
    url: Option<&str>,
    timeout: Duration,
) -> Result<Box<dyn TaskSource>, SourceError> {
    if let Some(path) = file {
        return Ok(Box::new(FileSource::new(path)));
    }
    if let Some(url) = url {
        return Ok(Box::new(HttpSource::new(url, timeout)?));
    }
    Err(SourceError::NotConfigured)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::Priority;
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn tasks() -> Vec<Task> {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        (1..=10)
            .map(|i| {
                let status = if i % 2 == 0 { Status::Open } else { Status::Closed };
                Task::new(i, format!("Task {}", i), status, Priority::Low, now)
            })
            .collect()
    }

    struct FailingSource;

    impl TaskSource for FailingSource {
        fn fetch(&self, _query: &TaskQuery) -> Result<TaskPage, SourceError> {
            Err(SourceError::NotConfigured)
        }

        fn describe(&self) -> String {
            "failing".into()
        }
    }

    #[test]
    fn query_params() {
        let q = TaskQuery {
            status: Some(Status::InProgress),
            limit: 30,
            offset: 60,
        };
        assert_eq!(
            q.params(),
            vec![
                ("status", "IN_PROGRESS".to_string()),
                ("limit", "30".to_string()),
                ("offset", "60".to_string()),
            ]
        );
        assert_eq!(TaskQuery::default().params().len(), 2);
    }

    #[test]
    fn from_tasks_paginates_like_the_api() {
        let all = tasks();
        let page = TaskPage::from_tasks(
            &all,
            &TaskQuery {
                status: Some(Status::Open),
                limit: 3,
                offset: 0,
            },
        );
        assert_eq!(page.tasks.iter().map(|t| t.id).collect::<Vec<_>>(), vec![2, 4, 6]);
        assert_eq!(page.pagination.total, 5);
        assert!(page.pagination.has_next);

        let last = TaskPage::from_tasks(
            &all,
            &TaskQuery {
                status: Some(Status::Open),
                limit: 3,
                offset: 3,
            },
        );
        assert_eq!(last.tasks.len(), 2);
        assert!(!last.pagination.has_next);
    }

    #[test]
    fn failures_become_empty_page() {
        let page = fetch_or_empty(&FailingSource, &TaskQuery::default());
        assert_eq!(page, TaskPage::empty());
        assert_eq!(page.pagination.total, 0);
        assert!(!page.pagination.has_next);
    }

    #[test]
    fn file_source_reads_response_body() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.json");
        let body = TaskPage::from_tasks(&tasks(), &TaskQuery::default());
        fs::write(&path, serde_json::to_string(&body).unwrap()).unwrap();

        let source = FileSource::new(&path);
        let page = source.fetch(&TaskQuery::default()).unwrap();
        assert_eq!(page.tasks.len(), 10);
        assert_eq!(page.pagination.total, 10);
    }

    #[test]
    fn file_source_missing_or_malformed_degrades() {
        let dir = TempDir::new().unwrap();
        let missing = FileSource::new(dir.path().join("nope.json"));
        assert!(matches!(
            missing.fetch(&TaskQuery::default()),
            Err(SourceError::ReadError { .. })
        ));
        assert_eq!(fetch_or_empty(&missing, &TaskQuery::default()), TaskPage::empty());

        let bad_path = dir.path().join("bad.json");
        fs::write(&bad_path, "{ not json").unwrap();
        let bad = FileSource::new(&bad_path);
        assert!(matches!(bad.fetch(&TaskQuery::default()), Err(SourceError::Parse(_))));
    }

    #[test]
    fn open_source_prefers_file() {
        let src = open_source(
            Some(Path::new("tasks.json")),
            Some("http://localhost:3000/api/tasks"),
            Duration::from_secs(1),
        )
        .unwrap();
        assert_eq!(src.describe(), "tasks.json");
        assert!(matches!(
            open_source(None, None, Duration::from_secs(1)),
            Err(SourceError::NotConfigured)
        ));
    }
}
