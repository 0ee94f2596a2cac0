use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::model::task::Task;
use crate::model::view::{SortField, SortOrder, Tab, ViewState};

/// Namespace of the persisted client state (file stem)
pub const STATE_KEY: &str = "task-store";

/// Error type for saving state
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not serialize state: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Persisted dashboard state (written to `<state dir>/task-store.json`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
    /// Paged-in tasks at the time of the last write
    pub tasks: Vec<Task>,
    pub search_query: String,
    pub sort_field: String,
    /// 1 ascending, -1 descending
    pub sort_order: i8,
    pub current_tab: String,
}

impl PersistedState {
    pub fn capture(view: &ViewState, tasks: &[Task]) -> Self {
        PersistedState {
            tasks: tasks.to_vec(),
            search_query: view.search_query.clone(),
            sort_field: view.sort_field.as_str().to_string(),
            sort_order: view.sort_order.as_sign(),
            current_tab: view.tab.as_str().to_string(),
        }
    }

    /// The view part, or None when any field holds a value we can't use
    pub fn view_state(&self) -> Option<ViewState> {
        Some(ViewState {
            tab: Tab::parse(&self.current_tab)?,
            search_query: self.search_query.clone(),
            sort_field: SortField::parse(&self.sort_field),
            sort_order: SortOrder::from_sign(self.sort_order)?,
        })
    }
}

pub fn state_path(state_dir: &Path) -> PathBuf {
    state_dir.join(format!("{}.json", STATE_KEY))
}

/// Read the persisted state. Missing, unreadable, or differently shaped
/// files all read as "no state".
pub fn read_state(state_dir: &Path) -> Option<PersistedState> {
    let path = state_path(state_dir);
    let content = fs::read_to_string(&path).ok()?;
    match serde_json::from_str(&content) {
        Ok(state) => Some(state),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "ignoring unreadable state file");
            None
        }
    }
}

/// Write the state atomically (temp file + rename), creating the directory if needed
pub fn write_state(state_dir: &Path, state: &PersistedState) -> Result<(), StateError> {
    let content = serde_json::to_string_pretty(state)?;
    let path = state_path(state_dir);
    let write_err = |source| StateError::WriteError {
        path: path.clone(),
        source,
    };
    fs::create_dir_all(state_dir).map_err(write_err)?;
    let mut tmp = NamedTempFile::new_in(state_dir).map_err(write_err)?;
    tmp.write_all(content.as_bytes()).map_err(write_err)?;
    tmp.flush().map_err(write_err)?;
    tmp.persist(&path).map_err(|e| write_err(e.error))?;
    Ok(())
}
