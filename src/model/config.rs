use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Configuration from taskdash.toml. Every section is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub state: StateConfig,
    #[serde(default)]
    pub log: LogConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Where tasks come from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Task listing endpoint, e.g. `http://localhost:3000/api/tasks`
    #[serde(default)]
    pub url: Option<String>,
    /// JSON file holding a listing response body (takes precedence over `url`)
    #[serde(default)]
    pub file: Option<PathBuf>,
    /// `limit` query parameter sent with the initial fetch
    #[serde(default = "default_limit")]
    pub limit: usize,
    /// HTTP timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig {
            url: None,
            file: None,
            limit: default_limit(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_limit() -> usize {
    200
}

fn default_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Tasks revealed per page of infinite scroll
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Delay before a requested page is appended
    #[serde(default = "default_load_latency_ms")]
    pub load_latency_ms: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            page_size: default_page_size(),
            load_latency_ms: default_load_latency_ms(),
        }
    }
}

fn default_page_size() -> usize {
    30
}

fn default_load_latency_ms() -> u64 {
    1000
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StateConfig {
    /// Directory for task-store.json and the log file (default: ./.taskdash)
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogConfig {
    /// Filter directive, e.g. "info" or "taskdash=debug". TASKDASH_LOG wins.
    #[serde(default)]
    pub level: Option<String>,
    /// Log file for the TUI (default: <state dir>/taskdash.log)
    #[serde(default)]
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UiConfig {
    #[serde(default)]
    pub show_key_hints: bool,
    /// Theme overrides, e.g. `background = "#000000"`
    #[serde(default)]
    pub colors: HashMap<String, String>,
    /// Per-priority badge colors keyed by wire name (`BLOCKER = "#FF0000"`)
    #[serde(default)]
    pub priority_colors: HashMap<String, String>,
    /// Per-label colors, in the order they should appear in help output
    #[serde(default)]
    pub label_colors: IndexMap<String, String>,
}

impl Config {
    /// Directory holding persisted state and logs
    pub fn state_dir(&self) -> PathBuf {
        self.state
            .dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(".taskdash"))
    }

    pub fn log_file(&self) -> PathBuf {
        self.log
            .file
            .clone()
            .unwrap_or_else(|| self.state_dir().join("taskdash.log"))
    }
}
