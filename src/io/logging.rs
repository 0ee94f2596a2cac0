use std::fs::{self, OpenOptions};
use std::io::IsTerminal;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Environment variable holding a filter directive; overrides the config level
pub const LOG_ENV: &str = "TASKDASH_LOG";

fn env_filter(config_level: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(config_level.unwrap_or("warn")))
        .unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Log to a file. Used while the TUI owns the terminal.
pub fn init_file_logging(path: &Path, config_level: Option<&str>) -> Result<(), std::io::Error> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let init_result = tracing_subscriber::fmt()
        .with_env_filter(env_filter(config_level))
        .with_target(true)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
    if let Err(err) = init_result {
        tracing::debug!(error = %err, "tracing subscriber already set, continuing");
    }
    Ok(())
}

/// Log to stderr. Used by the non-interactive subcommands.
pub fn init_stderr_logging(config_level: Option<&str>) {
    let init_result = tracing_subscriber::fmt()
        .with_env_filter(env_filter(config_level))
        .with_target(true)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .try_init();
    if let Err(err) = init_result {
        tracing::debug!(error = %err, "tracing subscriber already set, continuing");
    }
}
