use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::Config;

/// Config file looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "taskdash.toml";

/// Error type for config loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Parse config text
pub fn parse_config(text: &str, path: &Path) -> Result<Config, ConfigError> {
    toml::from_str(text).map_err(|source| ConfigError::ParseError {
        path: path.to_path_buf(),
        source,
    })
}

/// Read a config file. An explicitly named file must exist; without one,
/// `./taskdash.toml` is used if present and defaults otherwise.
pub fn load_config(explicit: Option<&Path>, cwd: &Path) -> Result<Config, ConfigError> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => {
            let candidate = cwd.join(DEFAULT_CONFIG_FILE);
            if !candidate.exists() {
                return Ok(Config::default());
            }
            candidate
        }
    };
    let text = fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        source: e,
    })?;
    parse_config(&text, &path)
}
