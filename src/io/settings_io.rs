use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::model::board::Board;
use crate::model::config::{DashboardConfig, Settings};
use crate::model::task::HOLDING_TANK;

pub const SETTINGS_FILE: &str = "settings.json";
pub const QUOTES_FILE: &str = "quotes.json";
pub const CONFIG_FILE: &str = "goalbuckets.toml";

/// Error type for loading a dashboard's configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("not a goalbuckets dashboard: no settings.json found")]
    NotADashboard,
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("could not parse goalbuckets.toml: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("bucket listed twice in settings.json: {0}")]
    DuplicateBucket(String),
    #[error("\"Holding Tank\" is reserved and cannot be configured as a bucket")]
    ReservedBucket,
    #[error("recurring task {task:?} names unknown bucket {bucket:?}")]
    UnknownRecurringBucket { task: String, bucket: String },
}

/// Find the dashboard root by walking up from `start`, looking for a
/// directory containing settings.json.
pub fn discover_root(start: &Path) -> Result<PathBuf, ConfigError> {
    let mut current = start.to_path_buf();
    loop {
        if current.join(SETTINGS_FILE).is_file() {
            return Ok(current);
        }
        if !current.pop() {
            return Err(ConfigError::NotADashboard);
        }
    }
}

/// Load everything under `root`: settings, quotes and preferences.
pub fn load_board(root: &Path) -> Result<Board, ConfigError> {
    if !root.join(SETTINGS_FILE).is_file() {
        return Err(ConfigError::NotADashboard);
    }
    let settings = load_settings(root)?;
    let quotes = load_quotes(root)?;
    let config = load_config(root)?;
    let tasks_dir = root.join(&config.storage.tasks_dir);
    tracing::debug!(
        root = %root.display(),
        buckets = settings.buckets.len(),
        quotes = quotes.len(),
        "loaded dashboard"
    );
    Ok(Board {
        root: root.to_path_buf(),
        tasks_dir,
        settings,
        quotes,
        config,
    })
}

/// Read and validate settings.json
pub fn load_settings(root: &Path) -> Result<Settings, ConfigError> {
    let settings: Settings = read_json(&root.join(SETTINGS_FILE))?;
    validate_settings(&settings)?;
    Ok(settings)
}

/// Read quotes.json. The file must exist; an empty array is an empty pool.
pub fn load_quotes(root: &Path) -> Result<Vec<String>, ConfigError> {
    read_json(&root.join(QUOTES_FILE))
}

/// Read goalbuckets.toml, falling back to defaults when it is absent.
pub fn load_config(root: &Path) -> Result<DashboardConfig, ConfigError> {
    let path = root.join(CONFIG_FILE);
    if !path.exists() {
        return Ok(DashboardConfig::default());
    }
    let text = fs::read_to_string(&path).map_err(|e| ConfigError::Read {
        path: path.clone(),
        source: e,
    })?;
    Ok(toml::from_str(&text)?)
}

/// Check the bucket invariants: names unique, the Holding Tank not among
/// them, every recurring task pointing at a configured bucket.
pub fn validate_settings(settings: &Settings) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for bucket in &settings.buckets {
        if bucket == HOLDING_TANK {
            return Err(ConfigError::ReservedBucket);
        }
        if !seen.insert(bucket.as_str()) {
            return Err(ConfigError::DuplicateBucket(bucket.clone()));
        }
    }
    for recurring in &settings.recurring_tasks {
        if !seen.contains(recurring.bucket.as_str()) {
            return Err(ConfigError::UnknownRecurringBucket {
                task: recurring.task.clone(),
                bucket: recurring.bucket.clone(),
            });
        }
    }
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let text = fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_json::from_str(&text).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}
