use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::progress::Granularity;

/// Bucket list and recurring tasks from settings.json
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Bucket names in display order
    pub buckets: Vec<String>,
    #[serde(default)]
    pub recurring_tasks: Vec<RecurringTask>,
}

/// A task template copied into every new day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurringTask {
    pub task: String,
    pub bucket: String,
}

impl Settings {
    /// Whether `bucket` is one of the configured buckets
    pub fn has_bucket(&self, bucket: &str) -> bool {
        self.buckets.iter().any(|b| b == bucket)
    }
}

/// Optional preferences from goalbuckets.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the per-day files, relative to the dashboard root
    #[serde(default = "default_tasks_dir")]
    pub tasks_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            tasks_dir: default_tasks_dir(),
        }
    }
}

fn default_tasks_dir() -> String {
    "tasks".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UiConfig {
    #[serde(default)]
    pub show_key_hints: bool,
    /// Granularity the Trends view opens with
    #[serde(default)]
    pub default_granularity: Granularity,
    #[serde(default)]
    pub colors: HashMap<String, String>,
    /// Per-bucket chart colors, keyed by bucket name
    #[serde(default)]
    pub bucket_colors: HashMap<String, String>,
}
