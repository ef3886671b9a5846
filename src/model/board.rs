use std::path::PathBuf;

use super::config::{DashboardConfig, Settings};

/// A fully loaded dashboard directory
#[derive(Debug, Clone)]
pub struct Board {
    /// Directory holding settings.json
    pub root: PathBuf,
    /// Directory holding the per-day task files
    pub tasks_dir: PathBuf,
    /// Parsed settings.json
    pub settings: Settings,
    /// Parsed quotes.json
    pub quotes: Vec<String>,
    /// Parsed goalbuckets.toml (defaults when absent)
    pub config: DashboardConfig,
}
