use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::model::progress::Granularity;

/// Persisted terminal dashboard state (written to .state.json)
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct UiState {
    /// Which view is showing ("today", "progress", "trends")
    pub view: String,
    /// Bucket the cursor was in
    #[serde(default)]
    pub cursor_bucket: Option<String>,
    /// Position within that bucket
    #[serde(default)]
    pub cursor_position: usize,
    /// Trends view granularity (None = use config default)
    #[serde(default)]
    pub granularity: Option<Granularity>,
}

/// Read .state.json from the dashboard root
pub fn read_ui_state(root: &Path) -> Option<UiState> {
    let path = root.join(".state.json");
    let content = fs::read_to_string(&path).ok()?;
    serde_json::from_str(&content).ok()
}

/// Write .state.json to the dashboard root
pub fn write_ui_state(root: &Path, state: &UiState) -> Result<(), std::io::Error> {
    let path = root.join(".state.json");
    let content = serde_json::to_string_pretty(state)?;
    fs::write(&path, content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn write_and_read_round_trip() {
        let dir = TempDir::new().unwrap();
        let state = UiState {
            view: "trends".into(),
            cursor_bucket: Some("Work".into()),
            cursor_position: 2,
            granularity: Some(Granularity::Month),
        };
        write_ui_state(dir.path(), &state).unwrap();
        assert_eq!(read_ui_state(dir.path()), Some(state));
    }

    #[test]
    fn read_missing_file_returns_none() {
        let dir = TempDir::new().unwrap();
        assert!(read_ui_state(dir.path()).is_none());
    }

    #[test]
    fn read_malformed_json_returns_none() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(".state.json"), "not json {{{").unwrap();
        assert!(read_ui_state(dir.path()).is_none());
    }

    #[test]
    fn serde_defaults_on_minimal_object() {
        let state: UiState = serde_json::from_str(r#"{"view":"today"}"#).unwrap();
        assert_eq!(state.view, "today");
        assert!(state.cursor_bucket.is_none());
        assert_eq!(state.cursor_position, 0);
        assert!(state.granularity.is_none());
    }
}
