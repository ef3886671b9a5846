use std::fs;
use std::path::Path;

use crate::cli::commands::InitArgs;
use crate::io::settings_io::{self, CONFIG_FILE, QUOTES_FILE, SETTINGS_FILE};
use crate::model::config::Settings;

const DEFAULT_BUCKETS: [&str; 3] = ["Health", "Work", "Home"];

const QUOTES_TEMPLATE: &str = r#"[
  "Small steps every day.",
  "Done is better than perfect.",
  "You don't have to see the whole staircase, just take the first step."
]
"#;

const CONFIG_TEMPLATE: &str = r##"# goalbuckets preferences. Every setting is optional.

[storage]
# Directory for the per-day task files, relative to this file
tasks_dir = "tasks"

[ui]
# show_key_hints = false
# default_granularity = "day"     # "day", "week", "month" or "year"
#
# [ui.colors]
# background = "#0C001B"
# text = "#A09BFE"
# text_bright = "#FFFFFF"
# highlight = "#FB4196"
# dim = "#5A5580"
# green = "#44FF88"
#
# [ui.bucket_colors]
# Health = "#44FF88"
# Work = "#44DDFF"
"##;

/// Build the initial settings from --bucket flags, or the defaults.
fn initial_settings(buckets: &[String]) -> Settings {
    let buckets = if buckets.is_empty() {
        DEFAULT_BUCKETS.iter().map(|b| b.to_string()).collect()
    } else {
        buckets.iter().map(|b| b.trim().to_string()).collect()
    };
    Settings {
        buckets,
        recurring_tasks: Vec::new(),
    }
}

/// Write a fresh dashboard into `root`.
pub fn init_dashboard(root: &Path, args: &InitArgs) -> Result<Settings, Box<dyn std::error::Error>> {
    if root.join(SETTINGS_FILE).exists() && !args.force {
        return Err("dashboard already exists here (use --force to overwrite settings.json)".into());
    }

    let settings = initial_settings(&args.buckets);
    if settings.buckets.iter().any(|b| b.is_empty()) {
        return Err("bucket names cannot be blank".into());
    }
    settings_io::validate_settings(&settings)?;

    fs::create_dir_all(root.join("tasks"))?;
    fs::write(
        root.join(SETTINGS_FILE),
        serde_json::to_string_pretty(&settings)? + "\n",
    )?;
    // Keep the user's quotes and preferences on --force
    if !root.join(QUOTES_FILE).exists() {
        fs::write(root.join(QUOTES_FILE), QUOTES_TEMPLATE)?;
    }
    if !root.join(CONFIG_FILE).exists() {
        fs::write(root.join(CONFIG_FILE), CONFIG_TEMPLATE)?;
    }
    Ok(settings)
}

pub fn cmd_init(args: InitArgs, dir: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let root = match dir {
        Some(d) => d.to_path_buf(),
        None => std::env::current_dir()?,
    };

    if !args.force
        && let Some(parent) = root.parent()
        && let Ok(parent_root) = settings_io::discover_root(parent)
    {
        eprintln!("Note: parent dashboard found at {}/", parent_root.display());
        eprintln!("Creating new dashboard in {}/", root.display());
    }

    let settings = init_dashboard(&root, &args)?;
    println!("Initialized goalbuckets dashboard");
    for bucket in &settings.buckets {
        println!("  bucket: {}", bucket);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::config::DashboardConfig;
    use tempfile::TempDir;

    fn args(buckets: &[&str], force: bool) -> InitArgs {
        InitArgs {
            buckets: buckets.iter().map(|b| b.to_string()).collect(),
            force,
        }
    }

    #[test]
    fn init_writes_a_loadable_dashboard() {
        let tmp = TempDir::new().unwrap();
        init_dashboard(tmp.path(), &args(&["Health", "Work"], false)).unwrap();

        let board = settings_io::load_board(tmp.path()).unwrap();
        assert_eq!(board.settings.buckets, vec!["Health", "Work"]);
        assert_eq!(board.quotes.len(), 3);
        assert!(board.tasks_dir.is_dir());
    }

    #[test]
    fn default_buckets() {
        let tmp = TempDir::new().unwrap();
        let settings = init_dashboard(tmp.path(), &args(&[], false)).unwrap();
        assert_eq!(settings.buckets, vec!["Health", "Work", "Home"]);
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let tmp = TempDir::new().unwrap();
        init_dashboard(tmp.path(), &args(&["A"], false)).unwrap();
        assert!(init_dashboard(tmp.path(), &args(&["B"], false)).is_err());

        fs::write(tmp.path().join(QUOTES_FILE), r#"["mine"]"#).unwrap();
        init_dashboard(tmp.path(), &args(&["B"], true)).unwrap();
        let board = settings_io::load_board(tmp.path()).unwrap();
        assert_eq!(board.settings.buckets, vec!["B"]);
        assert_eq!(board.quotes, vec!["mine"]);
    }

    #[test]
    fn rejects_invalid_buckets() {
        let tmp = TempDir::new().unwrap();
        assert!(init_dashboard(tmp.path(), &args(&["A", "A"], false)).is_err());
        assert!(init_dashboard(tmp.path(), &args(&["Holding Tank"], false)).is_err());
        assert!(init_dashboard(tmp.path(), &args(&["  "], false)).is_err());
        assert!(!tmp.path().join(SETTINGS_FILE).exists());
    }

    #[test]
    fn config_template_parses() {
        let config: DashboardConfig = toml::from_str(CONFIG_TEMPLATE).unwrap();
        assert_eq!(config.storage.tasks_dir, "tasks");
        assert!(!config.ui.show_key_hints);
    }
}
