use std::env;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Log file used while the terminal dashboard owns the screen
pub const LOG_FILE: &str = ".goalbuckets.log";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env("GB_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if env::var("DEBUG").is_ok() {
            "goalbuckets=debug,warn"
        } else {
            "goalbuckets=warn"
        })
    })
}

fn json_format() -> bool {
    env::var("GB_LOG_FORMAT").is_ok_and(|f| f == "json")
}

/// Log to stderr. Used by the CLI commands.
pub fn init_stderr() {
    let registry = tracing_subscriber::registry().with(env_filter());
    // A subscriber may already be installed (tests); keep it
    let _ = if json_format() {
        registry
            .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(fmt::layer().compact().with_writer(std::io::stderr))
            .try_init()
    };
}

/// Log to `<root>/.goalbuckets.log` so output does not tear the terminal UI.
/// Logging is skipped when the file cannot be opened.
pub fn init_file(root: &Path) {
    let file = match OpenOptions::new()
        .create(true)
        .append(true)
        .open(root.join(LOG_FILE))
    {
        Ok(f) => f,
        Err(_) => return,
    };
    let writer = Mutex::new(file);
    let registry = tracing_subscriber::registry().with(env_filter());
    let _ = if json_format() {
        registry
            .with(fmt::layer().json().with_ansi(false).with_writer(writer))
            .try_init()
    } else {
        registry
            .with(fmt::layer().compact().with_ansi(false).with_writer(writer))
            .try_init()
    };
}
