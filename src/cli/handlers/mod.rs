mod init;
pub use init::{cmd_init, init_dashboard};

use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::recovery;
use crate::io::settings_io;
use crate::model::board::Board;
use crate::model::task::Direction;
use crate::ops::dashboard::Dashboard;

type CmdResult = Result<(), Box<dyn std::error::Error>>;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> CmdResult {
    let json = cli.json;
    let dir = resolve_dir(cli.dashboard_dir.as_deref())?;
    let dir = dir.as_deref();

    match cli.command {
        None => Err("no command given (try `gb --help`)".into()),
        Some(cmd) => match cmd {
            Commands::Init(args) => cmd_init(args, dir),

            // Read commands
            Commands::List(args) => cmd_list(args, dir, json),
            Commands::Progress(args) => cmd_progress(args, dir, json),
            Commands::Trend(args) => cmd_trend(args, dir, json),
            Commands::Buckets => cmd_buckets(dir, json),
            Commands::Quote => cmd_quote(dir, json),

            // Write commands
            Commands::Add(args) => cmd_add(args, dir, json),
            Commands::Check(args) => cmd_set_completed(args, Some(true), dir, json),
            Commands::Uncheck(args) => cmd_set_completed(args, Some(false), dir, json),
            Commands::Toggle(args) => cmd_set_completed(args, None, dir, json),
            Commands::Mv(args) => cmd_mv(args, dir, json),

            // Maintenance
            Commands::Recovery(args) => cmd_recovery(args, dir, json),
        },
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Canonicalize the -C override, if one was given
pub fn resolve_dir(dir: Option<&str>) -> Result<Option<PathBuf>, Box<dyn std::error::Error>> {
    match dir {
        None => Ok(None),
        Some(d) => {
            let abs = std::fs::canonicalize(d)
                .map_err(|e| format!("cannot resolve -C path '{}': {}", d, e))?;
            Ok(Some(abs))
        }
    }
}

/// Find and load the dashboard from -C or the current directory
pub fn load_board_cwd(dir: Option<&Path>) -> Result<Board, Box<dyn std::error::Error>> {
    let start = match dir {
        Some(d) => d.to_path_buf(),
        None => std::env::current_dir()?,
    };
    let root = settings_io::discover_root(&start)?;
    Ok(settings_io::load_board(&root)?)
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn open_dashboard(dir: Option<&Path>) -> Result<Dashboard, Box<dyn std::error::Error>> {
    let board = load_board_cwd(dir)?;
    Ok(Dashboard::open(&board, today()))
}

/// Convert a 1-based CLI position to the 0-based position used internally
fn zero_based(position: usize) -> Result<usize, Box<dyn std::error::Error>> {
    position
        .checked_sub(1)
        .ok_or_else(|| "positions start at 1".into())
}

fn print_json<T: serde::Serialize>(value: &T) -> CmdResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list(args: ListArgs, dir: Option<&Path>, json: bool) -> CmdResult {
    let dash = open_dashboard(dir)?;
    let date = args.date.unwrap_or(dash.today());
    let tasks = dash.tasks_on(date)?;

    let mut groups = dash.bucket_groups(&tasks);
    if let Some(bucket) = &args.bucket {
        groups.retain(|g| &g.bucket == bucket);
        if groups.is_empty() {
            return Err(format!("unknown bucket: {}", bucket).into());
        }
    }

    if json {
        return print_json(&day_to_json(date, &groups));
    }
    println!("{}", date.format("%A, %B %-d, %Y"));
    for group in &groups {
        println!();
        for line in format_bucket_group(group) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_progress(args: ProgressArgs, dir: Option<&Path>, json: bool) -> CmdResult {
    let dash = open_dashboard(dir)?;
    let date = args.date.unwrap_or(dash.today());
    let rows: Vec<_> = dash.progress_on(date)?.into_iter().collect();

    if json {
        return print_json(&ProgressJson {
            date: date.to_string(),
            buckets: rows.iter().map(|(b, t)| tally_to_json(b, *t)).collect(),
        });
    }
    println!("{}", date);
    for line in format_progress(&rows) {
        println!("{}", line);
    }
    Ok(())
}

fn cmd_trend(args: TrendArgs, dir: Option<&Path>, json: bool) -> CmdResult {
    let dash = open_dashboard(dir)?;
    let trend = dash.trend(args.granularity)?;

    if json {
        return print_json(&trend);
    }
    for line in format_trend(&trend) {
        println!("{}", line);
    }
    Ok(())
}

fn cmd_buckets(dir: Option<&Path>, json: bool) -> CmdResult {
    let dash = open_dashboard(dir)?;
    let tallies = dash.progress_on(dash.today())?;
    // Configured buckets only, in settings order
    let rows: Vec<_> = dash
        .buckets()
        .iter()
        .map(|b| (b.clone(), tallies.get(b).copied().unwrap_or_default()))
        .collect();

    if json {
        let out: Vec<_> = rows.iter().map(|(b, t)| tally_to_json(b, *t)).collect();
        return print_json(&out);
    }
    for (bucket, tally) in &rows {
        println!("{}  {}/{}", bucket, tally.completed, tally.total);
    }
    Ok(())
}

fn cmd_quote(dir: Option<&Path>, json: bool) -> CmdResult {
    let dash = open_dashboard(dir)?;
    let quote = dash.quote(&mut rand::thread_rng()).map(str::to_string);

    if json {
        return print_json(&QuoteJson { quote });
    }
    match quote {
        Some(q) => println!("{}", q),
        None => eprintln!("no quotes in quotes.json"),
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_add(args: AddArgs, dir: Option<&Path>, json: bool) -> CmdResult {
    let dash = open_dashboard(dir)?;
    let added = dash.add_task(&args.name, &args.bucket)?;
    if !added {
        // Blank names are ignored, not an error
        return Ok(());
    }

    let tasks = dash.today_tasks()?;
    if let Some(group) = dash
        .bucket_groups(&tasks)
        .into_iter()
        .find(|g| g.bucket == args.bucket)
        && let Some((_, task)) = group.tasks.last()
    {
        let position = group.tasks.len();
        if json {
            return print_json(&task_to_json(position, task));
        }
        println!("{}", format_task_line(position, task).trim_start());
    }
    Ok(())
}

/// check (`Some(true)`), uncheck (`Some(false)`) or toggle (`None`)
fn cmd_set_completed(
    args: TaskRef,
    value: Option<bool>,
    dir: Option<&Path>,
    json: bool,
) -> CmdResult {
    let dash = open_dashboard(dir)?;
    let position = zero_based(args.position)?;
    let task = match value {
        Some(v) => dash.set_completed(&args.bucket, position, v)?,
        None => dash.toggle(&args.bucket, position)?,
    };

    if json {
        return print_json(&task_to_json(args.position, &task));
    }
    println!("{}", format_task_line(args.position, &task).trim_start());
    Ok(())
}

fn cmd_mv(args: MvArgs, dir: Option<&Path>, json: bool) -> CmdResult {
    let dash = open_dashboard(dir)?;
    let position = zero_based(args.position)?;
    let moved = dash.reorder(&args.bucket, position, args.direction)?;

    if json {
        return print_json(&serde_json::json!({ "moved": moved }));
    }
    if !moved {
        let edge = match args.direction {
            Direction::Up => "top",
            Direction::Down => "bottom",
        };
        println!("already at the {} of {}", edge, args.bucket);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Recovery
// ---------------------------------------------------------------------------

fn cmd_recovery(args: RecoveryCmd, dir: Option<&Path>, json: bool) -> CmdResult {
    let board = load_board_cwd(dir)?;
    match args.action {
        Some(RecoveryAction::Path) => {
            println!("{}", recovery::recovery_log_path(&board.root).display());
        }
        Some(RecoveryAction::Clear) => {
            let count = recovery::clear_recovery(&board.root)?;
            println!("cleared {} recovery entries", count);
        }
        None => {
            let entries =
                recovery::read_recovery_entries(&board.root, Some(args.limit.unwrap_or(10)));
            if json {
                let out: Vec<_> = entries.iter().map(|e| e.to_json()).collect();
                return print_json(&out);
            }
            if entries.is_empty() {
                println!("recovery log is empty");
            }
            for entry in &entries {
                println!(
                    "{}  {}",
                    entry
                        .timestamp
                        .to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
                    entry.description
                );
                for (key, value) in &entry.fields {
                    println!("  {}: {}", key, value);
                }
                if !entry.body.is_empty() {
                    for line in entry.body.lines() {
                        println!("    {}", line);
                    }
                }
            }
        }
    }
    Ok(())
}
