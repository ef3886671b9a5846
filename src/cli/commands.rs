use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::model::progress::Granularity;
use crate::model::task::Direction;

#[derive(Parser)]
#[command(name = "gb", about = concat!("goalbuckets v", env!("CARGO_PKG_VERSION"), " - one list a day, sorted into buckets"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Run against a different dashboard directory
    #[arg(short = 'C', long = "dashboard-dir", global = true)]
    pub dashboard_dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new dashboard in the current directory
    Init(InitArgs),
    /// Show a day's tasks grouped by bucket
    List(ListArgs),
    /// Add a task to today's list
    Add(AddArgs),
    /// Mark a task done
    Check(TaskRef),
    /// Mark a task not done
    Uncheck(TaskRef),
    /// Flip a task between done and not done
    Toggle(TaskRef),
    /// Move a task up or down within its bucket
    Mv(MvArgs),
    /// Show per-bucket completion for a day
    Progress(ProgressArgs),
    /// Show completion history per bucket
    Trend(TrendArgs),
    /// List configured buckets with today's counts
    Buckets,
    /// Print a random quote
    Quote,
    /// View or clear the recovery log
    Recovery(RecoveryCmd),
}

// ---------------------------------------------------------------------------
// Init args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct InitArgs {
    /// Bucket to create (repeatable, in display order)
    #[arg(long = "bucket", value_name = "NAME", action = clap::ArgAction::Append)]
    pub buckets: Vec<String>,
    /// Overwrite an existing settings.json
    #[arg(long)]
    pub force: bool,
}

// ---------------------------------------------------------------------------
// Read command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ListArgs {
    /// Day to show (YYYY-MM-DD, default: today)
    #[arg(long)]
    pub date: Option<NaiveDate>,
    /// Only show this bucket
    #[arg(long)]
    pub bucket: Option<String>,
}

#[derive(Args)]
pub struct ProgressArgs {
    /// Day to report on (YYYY-MM-DD, default: today)
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

#[derive(Args)]
pub struct TrendArgs {
    /// Period to group days by
    #[arg(long = "by", value_enum, default_value_t = Granularity::Day)]
    pub granularity: Granularity,
}

// ---------------------------------------------------------------------------
// Write command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct AddArgs {
    /// Bucket to add the task to
    pub bucket: String,
    /// Task name
    pub name: String,
}

/// A task addressed by bucket and 1-based position, as shown by `gb list`
#[derive(Args)]
pub struct TaskRef {
    /// Bucket holding the task
    pub bucket: String,
    /// Position within the bucket (1-based)
    pub position: usize,
}

#[derive(Args)]
pub struct MvArgs {
    /// Bucket holding the task
    pub bucket: String,
    /// Position within the bucket (1-based)
    pub position: usize,
    /// Direction to move
    #[arg(value_enum)]
    pub direction: Direction,
}

// ---------------------------------------------------------------------------
// Recovery
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct RecoveryCmd {
    #[command(subcommand)]
    pub action: Option<RecoveryAction>,
    /// Maximum number of entries to show (default: 10)
    #[arg(long)]
    pub limit: Option<usize>,
}

#[derive(Subcommand)]
pub enum RecoveryAction {
    /// Remove every entry
    Clear,
    /// Print the absolute path to the recovery log
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_positions_and_directions() {
        let cli = Cli::try_parse_from(["gb", "mv", "Work", "2", "up"]).unwrap();
        match cli.command {
            Some(Commands::Mv(args)) => {
                assert_eq!(args.bucket, "Work");
                assert_eq!(args.position, 2);
                assert_eq!(args.direction, Direction::Up);
            }
            _ => panic!("expected mv"),
        }
    }

    #[test]
    fn parses_dates_and_granularity() {
        let cli = Cli::try_parse_from(["gb", "--json", "list", "--date", "2024-03-15"]).unwrap();
        assert!(cli.json);
        match cli.command {
            Some(Commands::List(args)) => {
                assert_eq!(args.date, NaiveDate::from_ymd_opt(2024, 3, 15));
            }
            _ => panic!("expected list"),
        }

        let cli = Cli::try_parse_from(["gb", "trend", "--by", "week"]).unwrap();
        match cli.command {
            Some(Commands::Trend(args)) => assert_eq!(args.granularity, Granularity::Week),
            _ => panic!("expected trend"),
        }
    }

    #[test]
    fn rejects_bad_date() {
        assert!(Cli::try_parse_from(["gb", "progress", "--date", "yesterday"]).is_err());
    }

    #[test]
    fn no_subcommand_is_allowed() {
        let cli = Cli::try_parse_from(["gb", "-C", "/tmp/board"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.dashboard_dir.as_deref(), Some("/tmp/board"));
    }
}
