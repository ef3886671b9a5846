use chrono::NaiveDate;
use indexmap::IndexMap;
use rand::Rng;
use rand::seq::SliceRandom;

use crate::io::day_store::{DayStore, StoreError};
use crate::model::board::Board;
use crate::model::config::Settings;
use crate::model::progress::{Granularity, Trend};
use crate::model::task::{Direction, HOLDING_TANK, Task};
use crate::ops::editor::{self, EditError};
use crate::ops::progress::{self, Tally};

/// Error type for dashboard requests
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Edit(#[from] EditError),
}

/// One bucket's slice of a day's list, as shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketGroup {
    pub bucket: String,
    /// (absolute index, task) in list order
    pub tasks: Vec<(usize, Task)>,
}

/// Request handler over the day store.
///
/// Holds no task state: every call reloads today's list, applies at most
/// one edit, and writes the result straight back. Edits always target
/// the `today` the dashboard was built with.
#[derive(Debug, Clone)]
pub struct Dashboard {
    settings: Settings,
    quotes: Vec<String>,
    store: DayStore,
    today: NaiveDate,
}

impl Dashboard {
    pub fn new(settings: Settings, quotes: Vec<String>, store: DayStore, today: NaiveDate) -> Self {
        Dashboard {
            settings,
            quotes,
            store,
            today,
        }
    }

    /// Build a dashboard over a loaded board directory
    pub fn open(board: &Board, today: NaiveDate) -> Self {
        let store = DayStore::new(
            &board.root,
            &board.tasks_dir,
            board.settings.recurring_tasks.clone(),
        );
        Dashboard::new(board.settings.clone(), board.quotes.clone(), store, today)
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn buckets(&self) -> &[String] {
        &self.settings.buckets
    }

    pub fn store(&self) -> &DayStore {
        &self.store
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// Today's list, created from yesterday on first access
    pub fn today_tasks(&self) -> Result<Vec<Task>, DashboardError> {
        Ok(self.store.load(self.today)?)
    }

    /// The list for any date. Past days are read as-is and never created;
    /// a past day with no file is empty.
    pub fn tasks_on(&self, date: NaiveDate) -> Result<Vec<Task>, DashboardError> {
        if date == self.today {
            return self.today_tasks();
        }
        Ok(self.store.read(date)?.unwrap_or_default())
    }

    /// Group a list for display: configured buckets in order, the Holding
    /// Tank last. Tasks in unconfigured buckets are not shown.
    pub fn bucket_groups(&self, tasks: &[Task]) -> Vec<BucketGroup> {
        self.settings
            .buckets
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(HOLDING_TANK))
            .map(|bucket| BucketGroup {
                bucket: bucket.to_string(),
                tasks: editor::bucket_indices(tasks, bucket)
                    .into_iter()
                    .map(|i| (i, tasks[i].clone()))
                    .collect(),
            })
            .collect()
    }

    /// Per-bucket completion for `date` in display order. Every configured
    /// bucket is present; `Tally::percent` is 0 for a bucket with no tasks.
    pub fn progress_on(&self, date: NaiveDate) -> Result<IndexMap<String, Tally>, DashboardError> {
        let tasks = self.tasks_on(date)?;
        Ok(progress::bucket_tallies(&tasks, &self.settings.buckets))
    }

    /// Historical completion across every stored day
    pub fn trend(&self, granularity: Granularity) -> Result<Trend, DashboardError> {
        let history = self.store.load_all()?;
        Ok(progress::trend(&history, &self.settings.buckets, granularity))
    }

    /// A quote drawn uniformly from the pool, if there is one
    pub fn quote<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
        self.quotes.choose(rng).map(String::as_str)
    }

    // -----------------------------------------------------------------------
    // Edits (each one saves)
    // -----------------------------------------------------------------------

    /// Append a task to `bucket`. Returns `false` for a blank name, in
    /// which case nothing is read or written and the bucket is not checked.
    pub fn add_task(&self, name: &str, bucket: &str) -> Result<bool, DashboardError> {
        if name.trim().is_empty() {
            tracing::debug!(bucket, "ignored blank task name");
            return Ok(false);
        }
        if !self.settings.has_bucket(bucket) {
            return Err(EditError::UnknownBucket(bucket.to_string()).into());
        }
        let mut tasks = self.today_tasks()?;
        editor::append(&mut tasks, name, bucket);
        self.store.save(self.today, &tasks)?;
        tracing::info!(bucket, name = name.trim(), "added task");
        Ok(true)
    }

    /// Set the completion flag of the task at `position` within `bucket`
    pub fn set_completed(
        &self,
        bucket: &str,
        position: usize,
        value: bool,
    ) -> Result<Task, DashboardError> {
        let mut tasks = self.today_tasks()?;
        let index = self.resolve(&tasks, bucket, position)?;
        editor::set_completed(&mut tasks, index, value)?;
        self.store.save(self.today, &tasks)?;
        tracing::info!(bucket, position, completed = value, "set completion");
        Ok(tasks.swap_remove(index))
    }

    /// Flip the completion flag of the task at `position` within `bucket`
    pub fn toggle(&self, bucket: &str, position: usize) -> Result<Task, DashboardError> {
        let mut tasks = self.today_tasks()?;
        let index = self.resolve(&tasks, bucket, position)?;
        let value = editor::toggle(&mut tasks, index)?;
        self.store.save(self.today, &tasks)?;
        tracing::info!(bucket, position, completed = value, "toggled task");
        Ok(tasks.swap_remove(index))
    }

    /// Move a task one step within its bucket. Returns whether it moved.
    pub fn reorder(
        &self,
        bucket: &str,
        position: usize,
        direction: Direction,
    ) -> Result<bool, DashboardError> {
        let mut tasks = self.today_tasks()?;
        let moved = editor::reorder(&mut tasks, bucket, position, direction)?;
        // Boundary moves still save so every edit is written through
        self.store.save(self.today, &tasks)?;
        tracing::info!(bucket, position, %direction, moved, "reordered task");
        Ok(moved)
    }

    fn resolve(&self, tasks: &[Task], bucket: &str, position: usize) -> Result<usize, EditError> {
        editor::resolve_position(tasks, bucket, position).ok_or_else(|| {
            EditError::PositionOutOfRange {
                bucket: bucket.to_string(),
                position,
            }
        })
    }
}
