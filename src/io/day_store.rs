use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::io::recovery::{self, RecoveryEntry};
use crate::model::config::RecurringTask;
use crate::model::task::{HOLDING_TANK, Task};

/// Date format used for day file names
const DAY_FORMAT: &str = "%Y-%m-%d";

/// Error type for day file I/O
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not create {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: io::Error,
    },
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: io::Error,
    },
    #[error("could not parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        source: io::Error,
    },
    #[error("could not serialize day list: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Per-day task files: one `YYYY-MM-DD.json` per calendar date.
///
/// There is no locking. Two processes saving the same day race and the
/// last write wins.
#[derive(Debug, Clone)]
pub struct DayStore {
    /// Dashboard root, where the recovery log lives
    root: PathBuf,
    tasks_dir: PathBuf,
    recurring: Vec<RecurringTask>,
}

impl DayStore {
    pub fn new(root: &Path, tasks_dir: &Path, recurring: Vec<RecurringTask>) -> Self {
        DayStore {
            root: root.to_path_buf(),
            tasks_dir: tasks_dir.to_path_buf(),
            recurring,
        }
    }

    pub fn tasks_dir(&self) -> &Path {
        &self.tasks_dir
    }

    /// Path of the file holding `date`'s list
    pub fn day_path(&self, date: NaiveDate) -> PathBuf {
        self.tasks_dir
            .join(format!("{}.json", date.format(DAY_FORMAT)))
    }

    /// Load `date`'s list, creating it from the previous day and the
    /// recurring tasks when no file exists yet.
    pub fn load(&self, date: NaiveDate) -> Result<Vec<Task>, StoreError> {
        self.ensure_dir()?;
        if let Some(tasks) = self.read(date)? {
            return Ok(tasks);
        }

        let previous = match date.pred_opt() {
            Some(prev) => self.read(prev)?,
            None => None,
        };
        let tasks = derive_seed(previous.as_deref(), &self.recurring);
        self.save(date, &tasks)?;
        tracing::info!(
            date = %date,
            carried = previous.is_some(),
            tasks = tasks.len(),
            "started new day"
        );
        Ok(tasks)
    }

    /// Read `date`'s list without creating it. `None` when there is no file.
    pub fn read(&self, date: NaiveDate) -> Result<Option<Vec<Task>>, StoreError> {
        read_day_file(&self.day_path(date))
    }

    /// Replace `date`'s list with `tasks`.
    ///
    /// On failure the unsaved list is appended to the recovery log before
    /// the error is returned.
    pub fn save(&self, date: NaiveDate, tasks: &[Task]) -> Result<(), StoreError> {
        self.ensure_dir()?;
        let path = self.day_path(date);
        let content = serde_json::to_string_pretty(tasks)?;
        if let Err(e) = recovery::atomic_write(&path, content.as_bytes()) {
            recovery::log_recovery(
                &self.root,
                RecoveryEntry {
                    timestamp: chrono::Utc::now(),
                    description: "day write failed".to_string(),
                    fields: vec![
                        ("Target".to_string(), path.display().to_string()),
                        ("Error".to_string(), e.to_string()),
                    ],
                    body: content,
                },
            );
            tracing::error!(path = %path.display(), error = %e, "day write failed");
            return Err(StoreError::Write { path, source: e });
        }
        tracing::debug!(date = %date, tasks = tasks.len(), "saved day");
        Ok(())
    }

    /// Read every persisted day, keyed by date.
    ///
    /// Entries whose name is not `<date>.json` are ignored. A day file
    /// that fails to read or parse fails the whole call.
    pub fn load_all(&self) -> Result<BTreeMap<NaiveDate, Vec<Task>>, StoreError> {
        let mut days = BTreeMap::new();
        if !self.tasks_dir.is_dir() {
            return Ok(days);
        }

        let entries = fs::read_dir(&self.tasks_dir).map_err(|e| StoreError::Read {
            path: self.tasks_dir.clone(),
            source: e,
        })?;

        for entry in entries {
            let entry = entry.map_err(|e| StoreError::Read {
                path: self.tasks_dir.clone(),
                source: e,
            })?;
            let path = entry.path();
            let Some(date) = day_file_date(&path) else {
                continue;
            };
            if let Some(tasks) = read_day_file(&path)? {
                days.insert(date, tasks);
            }
        }

        Ok(days)
    }

    fn ensure_dir(&self) -> Result<(), StoreError> {
        fs::create_dir_all(&self.tasks_dir).map_err(|e| StoreError::CreateDir {
            path: self.tasks_dir.clone(),
            source: e,
        })
    }
}

/// Compute a new day's list: yesterday's unfinished tasks moved to the
/// Holding Tank, then one fresh task per recurring template.
pub fn derive_seed(previous: Option<&[Task]>, recurring: &[RecurringTask]) -> Vec<Task> {
    let carried = previous
        .unwrap_or_default()
        .iter()
        .filter(|t| !t.completed)
        .map(|t| Task::new(t.name.clone(), HOLDING_TANK));
    let fresh = recurring
        .iter()
        .map(|r| Task::new(r.task.clone(), r.bucket.clone()));
    carried.chain(fresh).collect()
}

/// The date a day file stands for, if `path` is named exactly
/// `YYYY-MM-DD.json`. Unpadded names like `2024-3-15.json` are not day files.
fn day_file_date(path: &Path) -> Option<NaiveDate> {
    if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("json") {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    NaiveDate::parse_from_str(stem, DAY_FORMAT)
        .ok()
        .filter(|d| d.format(DAY_FORMAT).to_string() == stem)
}

fn read_day_file(path: &Path) -> Result<Option<Vec<Task>>, StoreError> {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(StoreError::Read {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };
    let tasks = serde_json::from_str(&content).map_err(|e| StoreError::Parse {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(Some(tasks))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DAY_FORMAT).unwrap()
    }

    fn recurring() -> Vec<RecurringTask> {
        vec![
            RecurringTask {
                task: "Stretch".into(),
                bucket: "Health".into(),
            },
            RecurringTask {
                task: "Inbox zero".into(),
                bucket: "Work".into(),
            },
        ]
    }

    fn store(tmp: &TempDir) -> DayStore {
        DayStore::new(tmp.path(), &tmp.path().join("tasks"), recurring())
    }

    fn done(name: &str, bucket: &str) -> Task {
        Task {
            completed: true,
            ..Task::new(name, bucket)
        }
    }

    #[test]
    fn load_carries_unfinished_tasks_into_holding_tank() {
        let tmp = TempDir::new().unwrap();
        let store = store(&tmp);
        store
            .save(
                date("2024-03-14"),
                &[done("A", "Work"), Task::new("B", "Family")],
            )
            .unwrap();

        let today = store.load(date("2024-03-15")).unwrap();
        assert_eq!(
            today,
            vec![
                Task::new("B", HOLDING_TANK),
                Task::new("Stretch", "Health"),
                Task::new("Inbox zero", "Work"),
            ]
        );
    }

    #[test]
    fn load_without_previous_day_only_seeds_recurring() {
        let tmp = TempDir::new().unwrap();
        let today = store(&tmp).load(date("2024-03-15")).unwrap();
        assert_eq!(
            today,
            vec![Task::new("Stretch", "Health"), Task::new("Inbox zero", "Work")]
        );
    }

    #[test]
    fn carry_forward_only_looks_at_the_day_before() {
        let tmp = TempDir::new().unwrap();
        let store = store(&tmp);
        store
            .save(date("2024-03-13"), &[Task::new("Old", "Work")])
            .unwrap();
        let today = store.load(date("2024-03-15")).unwrap();
        assert!(today.iter().all(|t| t.name != "Old"));
    }

    #[test]
    fn carried_holding_tank_tasks_stay_in_holding_tank() {
        let tmp = TempDir::new().unwrap();
        let store = store(&tmp);
        store
            .save(date("2024-03-14"), &[Task::new("Lingering", HOLDING_TANK)])
            .unwrap();
        let today = store.load(date("2024-03-15")).unwrap();
        assert_eq!(today[0], Task::new("Lingering", HOLDING_TANK));
    }

    #[test]
    fn load_persists_the_derived_day() {
        let tmp = TempDir::new().unwrap();
        let store = store(&tmp);
        let d = date("2024-03-15");
        assert!(store.read(d).unwrap().is_none());
        let derived = store.load(d).unwrap();
        assert_eq!(store.read(d).unwrap(), Some(derived));
    }

    #[test]
    fn load_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let store = store(&tmp);
        store
            .save(date("2024-03-14"), &[Task::new("B", "Family")])
            .unwrap();
        let first = store.load(date("2024-03-15")).unwrap();
        let second = store.load(date("2024-03-15")).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn existing_day_is_returned_verbatim() {
        let tmp = TempDir::new().unwrap();
        let store = store(&tmp);
        let d = date("2024-03-15");
        let tasks = vec![done("Z", "Work"), Task::new("A", "Mystery bucket")];
        store.save(d, &tasks).unwrap();
        assert_eq!(store.load(d).unwrap(), tasks);
    }

    #[test]
    fn save_then_load_round_trips() {
        let tmp = TempDir::new().unwrap();
        let store = store(&tmp);
        let d = date("2024-03-15");
        let tasks = vec![
            Task::new("Run", "Health"),
            done("Run", "Health"),
            Task::new("Call", HOLDING_TANK),
        ];
        store.save(d, &tasks).unwrap();
        assert_eq!(store.load(d).unwrap(), tasks);
    }

    #[test]
    fn save_replaces_previous_content() {
        let tmp = TempDir::new().unwrap();
        let store = store(&tmp);
        let d = date("2024-03-15");
        store.save(d, &[Task::new("A", "Work")]).unwrap();
        store.save(d, &[]).unwrap();
        assert_eq!(store.read(d).unwrap(), Some(vec![]));
    }

    #[test]
    fn day_file_format() {
        let tmp = TempDir::new().unwrap();
        let store = store(&tmp);
        let d = date("2024-03-15");
        store.save(d, &[Task::new("Run", "Health")]).unwrap();
        let raw = fs::read_to_string(tmp.path().join("tasks/2024-03-15.json")).unwrap();
        insta::assert_snapshot!(raw, @r#"
        [
          {
            "task": "Run",
            "bucket": "Health",
            "completed": false
          }
        ]
        "#);
    }

    #[test]
    fn load_creates_tasks_dir() {
        let tmp = TempDir::new().unwrap();
        let store = DayStore::new(tmp.path(), &tmp.path().join("deep/tasks"), vec![]);
        store.load(date("2024-03-15")).unwrap();
        assert!(tmp.path().join("deep/tasks/2024-03-15.json").is_file());
    }

    #[test]
    fn load_fails_when_dir_cannot_be_created() {
        let tmp = TempDir::new().unwrap();
        let blocker = tmp.path().join("tasks");
        fs::write(&blocker, "not a directory").unwrap();
        let store = DayStore::new(tmp.path(), &blocker, vec![]);
        assert!(matches!(
            store.load(date("2024-03-15")),
            Err(StoreError::CreateDir { .. })
        ));
    }

    #[test]
    fn failed_save_lands_in_recovery_log() {
        let tmp = TempDir::new().unwrap();
        let store = store(&tmp);
        let d = date("2024-03-15");
        fs::create_dir_all(store.day_path(d)).unwrap();

        let result = store.save(d, &[Task::new("Unsaved", "Work")]);
        assert!(matches!(result, Err(StoreError::Write { .. })));

        let entries = recovery::read_recovery_entries(tmp.path(), None);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].description, "day write failed");
        assert!(entries[0].body.contains("\"task\": \"Unsaved\""));
    }

    #[test]
    fn malformed_previous_day_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let store = store(&tmp);
        fs::create_dir_all(store.tasks_dir()).unwrap();
        fs::write(store.day_path(date("2024-03-14")), "{ not json").unwrap();
        assert!(matches!(
            store.load(date("2024-03-15")),
            Err(StoreError::Parse { .. })
        ));
        assert!(store.read(date("2024-03-15")).unwrap().is_none());
    }

    #[test]
    fn load_all_reads_every_day_and_skips_other_files() {
        let tmp = TempDir::new().unwrap();
        let store = store(&tmp);
        store
            .save(date("2024-03-14"), &[Task::new("A", "Work")])
            .unwrap();
        store
            .save(date("2024-03-15"), &[done("B", "Work")])
            .unwrap();
        fs::write(store.tasks_dir().join("notes.txt"), "hello").unwrap();
        fs::write(store.tasks_dir().join("backup.json"), "[]").unwrap();
        fs::create_dir(store.tasks_dir().join("2024-01-01.json")).unwrap();
        // Unpadded names must not shadow the real day file
        fs::write(
            store.tasks_dir().join("2024-3-15.json"),
            r#"[{"task": "Stray", "bucket": "Work", "completed": false}]"#,
        )
        .unwrap();
        fs::write(store.tasks_dir().join("2024-3-16.json"), "not json").unwrap();

        let all = store.load_all().unwrap();
        let dates: Vec<_> = all.keys().copied().collect();
        assert_eq!(dates, vec![date("2024-03-14"), date("2024-03-15")]);
        assert_eq!(all[&date("2024-03-15")], vec![done("B", "Work")]);
    }

    #[test]
    fn load_all_fails_on_malformed_day() {
        let tmp = TempDir::new().unwrap();
        let store = store(&tmp);
        store
            .save(date("2024-03-14"), &[Task::new("A", "Work")])
            .unwrap();
        fs::write(store.day_path(date("2024-03-15")), "[{\"task\": 1}]").unwrap();
        assert!(matches!(store.load_all(), Err(StoreError::Parse { .. })));
    }

    #[test]
    fn load_all_without_dir_is_empty() {
        let tmp = TempDir::new().unwrap();
        assert!(store(&tmp).load_all().unwrap().is_empty());
    }

    #[test]
    fn derive_seed_keeps_carry_over_order() {
        let previous = vec![
            Task::new("first", "Work"),
            done("finished", "Work"),
            Task::new("second", "Health"),
        ];
        let seed = derive_seed(Some(&previous), &[]);
        assert_eq!(
            seed,
            vec![
                Task::new("first", HOLDING_TANK),
                Task::new("second", HOLDING_TANK)
            ]
        );
    }
}
