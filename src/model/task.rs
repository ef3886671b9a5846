use serde::{Deserialize, Serialize};

/// Reserved bucket that receives yesterday's unfinished tasks
pub const HOLDING_TANK: &str = "Holding Tank";

/// A single task on a day's list.
///
/// Tasks carry no ID: a task is identified by its position in the day's
/// list. Two tasks with the same name and bucket are distinct only by
/// where they sit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Task label (stored under the `task` key on disk)
    #[serde(rename = "task")]
    pub name: String,
    /// Bucket name, or [`HOLDING_TANK`]
    pub bucket: String,
    pub completed: bool,
}

impl Task {
    /// Create an unfinished task
    pub fn new(name: impl Into<String>, bucket: impl Into<String>) -> Self {
        Task {
            name: name.into(),
            bucket: bucket.into(),
            completed: false,
        }
    }
}

/// Up/down direction for reordering a task within its bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_serializes_name_as_task_field() {
        let task = Task::new("Run", "Health");
        let json = serde_json::to_string(&task).unwrap();
        assert_eq!(json, r#"{"task":"Run","bucket":"Health","completed":false}"#);
    }

    #[test]
    fn task_deserializes_stored_shape() {
        let task: Task =
            serde_json::from_str(r#"{"task":"Call mom","bucket":"Family","completed":true}"#)
                .unwrap();
        assert_eq!(task.name, "Call mom");
        assert_eq!(task.bucket, "Family");
        assert!(task.completed);
    }
}
