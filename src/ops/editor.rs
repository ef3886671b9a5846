use crate::model::task::{Direction, Task};

/// Error type for edits addressed at a day's list
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EditError {
    #[error("unknown bucket: {0}")]
    UnknownBucket(String),
    /// `position` is 0-based; the message shows it 1-based
    #[error("bucket {bucket} has no task at position {}", .position + 1)]
    PositionOutOfRange { bucket: String, position: usize },
    #[error("task index out of range: {0}")]
    IndexOutOfRange(usize),
}

// ---------------------------------------------------------------------------
// Bucket views
// ---------------------------------------------------------------------------

/// Absolute indices of the tasks in `bucket`, in list order.
pub fn bucket_indices(tasks: &[Task], bucket: &str) -> Vec<usize> {
    tasks
        .iter()
        .enumerate()
        .filter(|(_, t)| t.bucket == bucket)
        .map(|(i, _)| i)
        .collect()
}

/// Map a position within `bucket`'s tasks back to the absolute index.
///
/// Tasks have no IDs, so this is exact only while the list is unchanged
/// between the read that produced `position` and the write that uses it.
pub fn resolve_position(tasks: &[Task], bucket: &str, position: usize) -> Option<usize> {
    tasks
        .iter()
        .enumerate()
        .filter(|(_, t)| t.bucket == bucket)
        .nth(position)
        .map(|(i, _)| i)
}

// ---------------------------------------------------------------------------
// Edits
// ---------------------------------------------------------------------------

/// Append an unfinished task to the end of the list.
///
/// The name is trimmed. A blank name leaves the list untouched and
/// returns `false`.
pub fn append(tasks: &mut Vec<Task>, name: &str, bucket: &str) -> bool {
    let name = name.trim();
    if name.is_empty() {
        return false;
    }
    tasks.push(Task::new(name, bucket));
    true
}

/// Set the completion flag of the task at absolute `index`.
pub fn set_completed(tasks: &mut [Task], index: usize, value: bool) -> Result<(), EditError> {
    let task = tasks
        .get_mut(index)
        .ok_or(EditError::IndexOutOfRange(index))?;
    task.completed = value;
    Ok(())
}

/// Flip the completion flag of the task at absolute `index`, returning
/// the new value.
pub fn toggle(tasks: &mut [Task], index: usize) -> Result<bool, EditError> {
    let task = tasks
        .get_mut(index)
        .ok_or(EditError::IndexOutOfRange(index))?;
    task.completed = !task.completed;
    Ok(task.completed)
}

/// Move the task at `position` within `bucket` one step up or down
/// among the bucket's tasks.
///
/// The two tasks trade absolute slots; tasks of other buckets sitting
/// between them do not move. Moving the first task up or the last task
/// down is a no-op. Returns whether the list changed.
pub fn reorder(
    tasks: &mut [Task],
    bucket: &str,
    position: usize,
    direction: Direction,
) -> Result<bool, EditError> {
    let indices = bucket_indices(tasks, bucket);
    if position >= indices.len() {
        return Err(EditError::PositionOutOfRange {
            bucket: bucket.to_string(),
            position,
        });
    }

    let neighbor = match direction {
        Direction::Up if position == 0 => return Ok(false),
        Direction::Up => position - 1,
        Direction::Down if position + 1 == indices.len() => return Ok(false),
        Direction::Down => position + 1,
    };
    tasks.swap(indices[position], indices[neighbor]);
    Ok(true)
}
