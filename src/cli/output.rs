use chrono::NaiveDate;
use serde::Serialize;

use crate::model::progress::Trend;
use crate::model::task::Task;
use crate::ops::dashboard::BucketGroup;
use crate::ops::progress::Tally;
use crate::util::unicode::{display_width, pad_to_width};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct TaskJson {
    /// 1-based position within the bucket
    pub position: usize,
    pub task: String,
    pub bucket: String,
    pub completed: bool,
}

#[derive(Serialize)]
pub struct BucketTasksJson {
    pub bucket: String,
    pub tasks: Vec<TaskJson>,
}

#[derive(Serialize)]
pub struct DayJson {
    pub date: String,
    pub buckets: Vec<BucketTasksJson>,
}

#[derive(Serialize)]
pub struct BucketProgressJson {
    pub bucket: String,
    pub completed: usize,
    pub total: usize,
    pub percent: f64,
}

#[derive(Serialize)]
pub struct ProgressJson {
    pub date: String,
    pub buckets: Vec<BucketProgressJson>,
}

#[derive(Serialize)]
pub struct QuoteJson {
    pub quote: Option<String>,
}

pub fn task_to_json(position: usize, task: &Task) -> TaskJson {
    TaskJson {
        position,
        task: task.name.clone(),
        bucket: task.bucket.clone(),
        completed: task.completed,
    }
}

pub fn day_to_json(date: NaiveDate, groups: &[BucketGroup]) -> DayJson {
    DayJson {
        date: date.to_string(),
        buckets: groups
            .iter()
            .map(|g| BucketTasksJson {
                bucket: g.bucket.clone(),
                tasks: g
                    .tasks
                    .iter()
                    .enumerate()
                    .map(|(i, (_, task))| task_to_json(i + 1, task))
                    .collect(),
            })
            .collect(),
    }
}

pub fn tally_to_json(bucket: &str, tally: Tally) -> BucketProgressJson {
    BucketProgressJson {
        bucket: bucket.to_string(),
        completed: tally.completed,
        total: tally.total,
        percent: tally.percent(),
    }
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

/// Format a single task as a numbered checkbox line
pub fn format_task_line(position: usize, task: &Task) -> String {
    let mark = if task.completed { 'x' } else { ' ' };
    format!("  {:>2}. [{}] {}", position, mark, task.name)
}

/// Format one bucket: a header with counts, then its tasks
pub fn format_bucket_group(group: &BucketGroup) -> Vec<String> {
    let done = group.tasks.iter().filter(|(_, t)| t.completed).count();
    let mut lines = vec![format!("{} ({}/{})", group.bucket, done, group.tasks.len())];
    if group.tasks.is_empty() {
        lines.push("  (empty)".to_string());
    }
    for (i, (_, task)) in group.tasks.iter().enumerate() {
        lines.push(format_task_line(i + 1, task));
    }
    lines
}

/// A fixed-width text bar, e.g. `#####-----` for 50%
pub fn progress_bar(percent: f64, width: usize) -> String {
    let filled = ((percent / 100.0) * width as f64).round() as usize;
    let filled = filled.min(width);
    format!("{}{}", "#".repeat(filled), "-".repeat(width - filled))
}

/// Format per-bucket completion as aligned rows
pub fn format_progress(rows: &[(String, Tally)]) -> Vec<String> {
    let name_w = rows
        .iter()
        .map(|(b, _)| display_width(b))
        .max()
        .unwrap_or(0);
    rows.iter()
        .map(|(bucket, tally)| {
            format!(
                " {}  {}  {:>3.0}%  ({}/{})",
                pad_to_width(bucket, name_w),
                progress_bar(tally.percent(), 20),
                tally.percent(),
                tally.completed,
                tally.total,
            )
        })
        .collect()
}

/// Format a trend as a table: one row per period, one column per bucket
pub fn format_trend(trend: &Trend) -> Vec<String> {
    if trend.is_empty() {
        return vec!["no history yet".to_string()];
    }
    let period_w = trend
        .periods
        .iter()
        .map(|p| p.len())
        .max()
        .unwrap_or(0)
        .max(6); // "period"
    let col_w: Vec<usize> = trend
        .series
        .iter()
        .map(|s| display_width(&s.bucket).max(4))
        .collect();

    let mut lines = Vec::new();
    let mut header = format!(" {:<period_w$}", "period");
    for (series, w) in trend.series.iter().zip(&col_w) {
        header.push_str("  ");
        header.push_str(&pad_to_width(&series.bucket, *w));
    }
    lines.push(header.trim_end().to_string());

    for (row, period) in trend.periods.iter().enumerate() {
        let mut line = format!(" {:<period_w$}", period);
        for (series, w) in trend.series.iter().zip(&col_w) {
            let cell = format!("{:.0}%", series.points[row].percent);
            line.push_str(&format!("  {:>w$}", cell, w = *w));
        }
        lines.push(line);
    }
    lines
}
