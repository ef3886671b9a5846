use std::collections::BTreeMap;

use chrono::NaiveDate;
use indexmap::IndexMap;

use crate::model::progress::{Granularity, Trend, TrendPoint, TrendSeries};
use crate::model::task::{HOLDING_TANK, Task};

/// Completed / total counts for one bucket
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub completed: usize,
    pub total: usize,
}

impl Tally {
    fn add(&mut self, task: &Task) {
        self.total += 1;
        if task.completed {
            self.completed += 1;
        }
    }

    /// Completion percentage; 0 when there are no tasks
    pub fn percent(self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.completed as f64 / self.total as f64 * 100.0
        }
    }
}

/// Bucket order used by every progress view: configured buckets, then
/// the Holding Tank, then any unconfigured bucket found in `tasks`.
pub fn display_buckets<'a>(
    buckets: &[String],
    tasks: impl IntoIterator<Item = &'a Task>,
) -> Vec<String> {
    let mut order: Vec<String> = buckets.to_vec();
    if !order.iter().any(|b| b == HOLDING_TANK) {
        order.push(HOLDING_TANK.to_string());
    }
    for task in tasks {
        if !order.contains(&task.bucket) {
            order.push(task.bucket.clone());
        }
    }
    order
}

/// Per-bucket completed/total counts in display order.
pub fn bucket_tallies(tasks: &[Task], buckets: &[String]) -> IndexMap<String, Tally> {
    let mut tallies: IndexMap<String, Tally> = display_buckets(buckets, tasks)
        .into_iter()
        .map(|b| (b, Tally::default()))
        .collect();
    for task in tasks {
        if let Some(tally) = tallies.get_mut(&task.bucket) {
            tally.add(task);
        }
    }
    tallies
}

/// Completion history per bucket, grouped by `granularity`.
///
/// A period's percentage pools every task of the bucket across all days
/// in that period, so busy days weigh more than quiet ones.
pub fn trend(
    history: &BTreeMap<NaiveDate, Vec<Task>>,
    buckets: &[String],
    granularity: Granularity,
) -> Trend {
    let order = display_buckets(buckets, history.values().flatten());

    let mut periods: BTreeMap<String, IndexMap<&str, Tally>> = BTreeMap::new();
    for (date, tasks) in history {
        let tallies = periods.entry(granularity.period_key(*date)).or_default();
        for task in tasks {
            tallies.entry(task.bucket.as_str()).or_default().add(task);
        }
    }

    let series = order
        .iter()
        .map(|bucket| TrendSeries {
            bucket: bucket.clone(),
            points: periods
                .iter()
                .map(|(period, tallies)| TrendPoint {
                    period: period.clone(),
                    percent: tallies
                        .get(bucket.as_str())
                        .copied()
                        .unwrap_or_default()
                        .percent(),
                })
                .collect(),
        })
        .collect();

    Trend {
        granularity,
        periods: periods.keys().cloned().collect(),
        series,
    }
}
