use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Time bucketing for the historical trend view
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    #[default]
    Day,
    Week,
    Month,
    Year,
}

impl Granularity {
    /// Period label a date falls into. Labels sort chronologically.
    ///
    /// Weeks are ISO weeks, so the last days of December can land in
    /// week 1 of the following year.
    pub fn period_key(self, date: NaiveDate) -> String {
        match self {
            Granularity::Day => date.format("%Y-%m-%d").to_string(),
            Granularity::Week => {
                let week = date.iso_week();
                format!("{}-W{:02}", week.year(), week.week())
            }
            Granularity::Month => format!("{}-{:02}", date.year(), date.month()),
            Granularity::Year => date.year().to_string(),
        }
    }

    /// Next granularity in the Day → Week → Month → Year cycle
    pub fn next(self) -> Self {
        match self {
            Granularity::Day => Granularity::Week,
            Granularity::Week => Granularity::Month,
            Granularity::Month => Granularity::Year,
            Granularity::Year => Granularity::Day,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Granularity::Day => "day",
            Granularity::Week => "week",
            Granularity::Month => "month",
            Granularity::Year => "year",
        }
    }
}

impl std::fmt::Display for Granularity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One bucket's completion percentage for one period
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub period: String,
    pub percent: f64,
}

/// Completion history of a single bucket
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendSeries {
    pub bucket: String,
    pub points: Vec<TrendPoint>,
}

/// Completion history of every bucket, aligned on the same periods
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trend {
    pub granularity: Granularity,
    /// Period labels in chronological order
    pub periods: Vec<String>,
    pub series: Vec<TrendSeries>,
}

impl Trend {
    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }
}
