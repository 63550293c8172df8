//! Result structures returned by the pipeline stages.
//!
//! The cleaner and validator hand back their filtered frame together with
//! one of these summaries so callers can report row accounting and
//! data-quality findings without re-deriving them from the frame.

use serde::{Deserialize, Serialize};

/// Row and column accounting for one cleaning pass
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CleaningSummary {
    /// Rows in the raw frame
    pub initial_rows: usize,

    /// Rows after removing records without year or acres
    pub final_rows: usize,

    /// Low-utility columns that were present and dropped
    pub columns_dropped: Vec<String>,
}

impl CleaningSummary {
    pub fn rows_removed(&self) -> usize {
        self.initial_rows.saturating_sub(self.final_rows)
    }

    /// Percentage of raw rows that survived cleaning
    pub fn retention_rate(&self) -> f64 {
        if self.initial_rows == 0 {
            0.0
        } else {
            (self.final_rows as f64 / self.initial_rows as f64) * 100.0
        }
    }
}

/// Data-quality findings of the six validation rules.
///
/// Only invalid date order and non-positive acres remove rows; every other
/// rule is observational and only contributes counts or issue strings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Rows entering validation
    pub initial_rows: usize,

    /// Rows leaving validation
    pub final_rows: usize,

    /// `initial_rows - final_rows`
    pub rows_removed: usize,

    /// Issue descriptions in rule order
    pub issues: Vec<String>,

    /// Acres values outside the IQR fence (not removed)
    pub outlier_count: usize,

    /// Rows whose containment preceded their alarm
    pub invalid_date_count: usize,

    /// Alarm timestamps later than the reference time
    pub future_alarm_count: usize,

    /// Containment timestamps later than the reference time
    pub future_containment_count: usize,

    /// Durations above the configured ceiling (not removed)
    pub extreme_duration_count: usize,

    /// Rows with zero or negative acres
    pub invalid_acres_count: usize,

    /// Acres range seen by the outlier rule
    pub acres_min: Option<f64>,
    pub acres_max: Option<f64>,
    pub acres_median: Option<f64>,

    /// IQR fence used by the outlier rule
    pub outlier_lower_bound: Option<f64>,
    pub outlier_upper_bound: Option<f64>,

    /// Observed year range after filtering
    pub min_year: Option<i64>,
    pub max_year: Option<i64>,
}

impl ValidationReport {
    /// True when any rule reported an issue
    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }

    /// Percentage of rows that survived validation
    pub fn retention_rate(&self) -> f64 {
        if self.initial_rows == 0 {
            0.0
        } else {
            (self.final_rows as f64 / self.initial_rows as f64) * 100.0
        }
    }

    /// Observed `(min, max)` year, when the frame had any years
    pub fn year_range(&self) -> Option<(i64, i64)> {
        Some((self.min_year?, self.max_year?))
    }
}
