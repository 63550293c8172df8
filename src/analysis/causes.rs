//! Fire cause breakdown.

use crate::constants::{ACRES, CAUSE_DESCRIPTION, CONTAINMENT_DURATION};
use crate::error::Result;
use crate::processor::frame::{f64_values, string_values, summarize_by_text};

use std::collections::HashMap;

use polars::prelude::DataFrame;
use serde::Serialize;

const OPERATION: &str = "cause analysis";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CauseStatistics {
    pub cause: String,
    pub fire_count: usize,
    pub mean_acres: f64,
    pub median_acres: f64,
    pub total_acres: f64,
    pub mean_duration_hours: Option<f64>,
    /// Share of all fires with a described cause
    pub percentage: f64,
}

/// Summarize fires by cause, most frequent first.
///
/// Fails with `MissingColumn` when `CAUSE_DESCRIPTION` has not been derived
/// yet. Rows with no cause description are left out, including from the
/// percentage denominator.
pub fn cause_analysis(df: &DataFrame) -> Result<Vec<CauseStatistics>> {
    let causes = string_values(df, CAUSE_DESCRIPTION, OPERATION)?;
    let acres = f64_values(df, ACRES, OPERATION)?;
    let durations = f64_values(df, CONTAINMENT_DURATION, OPERATION)?;

    let mean_durations = summarize_by_text(causes.clone(), durations)?
        .into_iter()
        .map(|(cause, summary)| (cause, summary.mean))
        .collect::<HashMap<_, _>>();
    let acres_by_cause = summarize_by_text(causes, acres)?;
    let total_fires = acres_by_cause
        .iter()
        .map(|(_, summary)| summary.count)
        .sum::<usize>();

    let mut statistics = acres_by_cause
        .into_iter()
        .map(|(cause, summary)| CauseStatistics {
            mean_duration_hours: mean_durations.get(&cause).copied(),
            fire_count: summary.count,
            mean_acres: summary.mean,
            median_acres: summary.median,
            total_acres: summary.sum,
            percentage: summary.count as f64 / total_fires as f64 * 100.0,
            cause,
        })
        .collect::<Vec<_>>();

    statistics.sort_by(|a, b| {
        b.fire_count
            .cmp(&a.fire_count)
            .then_with(|| a.cause.cmp(&b.cause))
    });

    Ok(statistics)
}
