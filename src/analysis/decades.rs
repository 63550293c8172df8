//! Decade-by-decade comparison of fire sizes.

use super::StatisticalTest;
use crate::config::Config;
use crate::constants::{ACRES, CONTAINMENT_DURATION, DECADE};
use crate::error::Result;
use crate::processor::frame::{f64_values, grouped_values, i64_values, summarize_by_integer};
use crate::stats::hypothesis::kruskal_wallis;

use polars::prelude::DataFrame;
use serde::Serialize;
use std::collections::HashMap;

const OPERATION: &str = "decade comparison";
const TEST_NAME: &str = "Kruskal-Wallis (Fire Size by Decade)";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecadeStatistics {
    pub decade: i64,
    pub fire_count: usize,
    pub mean_acres: f64,
    pub total_acres: f64,
    pub mean_duration_hours: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecadeComparison {
    /// Ascending by decade
    pub statistics: Vec<DecadeStatistics>,
    pub test: StatisticalTest,
}

/// Compare fire sizes across decades.
///
/// Acreage is heavily right-skewed, so the decades are compared with the
/// rank-based Kruskal-Wallis test instead of ANOVA.
pub fn compare_decades(df: &DataFrame, config: &Config) -> Result<DecadeComparison> {
    let decades = i64_values(df, DECADE, OPERATION)?;
    let acres = f64_values(df, ACRES, OPERATION)?;
    let durations = f64_values(df, CONTAINMENT_DURATION, OPERATION)?;

    let samples = grouped_values(&decades, &acres)
        .into_values()
        .collect::<Vec<_>>();
    let mean_durations = summarize_by_integer(decades.clone(), durations)?
        .into_iter()
        .map(|(decade, summary)| (decade, summary.mean))
        .collect::<HashMap<_, _>>();

    let statistics = summarize_by_integer(decades, acres)?
        .into_iter()
        .map(|(decade, summary)| DecadeStatistics {
            decade,
            fire_count: summary.count,
            mean_acres: summary.mean,
            total_acres: summary.sum,
            mean_duration_hours: mean_durations.get(&decade).copied(),
        })
        .collect::<Vec<_>>();

    let stats_config = &config.statistics;
    let test = match kruskal_wallis(&samples) {
        Some(result) => StatisticalTest::new(
            TEST_NAME,
            result.h_statistic,
            result.p_value,
            stats_config,
            |significant| {
                format!(
                    "Fire sizes {} across decades (H={:.2}, p={:.4})",
                    if significant {
                        "differ significantly"
                    } else {
                        "do not differ significantly"
                    },
                    result.h_statistic,
                    result.p_value
                )
            },
        ),
        None => StatisticalTest::insufficient(
            TEST_NAME,
            "Kruskal-Wallis needs at least two decades with distinct fire sizes",
            stats_config,
        ),
    };

    Ok(DecadeComparison { statistics, test })
}
