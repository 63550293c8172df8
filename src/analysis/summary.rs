//! Dataset-wide summary statistics.

use crate::constants::{ACRES, CONTAINMENT_DURATION, FIRE_SIZE_PERCENTILES, YEAR};
use crate::error::{FireError, Result};
use crate::processor::frame::{f64_values, has_column, i64_values};
use crate::stats::descriptive::{mean, median, quantile_sorted, sorted_copy};

use polars::prelude::DataFrame;
use serde::Serialize;

const OPERATION: &str = "summary statistics";

/// One acres percentile
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FireSizePercentile {
    pub percentile: u8,
    pub acres: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryStatistics {
    pub total_fires: usize,
    /// Earliest and latest fire year
    pub year_range: Option<(i64, i64)>,
    pub total_acres_burned: f64,
    pub mean_fire_size: f64,
    pub median_fire_size: f64,
    pub max_fire_size: f64,
    /// `None` when containment duration has not been derived
    pub mean_containment_hours: Option<f64>,
    pub median_containment_hours: Option<f64>,
    pub fire_size_percentiles: Vec<FireSizePercentile>,
}

impl SummaryStatistics {
    /// Acres at the given percentile, if it was computed
    pub fn percentile(&self, percentile: u8) -> Option<f64> {
        self.fire_size_percentiles
            .iter()
            .find(|p| p.percentile == percentile)
            .map(|p| p.acres)
    }
}

/// Summarize fire counts, sizes and containment times.
///
/// `total_fires` counts every row; the size statistics use the rows with an
/// acres value. Percentiles interpolate linearly between order statistics.
pub fn summary_statistics(df: &DataFrame) -> Result<SummaryStatistics> {
    let years = i64_values(df, YEAR, OPERATION)?;
    let acres = f64_values(df, ACRES, OPERATION)?;

    let sorted_acres = sorted_copy(&acres.into_iter().flatten().collect::<Vec<_>>());
    let Some(max_fire_size) = sorted_acres.last().copied() else {
        return Err(FireError::EmptyDataset { operation: OPERATION });
    };

    let total_acres_burned = sorted_acres.iter().sum::<f64>();
    let mean_fire_size = total_acres_burned / sorted_acres.len() as f64;
    let median_fire_size = quantile_sorted(&sorted_acres, 0.5).unwrap_or(f64::NAN);

    let year_range = years
        .iter()
        .flatten()
        .fold(None, |range: Option<(i64, i64)>, year| match range {
            Some((lo, hi)) => Some((lo.min(*year), hi.max(*year))),
            None => Some((*year, *year)),
        });

    let durations = if has_column(df, CONTAINMENT_DURATION) {
        Some(
            f64_values(df, CONTAINMENT_DURATION, OPERATION)?
                .into_iter()
                .flatten()
                .collect::<Vec<_>>(),
        )
    } else {
        None
    };

    let fire_size_percentiles = FIRE_SIZE_PERCENTILES
        .iter()
        .filter_map(|p| {
            quantile_sorted(&sorted_acres, f64::from(*p) / 100.0).map(|acres| FireSizePercentile {
                percentile: *p,
                acres,
            })
        })
        .collect();

    Ok(SummaryStatistics {
        total_fires: df.height(),
        year_range,
        total_acres_burned,
        mean_fire_size,
        median_fire_size,
        max_fire_size,
        mean_containment_hours: durations.as_deref().and_then(mean),
        median_containment_hours: durations.as_deref().and_then(median),
        fire_size_percentiles,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    #[test]
    fn test_three_fire_summary() {
        let df = df! {
            "YEAR_" => [2000i64, 2000, 2001],
            "GIS_ACRES" => [10.0, 20.0, 30.0],
        }
        .unwrap();

        let summary = summary_statistics(&df).unwrap();

        assert_eq!(summary.total_fires, 3);
        assert_eq!(summary.year_range, Some((2000, 2001)));
        assert_eq!(summary.total_acres_burned, 60.0);
        assert_eq!(summary.mean_fire_size, 20.0);
        assert_eq!(summary.median_fire_size, 20.0);
        assert_eq!(summary.max_fire_size, 30.0);
        assert_eq!(summary.mean_containment_hours, None);
        assert_eq!(summary.percentile(25), Some(15.0));
        assert_eq!(summary.percentile(75), Some(25.0));
        assert_eq!(summary.percentile(50), None);
    }

    #[test]
    fn test_containment_hours_when_derived() {
        let df = df! {
            "YEAR_" => [2010i64, 2011],
            "GIS_ACRES" => [5.0, 15.0],
            "Containment_Duration" => [Some(2.0), Some(6.0)],
        }
        .unwrap();

        let summary = summary_statistics(&df).unwrap();
        assert_eq!(summary.mean_containment_hours, Some(4.0));
        assert_eq!(summary.median_containment_hours, Some(4.0));
    }

    #[test]
    fn test_empty_frame_is_an_error() {
        let df = df! {
            "YEAR_" => Vec::<i64>::new(),
            "GIS_ACRES" => Vec::<f64>::new(),
        }
        .unwrap();

        assert!(matches!(
            summary_statistics(&df),
            Err(FireError::EmptyDataset { .. })
        ));
    }
}
