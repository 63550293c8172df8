//! Year-over-year trend and seasonal distribution of fires.

use super::StatisticalTest;
use crate::config::Config;
use crate::constants::{ACRES, MONTH, YEAR};
use crate::error::Result;
use crate::processor::frame::{f64_values, i64_values, summarize_by_integer};
use crate::stats::hypothesis::{chi_square_uniform, linear_regression};

use polars::prelude::DataFrame;
use serde::Serialize;

const TREND_OPERATION: &str = "temporal trend analysis";
const SEASONAL_OPERATION: &str = "seasonal analysis";
const TREND_TEST_NAME: &str = "Linear Trend (Fire Count)";
const SEASONAL_TEST_NAME: &str = "Chi-Square (Seasonal Distribution)";

/// Fire counts and sizes for one year
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearlyStatistics {
    pub year: i64,
    pub fire_count: usize,
    pub total_acres: f64,
    pub mean_acres: f64,
    pub median_acres: f64,
}

/// Least-squares fit of yearly fire count on year
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearTrend {
    /// Change in fires per year
    pub slope: f64,
    pub intercept: f64,
    pub r_value: f64,
    pub r_squared: f64,
    pub p_value: f64,
    pub std_err: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemporalAnalysis {
    /// Ascending by year
    pub yearly_statistics: Vec<YearlyStatistics>,
    /// `None` when fewer than three years are present
    pub trend: Option<LinearTrend>,
    /// Statistic is the correlation coefficient `r`
    pub trend_test: StatisticalTest,
}

/// Fit a linear trend to the number of fires per year.
///
/// Rows without a year or acres value are ignored.
pub fn temporal_trend_analysis(df: &DataFrame, config: &Config) -> Result<TemporalAnalysis> {
    let years = i64_values(df, YEAR, TREND_OPERATION)?;
    let acres = f64_values(df, ACRES, TREND_OPERATION)?;

    let yearly_statistics = summarize_by_integer(years, acres)?
        .into_iter()
        .map(|(year, summary)| YearlyStatistics {
            year,
            fire_count: summary.count,
            total_acres: summary.sum,
            mean_acres: summary.mean,
            median_acres: summary.median,
        })
        .collect::<Vec<_>>();

    let x = yearly_statistics
        .iter()
        .map(|y| y.year as f64)
        .collect::<Vec<_>>();
    let y = yearly_statistics
        .iter()
        .map(|y| y.fire_count as f64)
        .collect::<Vec<_>>();

    let stats_config = &config.statistics;
    let trend = linear_regression(&x, &y).map(|fit| LinearTrend {
        slope: fit.slope,
        intercept: fit.intercept,
        r_value: fit.r_value,
        r_squared: fit.r_squared,
        p_value: fit.p_value,
        std_err: fit.std_err,
    });

    let trend_test = match trend {
        Some(fit) => StatisticalTest::new(
            TREND_TEST_NAME,
            fit.r_value,
            fit.p_value,
            stats_config,
            |significant| {
                format!(
                    "{} linear trend detected. R²={:.4}, slope={:.4} fires/year (p={:.4})",
                    if significant { "Significant" } else { "No significant" },
                    fit.r_squared,
                    fit.slope,
                    fit.p_value
                )
            },
        ),
        None => StatisticalTest::insufficient(
            TREND_TEST_NAME,
            "a linear trend needs at least three distinct years",
            stats_config,
        ),
    };

    Ok(TemporalAnalysis {
        yearly_statistics,
        trend,
        trend_test,
    })
}

/// Fire count for one calendar month
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyStatistics {
    pub month: u32,
    pub month_name: String,
    pub fire_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonalAnalysis {
    /// All twelve months in calendar order, zero-filled
    pub monthly_statistics: Vec<MonthlyStatistics>,
    /// Month with the most fires, earliest on ties
    pub peak_month: Option<u32>,
    pub test: StatisticalTest,
}

/// Test whether fires are spread evenly across the twelve months.
///
/// Months with no fires count as zero observations, so the test always has
/// eleven degrees of freedom.
pub fn seasonal_analysis(df: &DataFrame, config: &Config) -> Result<SeasonalAnalysis> {
    let months = i64_values(df, MONTH, SEASONAL_OPERATION)?;

    let mut counts = [0usize; 12];
    for month in months.into_iter().flatten() {
        if (1..=12).contains(&month) {
            counts[(month - 1) as usize] += 1;
        }
    }

    let monthly_statistics = counts
        .iter()
        .enumerate()
        .map(|(index, count)| {
            let month = index as u32 + 1;
            MonthlyStatistics {
                month,
                month_name: month_name(month),
                fire_count: *count,
            }
        })
        .collect::<Vec<_>>();

    let peak_month = monthly_statistics
        .iter()
        .filter(|m| m.fire_count > 0)
        .fold(None::<&MonthlyStatistics>, |best, m| match best {
            Some(b) if b.fire_count >= m.fire_count => Some(b),
            _ => Some(m),
        })
        .map(|m| m.month);

    let observed = counts.iter().map(|c| *c as f64).collect::<Vec<_>>();
    let stats_config = &config.statistics;
    let test = match chi_square_uniform(&observed) {
        Some(result) => StatisticalTest::new(
            SEASONAL_TEST_NAME,
            result.statistic,
            result.p_value,
            stats_config,
            |significant| {
                format!(
                    "Fire occurrence {} across months (χ²={:.2}, p={:.4})",
                    if significant {
                        "varies significantly"
                    } else {
                        "does not vary significantly"
                    },
                    result.statistic,
                    result.p_value
                )
            },
        ),
        None => StatisticalTest::insufficient(
            SEASONAL_TEST_NAME,
            "no fires with a recorded month",
            stats_config,
        ),
    };

    Ok(SeasonalAnalysis {
        monthly_statistics,
        peak_month,
        test,
    })
}

fn month_name(month: u32) -> String {
    u8::try_from(month)
        .ok()
        .and_then(|m| chrono::Month::try_from(m).ok())
        .map(|m| m.name().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_names() {
        assert_eq!(month_name(1), "January");
        assert_eq!(month_name(12), "December");
        assert_eq!(month_name(13), "");
    }
}
