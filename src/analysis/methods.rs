//! Containment method comparison.

use super::StatisticalTest;
use crate::config::{Config, StatsConfig};
use crate::constants::{C_METHOD_DESCRIPTION, EFFECTIVENESS};
use crate::error::Result;
use crate::processor::frame::{f64_values, grouped_values, string_values, summarize_by_text};
use crate::stats::descriptive::GroupSummary;
use crate::stats::distributions::students_t_quantile;
use crate::stats::hypothesis::one_way_anova;

use polars::prelude::DataFrame;
use serde::Serialize;
use tracing::debug;

const OPERATION: &str = "containment method analysis";
const TEST_NAME: &str = "One-way ANOVA (Method Effectiveness)";

/// Effectiveness statistics for one containment method
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodStatistics {
    pub method: String,
    pub count: usize,
    pub mean_effectiveness: f64,
    /// `None` for a single observation
    pub std_effectiveness: Option<f64>,
    pub median_effectiveness: f64,
    pub min_effectiveness: f64,
    pub max_effectiveness: f64,
    /// t-based interval on the mean; `None` below two observations
    pub ci_lower: Option<f64>,
    pub ci_upper: Option<f64>,
}

/// Per-method statistics, highest mean first, plus the ANOVA across methods
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodAnalysis {
    pub statistics: Vec<MethodStatistics>,
    pub anova: StatisticalTest,
}

/// Compare effectiveness across containment methods.
///
/// Needs the `C_METHOD_DESCRIPTION` and `Effectiveness` columns; rows
/// missing either are ignored. The effectiveness metric does not control
/// for fire size, so a significant ANOVA says the ratios differ, not that
/// one method contains fires better.
pub fn analyze_containment_methods(df: &DataFrame, config: &Config) -> Result<MethodAnalysis> {
    let methods = string_values(df, C_METHOD_DESCRIPTION, OPERATION)?;
    let effectiveness = f64_values(df, EFFECTIVENESS, OPERATION)?;
    let samples = grouped_values(&methods, &effectiveness)
        .into_values()
        .collect::<Vec<_>>();

    let stats_config = &config.statistics;
    let mut statistics = summarize_by_text(methods, effectiveness)?
        .into_iter()
        .map(|(method, summary)| method_statistics(method, &summary, stats_config))
        .collect::<Vec<_>>();
    statistics.sort_by(|a, b| {
        b.mean_effectiveness
            .total_cmp(&a.mean_effectiveness)
            .then_with(|| a.method.cmp(&b.method))
    });

    let anova = match one_way_anova(&samples) {
        Some(result) => StatisticalTest::new(
            TEST_NAME,
            result.f_statistic,
            result.p_value,
            stats_config,
            |significant| {
                format!(
                    "Methods show {} differences in effectiveness (F={:.2}, p={:.4})",
                    if significant {
                        "statistically significant"
                    } else {
                        "no significant"
                    },
                    result.f_statistic,
                    result.p_value
                )
            },
        ),
        None => StatisticalTest::insufficient(
            TEST_NAME,
            "ANOVA needs at least two containment methods with within-method variation",
            stats_config,
        ),
    };

    debug!(
        "Method analysis: {} methods, ANOVA p={}",
        statistics.len(),
        anova.p_value
    );

    Ok(MethodAnalysis { statistics, anova })
}

fn method_statistics(method: String, summary: &GroupSummary, config: &StatsConfig) -> MethodStatistics {
    let interval = confidence_interval(summary, config.confidence_level);

    MethodStatistics {
        method,
        count: summary.count,
        mean_effectiveness: summary.mean,
        std_effectiveness: summary.std_dev,
        median_effectiveness: summary.median,
        min_effectiveness: summary.min,
        max_effectiveness: summary.max,
        ci_lower: interval.map(|(lower, _)| lower),
        ci_upper: interval.map(|(_, upper)| upper),
    }
}

/// Two-sided t interval on the group mean with `count - 1` degrees of freedom
pub fn confidence_interval(summary: &GroupSummary, confidence_level: f64) -> Option<(f64, f64)> {
    let std_dev = summary.std_dev?;
    let df = summary.count.checked_sub(1).filter(|df| *df > 0)? as f64;

    let critical = students_t_quantile((1.0 + confidence_level) / 2.0, df);
    let margin = critical * std_dev / (summary.count as f64).sqrt();
    Some((summary.mean - margin, summary.mean + margin))
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    #[test]
    fn test_confidence_interval_width() {
        let summary = GroupSummary::new(&[2.0, 4.0, 6.0, 8.0, 10.0]).unwrap();
        let (lower, upper) = confidence_interval(&summary, 0.95).unwrap();

        // mean 6, sd sqrt(10), t(0.975, 4) = 2.776445
        let margin = 2.776_445_105 * 10f64.sqrt() / 5f64.sqrt();
        assert!((lower - (6.0 - margin)).abs() < 1e-6);
        assert!((upper - (6.0 + margin)).abs() < 1e-6);

        let single = GroupSummary::new(&[3.0]).unwrap();
        assert_eq!(confidence_interval(&single, 0.95), None);
    }

    #[test]
    fn test_methods_sorted_by_mean_descending() {
        let df = df! {
            "C_METHOD_DESCRIPTION" => [Some("Slow"), Some("Fast"), Some("Slow"), Some("Fast"), None, Some("Lone")],
            "Effectiveness" => [1.0, 10.0, 3.0, 12.0, 100.0, 5.0],
        }
        .unwrap();

        let analysis = analyze_containment_methods(&df, &Config::default()).unwrap();
        let names = analysis
            .statistics
            .iter()
            .map(|s| s.method.as_str())
            .collect::<Vec<_>>();

        assert_eq!(names, vec!["Fast", "Lone", "Slow"]);
        assert_eq!(analysis.statistics[0].count, 2);
        assert_eq!(analysis.statistics[0].mean_effectiveness, 11.0);
        assert_eq!(analysis.statistics[1].ci_lower, None);
        assert!(analysis.statistics[2].ci_lower.is_some());
        assert!(analysis.anova.is_conclusive());
    }
}
