//! Statistical analysis of derived wildfire records.
//!
//! Each analysis reads the derived frame plus configuration and returns
//! typed summary rows together with a [`StatisticalTest`]. Inputs too small
//! for a test never panic; the test comes back with NaN statistic and
//! p-value and an interpretation starting with "Insufficient data".

pub mod causes;
pub mod decades;
pub mod effectiveness;
pub mod methods;
pub mod report;
pub mod summary;
pub mod tables;
pub mod temporal;


pub use causes::{CauseStatistics, cause_analysis};
pub use decades::{DecadeComparison, DecadeStatistics, compare_decades};
pub use effectiveness::{EFFECTIVENESS_CAVEAT, calculate_containment_effectiveness};
pub use methods::{MethodAnalysis, MethodStatistics, analyze_containment_methods};
pub use report::{AnalysisReport, generate_analysis_report};
pub use summary::{SummaryStatistics, summary_statistics};
pub use tables::export_summary_tables;
pub use temporal::{
    LinearTrend, MonthlyStatistics, SeasonalAnalysis, TemporalAnalysis, YearlyStatistics,
    seasonal_analysis, temporal_trend_analysis,
};

use crate::config::StatsConfig;
use serde::Serialize;

/// Outcome of one hypothesis test
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatisticalTest {
    pub test_name: String,
    pub statistic: f64,
    pub p_value: f64,
    /// `p_value` below the configured significance threshold
    pub significant: bool,
    pub interpretation: String,
    pub confidence_level: f64,
}

impl StatisticalTest {
    /// Build a result, deriving significance from the configured threshold.
    ///
    /// `interpret` receives the significance flag and returns the
    /// human-readable interpretation.
    pub fn new(
        test_name: &str,
        statistic: f64,
        p_value: f64,
        config: &StatsConfig,
        interpret: impl FnOnce(bool) -> String,
    ) -> Self {
        let significant = p_value < config.significance_threshold;
        Self {
            test_name: test_name.to_string(),
            statistic,
            p_value,
            significant,
            interpretation: interpret(significant),
            confidence_level: config.confidence_level,
        }
    }

    /// Result for a test whose input cannot support it
    pub fn insufficient(test_name: &str, reason: &str, config: &StatsConfig) -> Self {
        Self {
            test_name: test_name.to_string(),
            statistic: f64::NAN,
            p_value: f64::NAN,
            significant: false,
            interpretation: format!("Insufficient data: {reason}"),
            confidence_level: config.confidence_level,
        }
    }

    /// False for "Insufficient data" results
    pub fn is_conclusive(&self) -> bool {
        !self.p_value.is_nan()
    }
}
