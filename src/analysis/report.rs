//! Full analysis report over a derived frame.

use super::StatisticalTest;
use super::causes::{CauseStatistics, cause_analysis};
use super::decades::{DecadeComparison, compare_decades};
use super::effectiveness::{EFFECTIVENESS_CAVEAT, calculate_containment_effectiveness};
use super::methods::{MethodAnalysis, analyze_containment_methods};
use super::summary::{SummaryStatistics, summary_statistics};
use super::temporal::{SeasonalAnalysis, TemporalAnalysis, seasonal_analysis, temporal_trend_analysis};
use crate::config::Config;
use crate::constants::{
    C_METHOD_DESCRIPTION, CAUSE_DESCRIPTION, CONTAINMENT_DURATION, DECADE, EFFECTIVENESS, MONTH,
};
use crate::error::{FireError, Result};
use crate::processor::frame::has_column;

use polars::prelude::DataFrame;
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Every analysis whose input columns were present
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub summary_statistics: SummaryStatistics,
    pub method_analysis: Option<MethodAnalysis>,
    pub temporal_analysis: TemporalAnalysis,
    pub seasonal_analysis: Option<SeasonalAnalysis>,
    pub cause_analysis: Option<Vec<CauseStatistics>>,
    pub decade_comparison: Option<DecadeComparison>,
    /// Limitations of the effectiveness metric used by `method_analysis`
    pub effectiveness_caveat: String,
}

impl AnalysisReport {
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the report as pretty-printed JSON, creating parent directories.
    ///
    /// Non-finite statistics from insufficient-data tests serialize as `null`.
    pub fn write_json(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = self.to_json_pretty()?;
        fs::write(path, json).map_err(|e| FireError::OutputFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        info!("Analysis report written to {}", path.display());
        Ok(())
    }

    /// Tests that reached a conclusion, in report order
    pub fn conclusive_tests(&self) -> Vec<&StatisticalTest> {
        let tests = [
            self.method_analysis.as_ref().map(|m| &m.anova),
            Some(&self.temporal_analysis.trend_test),
            self.seasonal_analysis.as_ref().map(|s| &s.test),
            self.decade_comparison.as_ref().map(|d| &d.test),
        ];
        tests
            .into_iter()
            .flatten()
            .filter(|t| t.is_conclusive())
            .collect()
    }
}

/// Run the statistics engine over a derived frame.
///
/// Summary statistics and the temporal trend always run. The method
/// comparison runs when `C_METHOD_DESCRIPTION` exists, computing the
/// effectiveness metric first if the frame does not carry it. Seasonal,
/// cause and decade analyses run when their derived columns exist.
pub fn generate_analysis_report(df: &DataFrame, config: &Config) -> Result<AnalysisReport> {
    let summary_statistics = summary_statistics(df)?;
    let temporal_analysis = temporal_trend_analysis(df, config)?;

    let method_analysis = if has_column(df, C_METHOD_DESCRIPTION) {
        let analysis = if has_column(df, EFFECTIVENESS) {
            analyze_containment_methods(df, config)?
        } else {
            let with_effectiveness = calculate_containment_effectiveness(df.clone())?;
            analyze_containment_methods(&with_effectiveness, config)?
        };
        Some(analysis)
    } else {
        debug!("Skipping method analysis: no {} column", C_METHOD_DESCRIPTION);
        None
    };

    let seasonal_analysis = if has_column(df, MONTH) {
        Some(seasonal_analysis(df, config)?)
    } else {
        debug!("Skipping seasonal analysis: no {} column", MONTH);
        None
    };

    let cause_analysis = if has_column(df, CAUSE_DESCRIPTION) {
        Some(cause_analysis(df)?)
    } else {
        debug!("Skipping cause analysis: no {} column", CAUSE_DESCRIPTION);
        None
    };

    let decade_comparison = if has_column(df, DECADE) && has_column(df, CONTAINMENT_DURATION) {
        Some(compare_decades(df, config)?)
    } else {
        debug!("Skipping decade comparison: frame has not been derived");
        None
    };

    let report = AnalysisReport {
        summary_statistics,
        method_analysis,
        temporal_analysis,
        seasonal_analysis,
        cause_analysis,
        decade_comparison,
        effectiveness_caveat: EFFECTIVENESS_CAVEAT.to_string(),
    };

    info!(
        "Analysis complete: {} fires, {} conclusive tests",
        report.summary_statistics.total_fires,
        report.conclusive_tests().len()
    );
    Ok(report)
}
