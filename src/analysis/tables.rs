//! CSV export of the report's summary tables.

use super::report::AnalysisReport;
use crate::error::Result;
use crate::processor::writer::CsvFrameWriter;

use polars::prelude::*;
use std::path::{Path, PathBuf};
use tracing::info;

pub const METHOD_TABLE: &str = "method_statistics.csv";
pub const YEARLY_TABLE: &str = "yearly_statistics.csv";
pub const MONTHLY_TABLE: &str = "monthly_statistics.csv";
pub const CAUSE_TABLE: &str = "cause_statistics.csv";
pub const DECADE_TABLE: &str = "decade_statistics.csv";

/// Write one CSV per summary table present in `report` into `tables_dir`.
///
/// Returns the paths written, in the order above. Tables whose analysis was
/// skipped are not written.
pub fn export_summary_tables(report: &AnalysisReport, tables_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut tables = Vec::new();

    if let Some(methods) = &report.method_analysis {
        let rows = &methods.statistics;
        let df = df! {
            "method" => rows.iter().map(|r| r.method.as_str()).collect::<Vec<_>>(),
            "count" => rows.iter().map(|r| r.count as u64).collect::<Vec<_>>(),
            "mean_effectiveness" => rows.iter().map(|r| r.mean_effectiveness).collect::<Vec<_>>(),
            "std_effectiveness" => rows.iter().map(|r| r.std_effectiveness).collect::<Vec<_>>(),
            "median_effectiveness" => rows.iter().map(|r| r.median_effectiveness).collect::<Vec<_>>(),
            "min_effectiveness" => rows.iter().map(|r| r.min_effectiveness).collect::<Vec<_>>(),
            "max_effectiveness" => rows.iter().map(|r| r.max_effectiveness).collect::<Vec<_>>(),
            "ci_lower" => rows.iter().map(|r| r.ci_lower).collect::<Vec<_>>(),
            "ci_upper" => rows.iter().map(|r| r.ci_upper).collect::<Vec<_>>(),
        }?;
        tables.push((METHOD_TABLE, df));
    }

    let years = &report.temporal_analysis.yearly_statistics;
    let df = df! {
        "year" => years.iter().map(|r| r.year).collect::<Vec<_>>(),
        "fire_count" => years.iter().map(|r| r.fire_count as u64).collect::<Vec<_>>(),
        "total_acres" => years.iter().map(|r| r.total_acres).collect::<Vec<_>>(),
        "mean_acres" => years.iter().map(|r| r.mean_acres).collect::<Vec<_>>(),
        "median_acres" => years.iter().map(|r| r.median_acres).collect::<Vec<_>>(),
    }?;
    tables.push((YEARLY_TABLE, df));

    if let Some(seasonal) = &report.seasonal_analysis {
        let months = &seasonal.monthly_statistics;
        let df = df! {
            "month" => months.iter().map(|r| r.month).collect::<Vec<_>>(),
            "month_name" => months.iter().map(|r| r.month_name.as_str()).collect::<Vec<_>>(),
            "fire_count" => months.iter().map(|r| r.fire_count as u64).collect::<Vec<_>>(),
        }?;
        tables.push((MONTHLY_TABLE, df));
    }

    if let Some(causes) = &report.cause_analysis {
        let df = df! {
            "cause" => causes.iter().map(|r| r.cause.as_str()).collect::<Vec<_>>(),
            "fire_count" => causes.iter().map(|r| r.fire_count as u64).collect::<Vec<_>>(),
            "mean_acres" => causes.iter().map(|r| r.mean_acres).collect::<Vec<_>>(),
            "median_acres" => causes.iter().map(|r| r.median_acres).collect::<Vec<_>>(),
            "total_acres" => causes.iter().map(|r| r.total_acres).collect::<Vec<_>>(),
            "mean_duration_hours" => causes.iter().map(|r| r.mean_duration_hours).collect::<Vec<_>>(),
            "percentage" => causes.iter().map(|r| r.percentage).collect::<Vec<_>>(),
        }?;
        tables.push((CAUSE_TABLE, df));
    }

    if let Some(decades) = &report.decade_comparison {
        let rows = &decades.statistics;
        let df = df! {
            "decade" => rows.iter().map(|r| r.decade).collect::<Vec<_>>(),
            "fire_count" => rows.iter().map(|r| r.fire_count as u64).collect::<Vec<_>>(),
            "mean_acres" => rows.iter().map(|r| r.mean_acres).collect::<Vec<_>>(),
            "total_acres" => rows.iter().map(|r| r.total_acres).collect::<Vec<_>>(),
            "mean_duration_hours" => rows.iter().map(|r| r.mean_duration_hours).collect::<Vec<_>>(),
        }?;
        tables.push((DECADE_TABLE, df));
    }

    let mut written = Vec::with_capacity(tables.len());
    for (file_name, mut df) in tables {
        let writer = CsvFrameWriter::new(tables_dir.join(file_name));
        writer.write(&mut df)?;
        written.push(writer.output_path().to_path_buf());
    }

    info!(
        "Exported {} summary tables to {}",
        written.len(),
        tables_dir.display()
    );
    Ok(written)
}
