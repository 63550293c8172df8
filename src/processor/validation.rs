//! Data-quality validation of cleaned perimeter records.
//!
//! Six rules run in a fixed order, each seeing the rows left by the rules
//! before it. Only the date-order and non-positive-acres rules remove rows;
//! the others record counts and issue strings in the report.

use super::frame::{f64_values, filter_rows, i64_values, require_column, timestamp_values};
use super::timestamp::millis_to_hours;
use crate::config::Config;
use crate::constants::{ACRES, ALARM_DATE, CONT_DATE, YEAR};
use crate::error::Result;
use crate::models::ValidationReport;
use crate::stats::descriptive::{quantile_sorted, sorted_copy};

use chrono::{DateTime, Utc};
use polars::prelude::DataFrame;
use tracing::{info, warn};

const OPERATION: &str = "validation";

/// Validate against the current time.
pub fn validate_fire_data(df: DataFrame, config: &Config) -> Result<(DataFrame, ValidationReport)> {
    validate_fire_data_at(df, config, Utc::now())
}

/// Validate with an explicit reference time for the future-date rule.
///
/// Identical input, configuration and `now` always produce the same frame
/// and report.
pub fn validate_fire_data_at(
    df: DataFrame,
    config: &Config,
    now: DateTime<Utc>,
) -> Result<(DataFrame, ValidationReport)> {
    for column in [YEAR, ACRES, ALARM_DATE, CONT_DATE] {
        require_column(&df, column, OPERATION)?;
    }

    let mut report = ValidationReport {
        initial_rows: df.height(),
        ..Default::default()
    };

    let df = check_date_order(df, &mut report)?;
    check_future_dates(&df, now, &mut report)?;
    check_acres_outliers(&df, config.validation.outlier_iqr_multiplier, &mut report)?;
    check_extreme_durations(&df, config.validation.max_containment_hours, &mut report)?;
    let df = check_positive_acres(df, &mut report)?;
    check_year_range(&df, config, &mut report)?;

    report.final_rows = df.height();
    report.rows_removed = report.initial_rows - report.final_rows;

    info!(
        "Validation complete: {} rows removed, {} rows retained ({:.1}%)",
        report.rows_removed,
        report.final_rows,
        report.retention_rate()
    );
    if report.has_issues() {
        warn!("{} validation issue(s) found", report.issues.len());
    } else {
        info!("PASS: no critical validation issues found");
    }

    Ok((df, report))
}

/// Rule 1: containment must not precede the alarm
fn check_date_order(df: DataFrame, report: &mut ValidationReport) -> Result<DataFrame> {
    let alarms = timestamp_values(&df, ALARM_DATE, OPERATION)?;
    let containments = timestamp_values(&df, CONT_DATE, OPERATION)?;

    let invalid = alarms
        .iter()
        .zip(&containments)
        .filter(|(alarm, cont)| matches!((alarm, cont), (Some(a), Some(c)) if c < a))
        .count();

    if invalid == 0 {
        info!("PASS: all dates follow correct logic (containment after alarm)");
        return Ok(df);
    }

    warn!("{} rows have containment date before alarm date", invalid);
    report.invalid_date_count = invalid;
    report
        .issues
        .push(format!("Invalid date logic: {invalid} rows"));

    // Rows without both timestamps cannot satisfy the ordering either
    let keep = alarms
        .iter()
        .zip(&containments)
        .map(|(alarm, cont)| matches!((alarm, cont), (Some(a), Some(c)) if c >= a))
        .collect::<Vec<_>>();
    filter_rows(&df, &keep)
}

/// Rule 2: timestamps after `now` are reported only
fn check_future_dates(
    df: &DataFrame,
    now: DateTime<Utc>,
    report: &mut ValidationReport,
) -> Result<()> {
    let now_millis = now.timestamp_millis();
    let count_future = |values: Vec<Option<i64>>| {
        values
            .into_iter()
            .flatten()
            .filter(|millis| *millis > now_millis)
            .count()
    };

    report.future_alarm_count = count_future(timestamp_values(df, ALARM_DATE, OPERATION)?);
    report.future_containment_count = count_future(timestamp_values(df, CONT_DATE, OPERATION)?);

    if report.future_alarm_count > 0 || report.future_containment_count > 0 {
        warn!(
            "{} alarm dates and {} containment dates are in the future",
            report.future_alarm_count, report.future_containment_count
        );
        report.issues.push("Future dates detected".to_string());
    } else {
        info!("PASS: no future dates detected");
    }

    Ok(())
}

/// Rule 3: IQR fence on acres, counted only
fn check_acres_outliers(
    df: &DataFrame,
    multiplier: f64,
    report: &mut ValidationReport,
) -> Result<()> {
    let acres = f64_values(df, ACRES, OPERATION)?
        .into_iter()
        .flatten()
        .collect::<Vec<_>>();
    let sorted = sorted_copy(&acres);

    let (Some(q1), Some(q3)) = (quantile_sorted(&sorted, 0.25), quantile_sorted(&sorted, 0.75))
    else {
        info!("No acres values to check for outliers");
        return Ok(());
    };

    let iqr = q3 - q1;
    let lower = q1 - multiplier * iqr;
    let upper = q3 + multiplier * iqr;
    let outliers = sorted.iter().filter(|v| **v < lower || **v > upper).count();

    report.outlier_count = outliers;
    report.outlier_lower_bound = Some(lower);
    report.outlier_upper_bound = Some(upper);
    report.acres_min = sorted.first().copied();
    report.acres_max = sorted.last().copied();
    report.acres_median = quantile_sorted(&sorted, 0.5);

    info!(
        "Acres outliers ({}x IQR): {} fires ({:.1}%), range {:.1} to {:.1} acres, median {:.1}",
        multiplier,
        outliers,
        outliers as f64 / sorted.len() as f64 * 100.0,
        report.acres_min.unwrap_or(f64::NAN),
        report.acres_max.unwrap_or(f64::NAN),
        report.acres_median.unwrap_or(f64::NAN),
    );

    Ok(())
}

/// Rule 4: very long containment durations are reported only
fn check_extreme_durations(
    df: &DataFrame,
    max_hours: f64,
    report: &mut ValidationReport,
) -> Result<()> {
    let alarms = timestamp_values(df, ALARM_DATE, OPERATION)?;
    let containments = timestamp_values(df, CONT_DATE, OPERATION)?;

    let extreme = alarms
        .iter()
        .zip(&containments)
        .filter_map(|(alarm, cont)| Some(millis_to_hours((*cont)? - (*alarm)?)))
        .filter(|hours| *hours > max_hours)
        .count();

    report.extreme_duration_count = extreme;
    if extreme > 0 {
        warn!("{} fires took longer than {} hours to contain", extreme, max_hours);
        report
            .issues
            .push(format!("Extreme durations: {extreme} rows"));
    } else {
        info!("PASS: all containment durations are within {} hours", max_hours);
    }

    Ok(())
}

/// Rule 5: burned area must be positive
fn check_positive_acres(df: DataFrame, report: &mut ValidationReport) -> Result<DataFrame> {
    let acres = f64_values(&df, ACRES, OPERATION)?;
    let invalid = acres
        .iter()
        .filter(|value| matches!(value, Some(v) if *v <= 0.0))
        .count();

    if invalid == 0 {
        info!("PASS: all fire acres are positive");
        return Ok(df);
    }

    warn!("{} fires have zero or negative acres", invalid);
    report.invalid_acres_count = invalid;
    report.issues.push(format!("Invalid acres: {invalid} rows"));

    let keep = acres
        .iter()
        .map(|value| matches!(value, Some(v) if *v > 0.0))
        .collect::<Vec<_>>();
    filter_rows(&df, &keep)
}

/// Rule 6: observed year range, compared against the configured bounds
fn check_year_range(df: &DataFrame, config: &Config, report: &mut ValidationReport) -> Result<()> {
    let years = i64_values(df, YEAR, OPERATION)?
        .into_iter()
        .flatten()
        .collect::<Vec<_>>();
    report.min_year = years.iter().min().copied();
    report.max_year = years.iter().max().copied();

    if let Some((min, max)) = report.year_range() {
        info!("Year range: {} to {}", min, max);
        let bounds = &config.validation;
        if min < bounds.min_year || max > bounds.max_year {
            warn!(
                "Year range {}-{} extends beyond the expected {}-{}",
                min, max, bounds.min_year, bounds.max_year
            );
        }
    }

    Ok(())
}
