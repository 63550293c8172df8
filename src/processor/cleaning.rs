//! Cleaning of raw perimeter records.
//!
//! Removes records without a year or burned area, coerces the core columns
//! to their analytical types, drops low-utility columns and fills
//! categorical gaps with placeholders. Cleaning its own output returns an
//! equal frame.

use super::frame::{
    f64_values, filter_rows, has_column, i64_values, set_column, string_values, timestamp_series,
    timestamp_values,
};
use crate::config::Config;
use crate::constants::{
    ACRES, AGENCY, ALARM_DATE, CONT_DATE, FIRE_NAME, STATE, UNIT_ID, UNKNOWN_PLACEHOLDER,
    UNNAMED_FIRE_PLACEHOLDER, YEAR,
};
use crate::error::{FireError, Result};
use crate::models::CleaningSummary;

use polars::prelude::{DataFrame, DataType, NamedFrom, Series};
use tracing::{debug, info};

const OPERATION: &str = "cleaning";

/// Categorical columns and the placeholder that replaces their nulls
const PLACEHOLDERS: &[(&str, &str)] = &[
    (AGENCY, UNKNOWN_PLACEHOLDER),
    (UNIT_ID, UNKNOWN_PLACEHOLDER),
    (FIRE_NAME, UNNAMED_FIRE_PLACEHOLDER),
];

/// Clean a raw frame.
///
/// Every configured essential column must exist. Rows missing any of the
/// row-required columns are removed; a year that cannot be read as a number
/// counts as missing. Timestamps that cannot be parsed become null.
pub fn clean_fire_data(df: DataFrame, config: &Config) -> Result<(DataFrame, CleaningSummary)> {
    let cleaning = &config.cleaning;

    for column in &cleaning.essential_columns {
        if !has_column(&df, column) {
            return Err(FireError::missing_column(column.as_str(), OPERATION));
        }
    }

    let initial_rows = df.height();
    let mut df = df;

    let years = i64_values(&df, YEAR, OPERATION)?;
    let acres = f64_values(&df, ACRES, OPERATION)?
        .into_iter()
        .map(|value| value.filter(|v| !v.is_nan()))
        .collect::<Vec<_>>();
    set_column(&mut df, Series::new(YEAR.into(), years))?;
    set_column(&mut df, Series::new(ACRES.into(), acres))?;

    for column in [ALARM_DATE, CONT_DATE] {
        let millis = timestamp_values(&df, column, OPERATION)?;
        set_column(&mut df, timestamp_series(column, millis)?)?;
    }

    let keep = required_rows_mask(&df, &cleaning.row_required_columns)?;
    let mut df = filter_rows(&df, &keep)?;

    let mut columns_dropped = Vec::new();
    for column in &cleaning.columns_to_drop {
        if has_column(&df, column) {
            df = df.drop(column)?;
            columns_dropped.push(column.clone());
        }
    }
    if !columns_dropped.is_empty() {
        debug!("Dropped low-utility columns: {}", columns_dropped.join(", "));
    }

    for (column, placeholder) in PLACEHOLDERS {
        if has_column(&df, column) {
            let filled = string_values(&df, column, OPERATION)?
                .into_iter()
                .map(|value| value.unwrap_or_else(|| (*placeholder).to_string()))
                .collect::<Vec<_>>();
            set_column(&mut df, Series::new((*column).into(), filled))?;
        }
    }

    if has_column(&df, STATE) {
        let state = df
            .column(STATE)?
            .as_materialized_series()
            .cast(&DataType::String)?;
        set_column(&mut df, state)?;
    }

    let summary = CleaningSummary {
        initial_rows,
        final_rows: df.height(),
        columns_dropped,
    };

    info!(
        "Cleaned data: {} rows removed, {} rows retained",
        summary.rows_removed(),
        summary.final_rows
    );

    Ok((df, summary))
}

/// Mask of rows with a value in every required column
fn required_rows_mask(df: &DataFrame, required: &[String]) -> Result<Vec<bool>> {
    let mut keep = vec![true; df.height()];

    for column in required {
        let series = df
            .column(column)
            .map_err(|_| FireError::missing_column(column.as_str(), OPERATION))?
            .as_materialized_series();
        let nulls = series.is_null();
        for (flag, is_null) in keep.iter_mut().zip(&nulls) {
            if is_null.unwrap_or(true) {
                *flag = false;
            }
        }
    }

    Ok(keep)
}
