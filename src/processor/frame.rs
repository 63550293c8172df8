//! Typed column access over polars frames.
//!
//! Pipeline stages read columns into plain vectors, work on them row by
//! row, and write the result back as a new column or a row mask. Reads are
//! lenient: values that cannot be represented in the requested type come
//! back as `None`.

use crate::error::{FireError, Result};
use crate::processor::timestamp::parse_timestamp_millis;
use crate::stats::descriptive::GroupSummary;

use polars::prelude::{
    BooleanChunked, Column, DataFrame, DataType, IntoLazy, NamedFrom, NewChunkedArray, Series,
    SortMultipleOptions, TimeUnit, col, len,
};

const GROUP_OPERATION: &str = "group summary";
const GROUP_KEY: &str = "key";
const GROUP_VALUE: &str = "value";
const GROUP_COUNT: &str = "count";
const GROUP_SUM: &str = "sum";
const GROUP_MEAN: &str = "mean";
const GROUP_STD: &str = "std";
const GROUP_MEDIAN: &str = "median";
const GROUP_MIN: &str = "min";
const GROUP_MAX: &str = "max";

/// Physical type used for the alarm and containment columns
pub fn timestamp_dtype() -> DataType {
    DataType::Datetime(TimeUnit::Milliseconds, None)
}

pub fn has_column(df: &DataFrame, name: &str) -> bool {
    df.get_column_index(name).is_some()
}

/// Look up a column or fail with the operation that needed it
pub fn require_column<'a>(
    df: &'a DataFrame,
    name: &str,
    operation: &'static str,
) -> Result<&'a Column> {
    df.column(name)
        .map_err(|_| FireError::missing_column(name, operation))
}

/// Read a column as floats; non-numeric values become `None`
pub fn f64_values(df: &DataFrame, name: &str, operation: &'static str) -> Result<Vec<Option<f64>>> {
    let series = require_column(df, name, operation)?
        .as_materialized_series()
        .cast(&DataType::Float64)?;
    Ok(series.f64()?.into_iter().collect())
}

/// Read a column as integers, truncating fractional values toward zero
pub fn i64_values(df: &DataFrame, name: &str, operation: &'static str) -> Result<Vec<Option<i64>>> {
    let column = require_column(df, name, operation)?;
    if column.dtype() == &DataType::Int64 {
        return Ok(column.as_materialized_series().i64()?.into_iter().collect());
    }

    Ok(f64_values(df, name, operation)?
        .into_iter()
        .map(|value| value.filter(|v| v.is_finite()).map(|v| v.trunc() as i64))
        .collect())
}

/// Read a column as owned strings
pub fn string_values(
    df: &DataFrame,
    name: &str,
    operation: &'static str,
) -> Result<Vec<Option<String>>> {
    let series = require_column(df, name, operation)?
        .as_materialized_series()
        .cast(&DataType::String)?;
    Ok(series
        .str()?
        .into_iter()
        .map(|value| value.map(str::to_string))
        .collect())
}

/// Read a timestamp column as UTC epoch milliseconds.
///
/// Datetime and date columns are converted directly; anything else is read
/// as text and parsed leniently.
pub fn timestamp_values(
    df: &DataFrame,
    name: &str,
    operation: &'static str,
) -> Result<Vec<Option<i64>>> {
    let column = require_column(df, name, operation)?;

    match column.dtype() {
        DataType::Datetime(_, _) | DataType::Date => {
            let millis = column
                .as_materialized_series()
                .cast(&timestamp_dtype())?
                .cast(&DataType::Int64)?;
            Ok(millis.i64()?.into_iter().collect())
        }
        _ => Ok(string_values(df, name, operation)?
            .into_iter()
            .map(|value| value.as_deref().and_then(parse_timestamp_millis))
            .collect()),
    }
}

/// Build a millisecond datetime series from epoch values
pub fn timestamp_series(name: &str, values: Vec<Option<i64>>) -> Result<Series> {
    Ok(Series::new(name.into(), values).cast(&timestamp_dtype())?)
}

/// Replace or append a column
pub fn set_column(df: &mut DataFrame, series: Series) -> Result<()> {
    df.with_column(series)?;
    Ok(())
}

/// Keep the rows whose mask entry is `true`
pub fn filter_rows(df: &DataFrame, keep: &[bool]) -> Result<DataFrame> {
    let mask = BooleanChunked::from_slice("keep".into(), keep);
    Ok(df.filter(&mask)?)
}

/// Pair values with a group key, skipping rows where either is missing
pub fn grouped_values<K: Ord + Clone>(
    keys: &[Option<K>],
    values: &[Option<f64>],
) -> std::collections::BTreeMap<K, Vec<f64>> {
    let mut groups = std::collections::BTreeMap::<K, Vec<f64>>::new();
    for (key, value) in keys.iter().zip(values) {
        if let (Some(key), Some(value)) = (key, value) {
            groups.entry(key.clone()).or_default().push(*value);
        }
    }
    groups
}

/// Per-key count, sum, mean, sample std, median, min and max of `values`.
///
/// Rows with a missing key or a missing/NaN value are skipped. The result
/// has one row per key, ascending by key, with the key column named after
/// `keys`.
pub fn group_summary_frame(keys: Series, values: Vec<Option<f64>>) -> Result<DataFrame> {
    let key = keys.name().clone();
    let values = values
        .into_iter()
        .map(|value| value.filter(|v| !v.is_nan()))
        .collect::<Vec<_>>();
    let frame = DataFrame::new(vec![
        keys.into(),
        Series::new(GROUP_VALUE.into(), values).into(),
    ])?;

    let summary = frame
        .lazy()
        .filter(col(key.clone()).is_not_null().and(col(GROUP_VALUE).is_not_null()))
        .group_by([col(key.clone())])
        .agg([
            len().alias(GROUP_COUNT),
            col(GROUP_VALUE).sum().alias(GROUP_SUM),
            col(GROUP_VALUE).mean().alias(GROUP_MEAN),
            col(GROUP_VALUE).std(1).alias(GROUP_STD),
            col(GROUP_VALUE).median().alias(GROUP_MEDIAN),
            col(GROUP_VALUE).min().alias(GROUP_MIN),
            col(GROUP_VALUE).max().alias(GROUP_MAX),
        ])
        .sort_by_exprs([col(key)], SortMultipleOptions::default())
        .collect()?;
    Ok(summary)
}

/// Group summaries keyed by text, ascending by key
pub fn summarize_by_text(
    keys: Vec<Option<String>>,
    values: Vec<Option<f64>>,
) -> Result<Vec<(String, GroupSummary)>> {
    let frame = group_summary_frame(Series::new(GROUP_KEY.into(), keys), values)?;
    let keys = string_values(&frame, GROUP_KEY, GROUP_OPERATION)?;
    Ok(keyed_summaries(keys, summary_rows(&frame)?))
}

/// Group summaries keyed by integer, ascending by key
pub fn summarize_by_integer(
    keys: Vec<Option<i64>>,
    values: Vec<Option<f64>>,
) -> Result<Vec<(i64, GroupSummary)>> {
    let frame = group_summary_frame(Series::new(GROUP_KEY.into(), keys), values)?;
    let keys = i64_values(&frame, GROUP_KEY, GROUP_OPERATION)?;
    Ok(keyed_summaries(keys, summary_rows(&frame)?))
}

fn keyed_summaries<K>(
    keys: Vec<Option<K>>,
    rows: Vec<Option<GroupSummary>>,
) -> Vec<(K, GroupSummary)> {
    keys.into_iter()
        .zip(rows)
        .filter_map(|(key, row)| Some((key?, row?)))
        .collect()
}

fn summary_rows(frame: &DataFrame) -> Result<Vec<Option<GroupSummary>>> {
    let counts = i64_values(frame, GROUP_COUNT, GROUP_OPERATION)?;
    let sums = f64_values(frame, GROUP_SUM, GROUP_OPERATION)?;
    let means = f64_values(frame, GROUP_MEAN, GROUP_OPERATION)?;
    let std_devs = f64_values(frame, GROUP_STD, GROUP_OPERATION)?;
    let medians = f64_values(frame, GROUP_MEDIAN, GROUP_OPERATION)?;
    let mins = f64_values(frame, GROUP_MIN, GROUP_OPERATION)?;
    let maxs = f64_values(frame, GROUP_MAX, GROUP_OPERATION)?;

    Ok((0..frame.height())
        .map(|row| {
            let count = usize::try_from(counts[row]?).ok().filter(|c| *c > 0)?;
            Some(GroupSummary {
                count,
                sum: sums[row]?,
                mean: means[row]?,
                // ddof=1 has no value for a single observation
                std_dev: std_devs[row].filter(|std| count > 1 && std.is_finite()),
                median: medians[row]?,
                min: mins[row]?,
                max: maxs[row]?,
            })
        })
        .collect())
}
