//! Derived analytical columns.

use super::frame::{
    f64_values, filter_rows, has_column, i64_values, require_column, set_column, timestamp_values,
};
use super::timestamp::{millis_to_hours, month_of};
use crate::config::Config;
use crate::constants::{
    ALARM_DATE, C_METHOD, C_METHOD_DESCRIPTION, CAUSE, CAUSE_DESCRIPTION, CONT_DATE,
    CONTAINMENT_DURATION, DECADE, MONTH, YEAR,
};
use crate::error::Result;
use crate::mapping::CodeMapping;

use polars::prelude::{DataFrame, NamedFrom, Series};
use tracing::{debug, info};

const OPERATION: &str = "derivation";

/// Add duration, month, decade and code description columns.
///
/// Rows whose containment duration is missing or not strictly positive are
/// removed. Description columns are only added when their code column is
/// present, and are null where the code is missing or not in the table.
pub fn add_derived_columns(df: DataFrame, config: &Config) -> Result<DataFrame> {
    let mut df = df;
    let initial_rows = df.height();

    let alarms = timestamp_values(&df, ALARM_DATE, OPERATION)?;
    let containments = timestamp_values(&df, CONT_DATE, OPERATION)?;
    require_column(&df, YEAR, OPERATION)?;

    let durations = alarms
        .iter()
        .zip(&containments)
        .map(|(alarm, cont)| Some(millis_to_hours((*cont)? - (*alarm)?)))
        .collect::<Vec<_>>();
    let months = alarms
        .iter()
        .map(|alarm| alarm.and_then(month_of))
        .collect::<Vec<_>>();
    let decades = i64_values(&df, YEAR, OPERATION)?
        .into_iter()
        .map(|year| year.map(decade_of))
        .collect::<Vec<_>>();

    let keep = durations
        .iter()
        .map(|hours| matches!(hours, Some(h) if *h > 0.0))
        .collect::<Vec<_>>();

    set_column(&mut df, Series::new(CONTAINMENT_DURATION.into(), durations))?;
    set_column(&mut df, Series::new(MONTH.into(), months))?;
    set_column(&mut df, Series::new(DECADE.into(), decades))?;
    let mut added = 3;

    let mappings = &config.mappings;
    for (code_column, description_column, mapping) in [
        (C_METHOD, C_METHOD_DESCRIPTION, &mappings.containment_methods),
        (CAUSE, CAUSE_DESCRIPTION, &mappings.causes),
    ] {
        if has_column(&df, code_column) {
            let descriptions = describe_codes(&df, code_column, mapping)?;
            set_column(&mut df, Series::new(description_column.into(), descriptions))?;
            added += 1;
        } else {
            debug!("No {} column, skipping {}", code_column, description_column);
        }
    }

    let df = filter_rows(&df, &keep)?;

    info!(
        "Added {} derived columns for analysis, {} rows without a positive duration removed",
        added,
        initial_rows - df.height()
    );

    Ok(df)
}

/// Year floor-divided to its decade; `1989 -> 1980`, `-5 -> -10`
pub fn decade_of(year: i64) -> i64 {
    year.div_euclid(10) * 10
}

fn describe_codes(
    df: &DataFrame,
    code_column: &str,
    mapping: &CodeMapping,
) -> Result<Vec<Option<String>>> {
    Ok(f64_values(df, code_column, OPERATION)?
        .into_iter()
        .map(|code| mapping.describe_value(code).map(str::to_string))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decade_of() {
        assert_eq!(decade_of(1989), 1980);
        assert_eq!(decade_of(2000), 2000);
        assert_eq!(decade_of(2024), 2020);
        assert_eq!(decade_of(-5), -10);
    }
}
