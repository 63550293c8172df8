//! Cleaner tests

use super::raw_perimeters;
use crate::config::Config;
use crate::error::FireError;
use crate::processor::clean_fire_data;
use crate::processor::frame::{f64_values, i64_values, string_values, timestamp_dtype};

use polars::prelude::*;

#[test]
fn test_removes_rows_without_year_or_acres() {
    let raw = df! {
        "YEAR_" => [Some("2001"), None, Some("unknown"), Some("2003"), Some("1999.0")],
        "GIS_ACRES" => [Some(1.0), Some(2.0), Some(3.0), None, Some(5.0)],
        "ALARM_DATE" => [None::<&str>, None, None, None, None],
        "CONT_DATE" => [None::<&str>, None, None, None, None],
    }
    .unwrap();

    let (cleaned, summary) = clean_fire_data(raw, &Config::default()).unwrap();

    assert_eq!(summary.initial_rows, 5);
    assert_eq!(summary.final_rows, 2);
    assert_eq!(summary.rows_removed(), 3);
    assert_eq!(
        i64_values(&cleaned, "YEAR_", "test").unwrap(),
        vec![Some(2001), Some(1999)]
    );
    assert_eq!(
        f64_values(&cleaned, "GIS_ACRES", "test").unwrap(),
        vec![Some(1.0), Some(5.0)]
    );
}

#[test]
fn test_coerces_core_column_types() {
    let (cleaned, _) = clean_fire_data(raw_perimeters(), &Config::default()).unwrap();

    assert_eq!(cleaned.column("YEAR_").unwrap().dtype(), &DataType::Int64);
    assert_eq!(cleaned.column("GIS_ACRES").unwrap().dtype(), &DataType::Float64);
    assert_eq!(cleaned.column("ALARM_DATE").unwrap().dtype(), &timestamp_dtype());
    assert_eq!(cleaned.column("CONT_DATE").unwrap().dtype(), &timestamp_dtype());
    assert_eq!(cleaned.column("STATE").unwrap().dtype(), &DataType::String);
}

#[test]
fn test_unparseable_timestamps_become_null() {
    let raw = df! {
        "YEAR_" => [2020i64, 2020],
        "GIS_ACRES" => [1.0, 2.0],
        "ALARM_DATE" => ["2020-06-15 12:00:00", "sometime in June"],
        "CONT_DATE" => ["not recorded", "2020-06-20"],
    }
    .unwrap();

    let (cleaned, summary) = clean_fire_data(raw, &Config::default()).unwrap();

    assert_eq!(summary.final_rows, 2);
    assert_eq!(cleaned.column("ALARM_DATE").unwrap().null_count(), 1);
    assert_eq!(cleaned.column("CONT_DATE").unwrap().null_count(), 1);
}

#[test]
fn test_drops_low_utility_columns_and_fills_placeholders() {
    let (cleaned, summary) = clean_fire_data(raw_perimeters(), &Config::default()).unwrap();

    assert_eq!(summary.columns_dropped, vec!["COMMENTS", "FIRE_NUM"]);
    assert!(cleaned.column("COMMENTS").is_err());
    assert!(cleaned.column("FIRE_NUM").is_err());

    // Row 2 (no year) is gone; the others keep their order
    assert_eq!(
        string_values(&cleaned, "AGENCY", "test").unwrap(),
        vec![
            Some("CDF".to_string()),
            Some("Unknown".to_string()),
            Some("CDF".to_string()),
            Some("Unknown".to_string()),
        ]
    );
    assert_eq!(
        string_values(&cleaned, "UNIT_ID", "test").unwrap()[3],
        Some("Unknown".to_string())
    );
    assert_eq!(
        string_values(&cleaned, "FIRE_NAME", "test").unwrap(),
        vec![
            Some("RIVER".to_string()),
            Some("Unnamed Fire".to_string()),
            Some("Unnamed Fire".to_string()),
            Some("CREEK".to_string()),
        ]
    );
    assert_eq!(cleaned.column("AGENCY").unwrap().null_count(), 0);
}

#[test]
fn test_optional_columns_may_be_absent() {
    let raw = df! {
        "YEAR_" => [2020i64],
        "GIS_ACRES" => [1.0],
        "ALARM_DATE" => ["2020-06-15"],
        "CONT_DATE" => ["2020-06-16"],
    }
    .unwrap();

    let (cleaned, summary) = clean_fire_data(raw, &Config::default()).unwrap();
    assert_eq!(cleaned.width(), 4);
    assert!(summary.columns_dropped.is_empty());
}

#[test]
fn test_missing_essential_column_is_an_error() {
    let raw = df! {
        "YEAR_" => [2020i64],
        "GIS_ACRES" => [1.0],
        "ALARM_DATE" => ["2020-06-15"],
    }
    .unwrap();

    let result = clean_fire_data(raw, &Config::default());
    assert!(matches!(
        result,
        Err(FireError::MissingColumn { ref column, .. }) if column == "CONT_DATE"
    ));
}

#[test]
fn test_cleaning_is_idempotent() {
    let config = Config::default();
    let (once, _) = clean_fire_data(raw_perimeters(), &config).unwrap();
    let (twice, summary) = clean_fire_data(once.clone(), &config).unwrap();

    assert_eq!(summary.rows_removed(), 0);
    assert!(summary.columns_dropped.is_empty());
    assert!(once.equals_missing(&twice));
}
