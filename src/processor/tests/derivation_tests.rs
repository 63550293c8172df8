//! Derivation engine tests

use super::{cleaned_frame, raw_perimeters, reference_time};
use crate::config::Config;
use crate::processor::frame::{f64_values, i64_values, string_values};
use crate::processor::{add_derived_columns, clean_fire_data, validate_fire_data_at};

use polars::prelude::*;

fn derived_fixture() -> DataFrame {
    let config = Config::default();
    let (cleaned, _) = clean_fire_data(raw_perimeters(), &config).unwrap();
    let (validated, _) = validate_fire_data_at(cleaned, &config, reference_time()).unwrap();
    add_derived_columns(validated, &config).unwrap()
}

#[test]
fn test_adds_duration_month_and_decade() {
    let derived = derived_fixture();

    assert_eq!(derived.height(), 2);
    assert_eq!(
        f64_values(&derived, "Containment_Duration", "test").unwrap(),
        vec![Some(10.0), Some(48.0)]
    );
    assert_eq!(derived.column("Month").unwrap().dtype(), &DataType::Int32);
    assert_eq!(
        i64_values(&derived, "Month", "test").unwrap(),
        vec![Some(6), Some(9)]
    );
    assert_eq!(
        i64_values(&derived, "Decade", "test").unwrap(),
        vec![Some(2020), Some(2010)]
    );
}

#[test]
fn test_code_descriptions_propagate_nulls() {
    let derived = derived_fixture();

    assert_eq!(
        string_values(&derived, "C_METHOD_DESCRIPTION", "test").unwrap(),
        vec![Some("Direct Attack (Hand Crews & Tools)".to_string()), None]
    );
    assert_eq!(
        string_values(&derived, "CAUSE_DESCRIPTION", "test").unwrap(),
        vec![Some("Lightning".to_string()), Some("Arson".to_string())]
    );
}

#[test]
fn test_description_columns_need_code_columns() {
    let frame = cleaned_frame(&[(
        1989,
        5.0,
        Some("1989-03-01 00:00:00"),
        Some("1989-03-01 06:00:00"),
    )]);

    let derived = add_derived_columns(frame, &Config::default()).unwrap();

    assert!(derived.column("C_METHOD_DESCRIPTION").is_err());
    assert!(derived.column("CAUSE_DESCRIPTION").is_err());
    assert_eq!(i64_values(&derived, "Decade", "test").unwrap(), vec![Some(1980)]);
    assert_eq!(
        f64_values(&derived, "Containment_Duration", "test").unwrap(),
        vec![Some(6.0)]
    );
}

#[test]
fn test_drops_rows_without_positive_duration() {
    let frame = cleaned_frame(&[
        (2020, 1.0, Some("2020-06-01 08:00:00"), Some("2020-06-01 08:00:00")),
        (2020, 2.0, Some("2020-06-01 08:00:00"), None),
        (2020, 3.0, None, Some("2020-06-01 08:00:00")),
        (2020, 4.0, Some("2020-06-01 08:00:00"), Some("2020-06-01 08:30:00")),
    ]);

    let derived = add_derived_columns(frame, &Config::default()).unwrap();

    assert_eq!(derived.height(), 1);
    assert_eq!(
        f64_values(&derived, "Containment_Duration", "test").unwrap(),
        vec![Some(0.5)]
    );
}

#[test]
fn test_equal_timestamps_retained_by_validation_then_dropped() {
    let frame = cleaned_frame(&[
        (2020, 1.0, Some("2020-06-01 08:00:00"), Some("2020-06-01 08:00:00")),
        (2020, 2.0, Some("2020-06-01 08:00:00"), Some("2020-06-02 08:00:00")),
    ]);
    let config = Config::default();

    let (validated, report) = validate_fire_data_at(frame, &config, reference_time()).unwrap();
    assert_eq!(report.final_rows, 2);

    let derived = add_derived_columns(validated, &config).unwrap();
    assert_eq!(derived.height(), 1);
}

#[test]
fn test_post_derivation_invariants() {
    let derived = derived_fixture();

    for hours in f64_values(&derived, "Containment_Duration", "test").unwrap() {
        assert!(hours.unwrap() > 0.0);
    }
    for month in i64_values(&derived, "Month", "test").unwrap() {
        assert!((1..=12).contains(&month.unwrap()));
    }
    let years = i64_values(&derived, "YEAR_", "test").unwrap();
    let decades = i64_values(&derived, "Decade", "test").unwrap();
    for (year, decade) in years.iter().zip(&decades) {
        let (year, decade) = (year.unwrap(), decade.unwrap());
        assert_eq!(decade % 10, 0);
        assert!(decade <= year && year < decade + 10);
    }
}
