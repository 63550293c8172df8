//! Tests for the processing pipeline stages
//!
//! Frames are built in memory with `df!`; the end-to-end tests write a small
//! perimeter CSV to a temporary directory.

pub mod cleaning_tests;
pub mod derivation_tests;

use crate::config::Config;
use crate::processor::clean_fire_data;

use chrono::{DateTime, Utc};
use polars::prelude::*;

/// Fixed "now" for the future-date rule
pub fn reference_time() -> DateTime<Utc> {
    "2025-01-01T00:00:00Z".parse().unwrap()
}

/// Raw perimeter records covering every cleaning and validation path.
///
/// Row 2 has no year, row 1 was contained before its alarm, row 3 has
/// negative acres and row 4 carries an unmapped containment method.
pub fn raw_perimeters() -> DataFrame {
    df! {
        "YEAR_" => [Some(2020i64), Some(2020), None, Some(2021), Some(2019)],
        "GIS_ACRES" => [Some(100.0), Some(50.0), Some(10.0), Some(-5.0), Some(1_000.0)],
        "ALARM_DATE" => [
            Some("2020/06/15 12:00:00+00"),
            Some("2020/07/01 00:00:00+00"),
            Some("2020/07/02 00:00:00+00"),
            Some("2021/08/01 00:00:00+00"),
            Some("2019/09/10 00:00:00+00"),
        ],
        "CONT_DATE" => [
            Some("2020/06/15 22:00:00+00"),
            Some("2020/06/30 00:00:00+00"),
            None,
            Some("2021/08/02 00:00:00+00"),
            Some("2019/09/12 00:00:00+00"),
        ],
        "AGENCY" => [Some("CDF"), None, Some("USF"), Some("CDF"), None],
        "UNIT_ID" => [Some("LNU"), Some("BEU"), None, Some("SCU"), None],
        "FIRE_NAME" => [Some("RIVER"), None, Some("OAK"), None, Some("CREEK")],
        "STATE" => [Some("CA"), Some("CA"), None, Some("CA"), Some("CA")],
        "C_METHOD" => [Some(1i64), Some(2), None, Some(3), Some(9)],
        "CAUSE" => [Some(1i64), Some(14), Some(2), None, Some(7)],
        "COMMENTS" => [Some("first"), None, None, Some("note"), None],
        "FIRE_NUM" => [Some("0001"), Some("0002"), Some("0003"), Some("0004"), Some("0005")],
    }
    .unwrap()
}

/// Cleaned frame built from `(year, acres, alarm, containment)` rows
pub fn cleaned_frame(rows: &[(i64, f64, Option<&str>, Option<&str>)]) -> DataFrame {
    let years = rows.iter().map(|r| r.0).collect::<Vec<_>>();
    let acres = rows.iter().map(|r| r.1).collect::<Vec<_>>();
    let alarms = rows.iter().map(|r| r.2).collect::<Vec<_>>();
    let containments = rows.iter().map(|r| r.3).collect::<Vec<_>>();

    let raw = df! {
        "YEAR_" => years,
        "GIS_ACRES" => acres,
        "ALARM_DATE" => alarms,
        "CONT_DATE" => containments,
    }
    .unwrap();

    clean_fire_data(raw, &Config::default()).unwrap().0
}
