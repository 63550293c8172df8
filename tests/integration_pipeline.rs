//! End-to-end tests: raw perimeter CSV through cleaning, validation,
//! derivation, analysis and export using only the public API.

use fire_analyst::analysis::export_summary_tables;
use fire_analyst::processor::load_data;
use fire_analyst::{Config, FireDataProcessor, FireError, full_pipeline, generate_analysis_report};

use chrono::{DateTime, Utc};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const PERIMETERS: &str = "\
YEAR_,STATE,AGENCY,UNIT_ID,FIRE_NAME,ALARM_DATE,CONT_DATE,CAUSE,C_METHOD,GIS_ACRES,COMMENTS,COMPLEX_NAME,IRWINID,FIRE_NUM,COMPLEX_ID
2018,CA,CDF,LNU,RIDGE,2018/07/01 00:00:00+00,2018/07/02 00:00:00+00,1,1,240.0,,,,0001,
2018,CA,USF,,,2018/08/01 00:00:00+00,2018/08/01 12:00:00+00,1,2,60.0,,,,0002,
2019,CA,CDF,BEU,CANYON,2019/07/10 00:00:00+00,2019/07/11 00:00:00+00,7,1,480.0,arson suspected,,,0003,
2019,CA,,SCU,,2019/09/05 00:00:00+00,2019/09/05 06:00:00+00,2,2,12.0,,,,0004,
2020,CA,CDF,LNU,RIVER,2020/06/15 12:00:00+00,2020/06/15 22:00:00+00,1,1,100.0,,,,0005,
2020,CA,CDF,,,2020/07/01 00:00:00+00,2020/06/30 00:00:00+00,14,2,50.0,bad dates,,,0006,
2021,CA,CDF,SCU,,2021/08/01 00:00:00+00,2021/08/02 00:00:00+00,,3,-5.0,,,,0007,
,CA,USF,,OAK,2020/07/02 00:00:00+00,,2,,10.0,,,,0008,
2021,CA,USF,MVU,SUMMIT,2021/10/01 00:00:00+00,2021/10/03 00:00:00+00,14,3,960.0,,,,0009,
";

fn reference_time() -> DateTime<Utc> {
    "2025-01-01T00:00:00Z".parse().unwrap()
}

fn write_perimeters(temp_dir: &TempDir) -> (PathBuf, PathBuf) {
    let input_path = temp_dir.path().join("perimeters.csv");
    fs::write(&input_path, PERIMETERS).unwrap();
    (input_path, temp_dir.path().join("cleaned").join("fires.csv"))
}

#[test]
fn test_pipeline_cleans_validates_and_derives() {
    let temp_dir = TempDir::new().unwrap();
    let (input_path, output_path) = write_perimeters(&temp_dir);

    let output = full_pipeline(Some(&input_path), Some(&output_path), &Config::default()).unwrap();

    assert_eq!(output.cleaning.initial_rows, 9);
    assert_eq!(output.cleaning.final_rows, 8);
    assert_eq!(output.validation.initial_rows, 8);
    assert_eq!(output.validation.final_rows, 6);
    assert_eq!(output.validation.rows_removed, 2);
    assert_eq!(output.validation.invalid_date_count, 1);
    assert_eq!(output.validation.invalid_acres_count, 1);
    assert_eq!(output.validation.year_range(), Some((2018, 2021)));
    assert_eq!(output.output_path, Some(output_path.clone()));

    let durations = output
        .frame
        .column("Containment_Duration")
        .unwrap()
        .as_materialized_series()
        .f64()
        .unwrap()
        .into_no_null_iter()
        .collect::<Vec<_>>();
    assert_eq!(durations, vec![24.0, 12.0, 24.0, 6.0, 10.0, 48.0]);

    let saved = load_data(&output_path).unwrap();
    assert_eq!(saved.height(), 6);
    assert!(saved.column("COMMENTS").is_err());
    assert!(saved.column("C_METHOD_DESCRIPTION").is_ok());
}

#[test]
fn test_report_over_processed_data() {
    let temp_dir = TempDir::new().unwrap();
    let (input_path, output_path) = write_perimeters(&temp_dir);

    let output = FireDataProcessor::new(input_path, Some(output_path))
        .unwrap()
        .with_reference_time(reference_time())
        .run()
        .unwrap();
    let report = generate_analysis_report(&output.frame, &Config::default()).unwrap();

    let summary = &report.summary_statistics;
    assert_eq!(summary.total_fires, 6);
    assert_eq!(summary.year_range, Some((2018, 2021)));
    assert_eq!(summary.total_acres_burned, 1_852.0);
    assert_eq!(summary.mean_containment_hours, Some(124.0 / 6.0));

    // 240/24, 480/24, 100/10 for direct attack; 60/12, 12/6 for indirect
    let methods = report.method_analysis.as_ref().unwrap();
    assert_eq!(methods.statistics.len(), 3);
    assert_eq!(
        methods.statistics[0].method,
        "Aerial Suppression (Planes & Helicopters)"
    );
    assert_eq!(methods.statistics[2].mean_effectiveness, 3.5);
    assert!(methods.anova.is_conclusive());

    let causes = report.cause_analysis.as_ref().unwrap();
    assert_eq!(causes[0].cause, "Lightning");
    assert_eq!(causes[0].percentage, 50.0);

    let decades = report.decade_comparison.as_ref().unwrap();
    assert_eq!(
        decades.statistics.iter().map(|d| d.decade).collect::<Vec<_>>(),
        vec![2010, 2020]
    );
    assert!(decades.test.is_conclusive());

    let seasonal = report.seasonal_analysis.as_ref().unwrap();
    assert_eq!(seasonal.peak_month, Some(7));
    assert_eq!(seasonal.test.test_name, "Chi-Square (Seasonal Distribution)");
}

#[test]
fn test_report_exports() {
    let temp_dir = TempDir::new().unwrap();
    let (input_path, output_path) = write_perimeters(&temp_dir);
    let output = full_pipeline(Some(&input_path), Some(&output_path), &Config::default()).unwrap();

    // Analysis of the reloaded file matches analysis of the in-memory frame
    let reloaded = load_data(&output_path).unwrap();
    let report = generate_analysis_report(&output.frame, &Config::default()).unwrap();
    let reloaded_report = generate_analysis_report(&reloaded, &Config::default()).unwrap();
    assert_eq!(
        report.summary_statistics,
        reloaded_report.summary_statistics
    );

    let json_path = temp_dir.path().join("report.json");
    report.write_json(&json_path).unwrap();
    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(json["summary_statistics"]["total_fires"], 6);
    assert_eq!(json["seasonal_analysis"]["monthly_statistics"].as_array().unwrap().len(), 12);

    let tables_dir = temp_dir.path().join("tables");
    let written = export_summary_tables(&report, &tables_dir).unwrap();
    assert_eq!(written.len(), 5);
    assert!(written.iter().all(|path| path.exists()));

    let causes = load_data(&tables_dir.join("cause_statistics.csv")).unwrap();
    assert_eq!(causes.height(), 4);
}

#[test]
fn test_configuration_file_overrides() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("fire_analyst.toml");
    fs::write(
        &config_path,
        "[statistics]\nsignificance_threshold = 0.2\n\n[validation]\nmax_containment_hours = 24.0\n",
    )
    .unwrap();

    let config = Config::from_toml_file(&config_path).unwrap();
    assert_eq!(config.statistics.significance_threshold, 0.2);
    assert_eq!(config.statistics.confidence_level, 0.95);

    let (input_path, output_path) = write_perimeters(&temp_dir);
    let output = full_pipeline(Some(&input_path), Some(&output_path), &config).unwrap();
    assert_eq!(output.validation.extreme_duration_count, 1);
    assert_eq!(output.frame.height(), 6);
}

#[test]
fn test_missing_input_is_reported() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("nope.csv");

    let err = full_pipeline(Some(&missing), None, &Config::default()).unwrap_err();
    assert!(matches!(err, FireError::InputNotFound { ref path } if *path == missing));
}
