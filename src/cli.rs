//! Command-line interface for the wildfire analyst.

use crate::analysis::{AnalysisReport, StatisticalTest, export_summary_tables, generate_analysis_report};
use crate::config::Config;
use crate::models::{CleaningSummary, ValidationReport};
use crate::processor::{FireDataProcessor, PipelineOutput};

use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(name = "fire-analyst")]
#[command(about = "Clean, validate and statistically analyze wildfire perimeter data")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// Raw perimeter CSV (defaults to the configured raw data path)
    #[arg(value_name = "INPUT_CSV")]
    pub input: Option<PathBuf>,

    /// Destination for the cleaned and derived CSV
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Write the full analysis report as JSON
    #[arg(long, value_name = "FILE")]
    pub report_json: Option<PathBuf>,

    /// Export summary tables as CSV (defaults to <output_dir>/tables)
    #[arg(long, value_name = "DIR", num_args = 0..=1)]
    pub tables_dir: Option<Option<PathBuf>>,

    /// Confidence level for method confidence intervals
    #[arg(long)]
    pub confidence_level: Option<f64>,

    /// p-value below which a test is reported as significant
    #[arg(long)]
    pub significance_threshold: Option<f64>,

    /// k in the [Q1 - k*IQR, Q3 + k*IQR] acres outlier fence
    #[arg(long)]
    pub iqr_multiplier: Option<f64>,

    /// Durations above this many hours are reported as extreme
    #[arg(long)]
    pub max_containment_hours: Option<f64>,

    /// Skip the statistical analysis and only clean the data
    #[arg(long)]
    pub skip_analysis: bool,

    /// Increase logging verbosity (-v: debug, -vv: trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Args {
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "warn"
        } else {
            match self.verbose {
                0 => "info",
                1 => "debug",
                _ => "trace",
            }
        }
    }

    /// Load the configuration file, if any, and apply flag overrides
    pub fn load_config(&self) -> crate::error::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_toml_file(path)?,
            None => Config::default(),
        };

        if let Some(level) = self.confidence_level {
            config = config.with_confidence_level(level);
        }
        if let Some(threshold) = self.significance_threshold {
            config = config.with_significance_threshold(threshold);
        }
        if let Some(multiplier) = self.iqr_multiplier {
            config = config.with_outlier_iqr_multiplier(multiplier);
        }
        if let Some(hours) = self.max_containment_hours {
            config = config.with_max_containment_hours(hours);
        }
        if let Some(input) = &self.input {
            config = config.with_raw_data_path(input.clone());
        }
        if let Some(output) = &self.output {
            config = config.with_cleaned_data_path(output.clone());
        }

        config.validate()?;
        Ok(config)
    }

    /// Tables directory, if table export was requested
    pub fn tables_dir(&self, config: &Config) -> Option<PathBuf> {
        self.tables_dir
            .as_ref()
            .map(|dir| dir.clone().unwrap_or_else(|| config.paths.tables_dir()))
    }
}

/// Install the tracing subscriber on stderr
pub fn setup_logging(args: &Args) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("fire_analyst={}", log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();

    debug!("Logging initialized at level: {}", log_level);
}

/// Run the pipeline and analysis for parsed arguments
pub fn run(args: Args) -> Result<()> {
    let start_time = Instant::now();
    let config = args.load_config().context("Invalid configuration")?;

    let input_path = config.paths.raw_data_path.clone();
    println!("{}", "Wildfire data processing".bright_green().bold());
    println!("  {} {}", "Input:".bright_cyan(), input_path.display());
    println!(
        "  {} {}",
        "Output:".bright_cyan(),
        config.paths.cleaned_data_path.display()
    );

    let processor = FireDataProcessor::new(input_path.clone(), None)
        .with_context(|| format!("Cannot process {}", input_path.display()))?
        .with_config(config.clone());

    let pb = spinner("Cleaning, validating and deriving columns...")?;
    let output = processor.process().context("Processing pipeline failed")?;
    pb.finish_with_message(format!(
        "Saved {} records to {}",
        output.frame.height(),
        processor.output_path().display()
    ));

    print_processing_summary(&output);

    if !args.skip_analysis {
        let pb = spinner("Running statistical analysis...")?;
        let report =
            generate_analysis_report(&output.frame, &config).context("Statistical analysis failed")?;
        pb.finish_with_message("Analysis complete");

        print_analysis_summary(&report);
        write_report_outputs(&args, &config, &report)?;
    }

    println!(
        "\n{} {}",
        "Time elapsed:".bright_cyan(),
        HumanDuration(start_time.elapsed()).to_string().bright_white()
    );
    info!("Finished in {} ms", start_time.elapsed().as_millis());
    Ok(())
}

fn spinner(message: &'static str) -> Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .context("Invalid progress template")?,
    );
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    Ok(pb)
}

fn write_report_outputs(args: &Args, config: &Config, report: &AnalysisReport) -> Result<()> {
    if let Some(json_path) = &args.report_json {
        report
            .write_json(json_path)
            .with_context(|| format!("Failed to write report to {}", json_path.display()))?;
        println!("  {} {}", "Report:".bright_cyan(), json_path.display());
    }

    if let Some(tables_dir) = args.tables_dir(config) {
        let written = export_summary_tables(report, &tables_dir)
            .with_context(|| format!("Failed to export tables to {}", tables_dir.display()))?;
        println!(
            "  {} {} in {}",
            "Tables:".bright_cyan(),
            written.len().to_string().bright_white(),
            tables_dir.display()
        );
    }

    Ok(())
}

fn print_processing_summary(output: &PipelineOutput) {
    print_cleaning_summary(&output.cleaning);
    print_validation_summary(&output.validation);
}

fn print_cleaning_summary(cleaning: &CleaningSummary) {
    println!("\n{}", "Cleaning Summary".bright_green().bold());
    println!(
        "  {} {} -> {} ({:.1}% retained)",
        "Rows:".bright_cyan(),
        cleaning.initial_rows,
        cleaning.final_rows.to_string().bright_white().bold(),
        cleaning.retention_rate()
    );
    if !cleaning.columns_dropped.is_empty() {
        println!(
            "  {} {}",
            "Dropped columns:".bright_cyan(),
            cleaning.columns_dropped.join(", ")
        );
    }
}

fn print_validation_summary(report: &ValidationReport) {
    println!("\n{}", "Validation Summary".bright_green().bold());
    println!(
        "  {} {} -> {} ({} removed)",
        "Rows:".bright_cyan(),
        report.initial_rows,
        report.final_rows.to_string().bright_white().bold(),
        report.rows_removed
    );
    if let Some((min_year, max_year)) = report.year_range() {
        println!("  {} {}-{}", "Years:".bright_cyan(), min_year, max_year);
    }
    if let (Some(min), Some(median), Some(max)) =
        (report.acres_min, report.acres_median, report.acres_max)
    {
        println!(
            "  {} min {:.2}, median {:.2}, max {:.2}",
            "Acres:".bright_cyan(),
            min,
            median,
            max
        );
    }
    println!(
        "  {} {}",
        "Acres outliers:".bright_cyan(),
        report.outlier_count
    );

    if report.has_issues() {
        for issue in &report.issues {
            println!("  {} {}", "!".bright_yellow().bold(), issue.bright_yellow());
        }
    } else {
        println!("  {}", "No data quality issues".bright_green());
    }
}

fn print_analysis_summary(report: &AnalysisReport) {
    let summary = &report.summary_statistics;
    println!("\n{}", "Analysis Summary".bright_green().bold());
    println!(
        "  {} {}",
        "Total fires:".bright_cyan(),
        summary.total_fires.to_string().bright_white().bold()
    );
    println!(
        "  {} {:.0} (mean {:.1}, median {:.1})",
        "Acres burned:".bright_cyan(),
        summary.total_acres_burned,
        summary.mean_fire_size,
        summary.median_fire_size
    );
    if let Some(hours) = summary.mean_containment_hours {
        println!("  {} {:.1}", "Mean containment hours:".bright_cyan(), hours);
    }

    if let Some(methods) = &report.method_analysis {
        if let Some(best) = methods.statistics.first() {
            println!(
                "  {} {} ({:.2} acres/hour)",
                "Highest effectiveness:".bright_cyan(),
                best.method,
                best.mean_effectiveness
            );
        }
        print_test(&methods.anova);
    }

    print_test(&report.temporal_analysis.trend_test);
    if let Some(seasonal) = &report.seasonal_analysis {
        let peak = seasonal
            .peak_month
            .and_then(|peak| seasonal.monthly_statistics.iter().find(|m| m.month == peak));
        if let Some(peak) = peak {
            println!("  {} {}", "Peak month:".bright_cyan(), peak.month_name);
        }
        print_test(&seasonal.test);
    }
    if let Some(causes) = &report.cause_analysis {
        if let Some(top) = causes.first() {
            println!(
                "  {} {} ({:.1}%)",
                "Leading cause:".bright_cyan(),
                top.cause,
                top.percentage
            );
        }
    }
    if let Some(decades) = &report.decade_comparison {
        print_test(&decades.test);
    }

    println!("  {} {}", "Note:".bright_black(), report.effectiveness_caveat.bright_black());
}

fn print_test(test: &StatisticalTest) {
    let marker = if test.significant {
        "*".bright_green().bold()
    } else {
        "-".normal()
    };
    println!(
        "  {} {}: {}",
        marker,
        test.test_name.bright_cyan(),
        test.interpretation
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::TempDir;

    const PERIMETERS: &str = "\
YEAR_,STATE,AGENCY,UNIT_ID,FIRE_NAME,ALARM_DATE,CONT_DATE,CAUSE,C_METHOD,GIS_ACRES
2018,CA,CDF,LNU,RIDGE,2018/07/01 00:00:00+00,2018/07/02 00:00:00+00,1,1,240.0
2018,CA,USF,,,2018/08/01 00:00:00+00,2018/08/01 12:00:00+00,1,2,60.0
2019,CA,CDF,BEU,CANYON,2019/07/10 00:00:00+00,2019/07/11 00:00:00+00,7,1,480.0
2019,CA,,SCU,,2019/09/05 00:00:00+00,2019/09/05 06:00:00+00,2,2,12.0
2020,CA,CDF,LNU,RIVER,2020/06/15 12:00:00+00,2020/06/15 22:00:00+00,1,1,100.0
2021,CA,USF,MVU,SUMMIT,2021/10/01 00:00:00+00,2021/10/03 00:00:00+00,14,3,960.0
";

    fn write_input(temp_dir: &TempDir) -> PathBuf {
        let input_path = temp_dir.path().join("perimeters.csv");
        std::fs::write(&input_path, PERIMETERS).unwrap();
        input_path
    }

    fn arg(path: &Path) -> &str {
        path.to_str().unwrap()
    }

    #[test]
    fn test_flag_overrides_apply_to_config() {
        let args = Args::try_parse_from([
            "fire-analyst",
            "fires.csv",
            "--output",
            "out/clean.csv",
            "--significance-threshold",
            "0.01",
            "--iqr-multiplier",
            "1.5",
        ])
        .unwrap();

        let config = args.load_config().unwrap();
        assert_eq!(config.paths.raw_data_path, PathBuf::from("fires.csv"));
        assert_eq!(config.paths.cleaned_data_path, PathBuf::from("out/clean.csv"));
        assert_eq!(config.statistics.significance_threshold, 0.01);
        assert_eq!(config.validation.outlier_iqr_multiplier, 1.5);
        assert_eq!(config.statistics.confidence_level, 0.95);
    }

    #[test]
    fn test_invalid_override_is_rejected() {
        let args =
            Args::try_parse_from(["fire-analyst", "--confidence-level", "1.5"]).unwrap();
        assert!(args.load_config().is_err());
    }

    #[test]
    fn test_tables_dir_defaults_to_output_dir() {
        let config = Config::default();

        let args = Args::try_parse_from(["fire-analyst", "--tables-dir"]).unwrap();
        assert_eq!(args.tables_dir(&config), Some(config.paths.tables_dir()));

        let args = Args::try_parse_from(["fire-analyst", "--tables-dir", "tbl"]).unwrap();
        assert_eq!(args.tables_dir(&config), Some(PathBuf::from("tbl")));

        let args = Args::try_parse_from(["fire-analyst"]).unwrap();
        assert_eq!(args.tables_dir(&config), None);
    }

    #[test]
    fn test_log_levels() {
        let args = Args::try_parse_from(["fire-analyst", "-vv"]).unwrap();
        assert_eq!(args.get_log_level(), "trace");

        let args = Args::try_parse_from(["fire-analyst", "--quiet"]).unwrap();
        assert_eq!(args.get_log_level(), "warn");
    }

    #[test]
    fn test_run_writes_cleaned_data_report_and_tables() {
        let temp_dir = TempDir::new().unwrap();
        let input_path = write_input(&temp_dir);
        let output_path = temp_dir.path().join("out").join("cleaned.csv");
        let json_path = temp_dir.path().join("out").join("analysis.json");
        let tables_dir = temp_dir.path().join("tables");

        let args = Args::parse_from([
            "fire-analyst",
            arg(&input_path),
            "--output",
            arg(&output_path),
            "--report-json",
            arg(&json_path),
            "--tables-dir",
            arg(&tables_dir),
            "--quiet",
        ]);
        run(args).unwrap();

        assert!(output_path.exists());
        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(json["summary_statistics"]["total_fires"], 6);

        for table in [
            "method_statistics.csv",
            "yearly_statistics.csv",
            "monthly_statistics.csv",
            "cause_statistics.csv",
            "decade_statistics.csv",
        ] {
            assert!(tables_dir.join(table).exists(), "missing {table}");
        }
    }

    #[test]
    fn test_run_skip_analysis_writes_no_report() {
        let temp_dir = TempDir::new().unwrap();
        let input_path = write_input(&temp_dir);
        let output_path = temp_dir.path().join("cleaned.csv");
        let json_path = temp_dir.path().join("analysis.json");
        let tables_dir = temp_dir.path().join("tables");

        let args = Args::parse_from([
            "fire-analyst",
            arg(&input_path),
            "--output",
            arg(&output_path),
            "--report-json",
            arg(&json_path),
            "--tables-dir",
            arg(&tables_dir),
            "--skip-analysis",
        ]);
        run(args).unwrap();

        assert!(output_path.exists());
        assert!(!json_path.exists());
        assert!(!tables_dir.exists());
    }

    #[test]
    fn test_run_reports_missing_input() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope.csv");
        let output_path = temp_dir.path().join("cleaned.csv");

        let args = Args::parse_from(["fire-analyst", arg(&missing), "--output", arg(&output_path)]);
        let err = run(args).unwrap_err();

        assert!(format!("{err:#}").contains("nope.csv"));
        assert!(!output_path.exists());
    }
}
