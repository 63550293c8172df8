//! Processing pipeline for wildfire perimeter data.
//!
//! Runs load → clean → validate → derive → save over a single CSV file.
//! Each stage is a free function taking an owned frame, so callers can also
//! run them individually.

pub mod cleaning;
pub mod derivation;
pub mod frame;
pub mod timestamp;
pub mod validation;
pub mod writer;

#[cfg(test)]
pub mod tests;

pub use self::cleaning::clean_fire_data;
pub use self::derivation::add_derived_columns;
pub use self::validation::{validate_fire_data, validate_fire_data_at};
pub use self::writer::{CsvFrameWriter, load_data, save_cleaned_data};

use crate::config::Config;
use crate::error::{FireError, Result};
use crate::models::{CleaningSummary, ValidationReport};

use chrono::{DateTime, Utc};
use polars::prelude::DataFrame;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

/// Everything produced by one pipeline run
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Cleaned, validated and derived records
    pub frame: DataFrame,
    pub cleaning: CleaningSummary,
    pub validation: ValidationReport,
    /// Where the frame was saved, if it was
    pub output_path: Option<PathBuf>,
    pub processing_time_ms: u128,
}

/// Main processor for a wildfire perimeter CSV
#[derive(Debug, Clone)]
pub struct FireDataProcessor {
    input_path: PathBuf,
    output_path: Option<PathBuf>,
    config: Config,
    reference_time: Option<DateTime<Utc>>,
}

impl FireDataProcessor {
    /// Create a processor for `input_path`.
    ///
    /// Without an explicit `output_path` the cleaned data goes to the
    /// configured cleaned-data location.
    pub fn new(input_path: PathBuf, output_path: Option<PathBuf>) -> Result<Self> {
        if !input_path.exists() {
            return Err(FireError::InputNotFound { path: input_path });
        }

        Ok(Self {
            input_path,
            output_path,
            config: Config::default(),
            reference_time: None,
        })
    }

    /// Configure the processor
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Fix the "now" used by the future-date validation rule
    pub fn with_reference_time(mut self, now: DateTime<Utc>) -> Self {
        self.reference_time = Some(now);
        self
    }

    pub fn input_path(&self) -> &Path {
        &self.input_path
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Destination of the cleaned data
    pub fn output_path(&self) -> &Path {
        self.output_path
            .as_deref()
            .unwrap_or(self.config.paths.cleaned_data_path.as_path())
    }

    /// Load, clean, validate and derive without writing anything
    pub fn run(&self) -> Result<PipelineOutput> {
        let start_time = Instant::now();
        info!("Starting fire data processing pipeline");
        debug!("Input: {}", self.input_path.display());

        let raw = load_data(&self.input_path)?;
        let (cleaned, cleaning) = clean_fire_data(raw, &self.config)?;

        let now = self.reference_time.unwrap_or_else(Utc::now);
        let (validated, validation) = validate_fire_data_at(cleaned, &self.config, now)?;

        let frame = add_derived_columns(validated, &self.config)?;

        Ok(PipelineOutput {
            frame,
            cleaning,
            validation,
            output_path: None,
            processing_time_ms: start_time.elapsed().as_millis(),
        })
    }

    /// Run the full pipeline and save the cleaned data
    pub fn process(&self) -> Result<PipelineOutput> {
        let start_time = Instant::now();
        let mut output = self.run()?;

        let output_path = self.output_path().to_path_buf();
        save_cleaned_data(&mut output.frame, &output_path)?;

        info!(
            "Pipeline complete: final dataset has {} records",
            output.frame.height()
        );

        Ok(PipelineOutput {
            output_path: Some(output_path),
            processing_time_ms: start_time.elapsed().as_millis(),
            ..output
        })
    }
}

/// Run the whole pipeline with optional path overrides.
///
/// Missing paths fall back to the configured raw and cleaned data locations.
pub fn full_pipeline(
    input_path: Option<&Path>,
    output_path: Option<&Path>,
    config: &Config,
) -> Result<PipelineOutput> {
    let input_path = input_path.unwrap_or(config.paths.raw_data_path.as_path());
    FireDataProcessor::new(input_path.to_path_buf(), output_path.map(Path::to_path_buf))?
        .with_config(config.clone())
        .process()
}
