//! Configuration management and validation.
//!
//! Provides one immutable configuration value that is passed into every
//! pipeline stage: file locations, validation thresholds, statistical
//! settings, cleaning column lists and the code description tables.
//! Configuration files are TOML; every section and field is optional and
//! falls back to the defaults below.

use crate::constants::{
    COLUMNS_TO_DROP, DEFAULT_CLEANED_DATA_PATH, DEFAULT_CONFIDENCE_LEVEL,
    DEFAULT_MAX_CONTAINMENT_HOURS, DEFAULT_MAX_YEAR, DEFAULT_MIN_YEAR, DEFAULT_OUTLIER_IQR_MULTIPLIER,
    DEFAULT_OUTPUT_DIR, DEFAULT_RAW_DATA_PATH, DEFAULT_SIGNIFICANCE_THRESHOLD, ESSENTIAL_COLUMNS,
    ROW_REQUIRED_ESSENTIAL_COUNT, TABLES_SUBDIR,
};
use crate::error::{FireError, Result};
use crate::mapping::CodeMapping;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default file locations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathConfig {
    /// Raw perimeter export
    pub raw_data_path: PathBuf,

    /// Destination of the cleaned and derived dataset
    pub cleaned_data_path: PathBuf,

    /// Root directory for report artifacts
    pub output_dir: PathBuf,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            raw_data_path: PathBuf::from(DEFAULT_RAW_DATA_PATH),
            cleaned_data_path: PathBuf::from(DEFAULT_CLEANED_DATA_PATH),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

impl PathConfig {
    /// Directory that receives the summary table CSVs
    pub fn tables_dir(&self) -> PathBuf {
        self.output_dir.join(TABLES_SUBDIR)
    }
}

/// Thresholds used by the validator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Durations above this many hours are reported as extreme
    pub max_containment_hours: f64,

    /// k in the `[Q1 - k*IQR, Q3 + k*IQR]` outlier fence
    pub outlier_iqr_multiplier: f64,

    /// Lower bound of the plausible year range (reported against, never enforced)
    pub min_year: i64,

    /// Upper bound of the plausible year range (reported against, never enforced)
    pub max_year: i64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_containment_hours: DEFAULT_MAX_CONTAINMENT_HOURS,
            outlier_iqr_multiplier: DEFAULT_OUTLIER_IQR_MULTIPLIER,
            min_year: DEFAULT_MIN_YEAR,
            max_year: DEFAULT_MAX_YEAR,
        }
    }
}

/// Statistical analysis settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsConfig {
    /// Confidence level for mean confidence intervals
    pub confidence_level: f64,

    /// p-values strictly below this are significant
    pub significance_threshold: f64,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            confidence_level: DEFAULT_CONFIDENCE_LEVEL,
            significance_threshold: DEFAULT_SIGNIFICANCE_THRESHOLD,
        }
    }
}

/// Column lists used by the cleaner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleaningConfig {
    /// Dropped when present
    pub columns_to_drop: Vec<String>,

    /// Must exist as columns in the raw input
    pub essential_columns: Vec<String>,

    /// Rows with a null in any of these are removed
    pub row_required_columns: Vec<String>,
}

impl Default for CleaningConfig {
    fn default() -> Self {
        Self {
            columns_to_drop: COLUMNS_TO_DROP.iter().map(|c| c.to_string()).collect(),
            essential_columns: ESSENTIAL_COLUMNS.iter().map(|c| c.to_string()).collect(),
            row_required_columns: ESSENTIAL_COLUMNS[..ROW_REQUIRED_ESSENTIAL_COUNT]
                .iter()
                .map(|c| c.to_string())
                .collect(),
        }
    }
}

/// Code description tables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MappingConfig {
    pub containment_methods: CodeMapping,
    pub causes: CodeMapping,
}

impl Default for MappingConfig {
    fn default() -> Self {
        Self {
            containment_methods: CodeMapping::containment_methods(),
            causes: CodeMapping::fire_causes(),
        }
    }
}

/// Global configuration for wildfire processing and analysis
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub paths: PathConfig,
    pub validation: ValidationConfig,
    pub statistics: StatsConfig,
    pub cleaning: CleaningConfig,
    pub mappings: MappingConfig,
}

impl Config {
    /// Load configuration overrides from a TOML file
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(FireError::configuration(format!(
                "config file not found: {}",
                path.display()
            )));
        }

        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parse configuration from TOML text and validate it
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that thresholds are within their meaningful ranges
    pub fn validate(&self) -> Result<()> {
        let stats = &self.statistics;
        if !(stats.confidence_level > 0.0 && stats.confidence_level < 1.0) {
            return Err(FireError::configuration(format!(
                "confidence_level must be between 0 and 1, got {}",
                stats.confidence_level
            )));
        }
        if !(stats.significance_threshold > 0.0 && stats.significance_threshold < 1.0) {
            return Err(FireError::configuration(format!(
                "significance_threshold must be between 0 and 1, got {}",
                stats.significance_threshold
            )));
        }

        let validation = &self.validation;
        if !(validation.outlier_iqr_multiplier >= 0.0) {
            return Err(FireError::configuration(format!(
                "outlier_iqr_multiplier must be non-negative, got {}",
                validation.outlier_iqr_multiplier
            )));
        }
        if !(validation.max_containment_hours > 0.0) {
            return Err(FireError::configuration(format!(
                "max_containment_hours must be positive, got {}",
                validation.max_containment_hours
            )));
        }
        if validation.min_year > validation.max_year {
            return Err(FireError::configuration(format!(
                "min_year ({}) is after max_year ({})",
                validation.min_year, validation.max_year
            )));
        }

        Ok(())
    }

    /// Set the confidence level used for intervals
    pub fn with_confidence_level(mut self, confidence_level: f64) -> Self {
        self.statistics.confidence_level = confidence_level;
        self
    }

    /// Set the significance threshold used for test flags
    pub fn with_significance_threshold(mut self, threshold: f64) -> Self {
        self.statistics.significance_threshold = threshold;
        self
    }

    /// Set the IQR multiplier for outlier detection
    pub fn with_outlier_iqr_multiplier(mut self, multiplier: f64) -> Self {
        self.validation.outlier_iqr_multiplier = multiplier;
        self
    }

    /// Set the extreme-duration ceiling in hours
    pub fn with_max_containment_hours(mut self, hours: f64) -> Self {
        self.validation.max_containment_hours = hours;
        self
    }

    /// Set the raw input path
    pub fn with_raw_data_path(mut self, path: PathBuf) -> Self {
        self.paths.raw_data_path = path;
        self
    }

    /// Set the cleaned output path
    pub fn with_cleaned_data_path(mut self, path: PathBuf) -> Self {
        self.paths.cleaned_data_path = path;
        self
    }

    /// Set the report artifact directory
    pub fn with_output_dir(mut self, path: PathBuf) -> Self {
        self.paths.output_dir = path;
        self
    }
}
