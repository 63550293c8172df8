//! Wildfire Analyst Library
//!
//! Cleaning, validation and statistical analysis of historical wildfire
//! perimeter records exported as CSV.
//!
//! This library provides tools for:
//! - Cleaning raw perimeter exports (type coercion, placeholder filling,
//!   dropping low-value columns)
//! - Validating records against data-quality rules and reporting issues
//! - Deriving containment duration, month, decade and code descriptions
//! - Comparing containment methods, trends, seasons, causes and decades
//!   with classical hypothesis tests
//! - Exporting the cleaned data, a JSON report and summary tables

pub mod analysis;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod mapping;
pub mod models;
pub mod processor;
pub mod stats;

// Re-export commonly used types
pub use analysis::{AnalysisReport, StatisticalTest, generate_analysis_report};
pub use config::Config;
pub use error::{FireError, Result};
pub use models::{CleaningSummary, ValidationReport};
pub use processor::{FireDataProcessor, PipelineOutput, full_pipeline};
