//! CSV reading and writing for the pipeline's flat files.

use crate::error::{FireError, Result};

use polars::prelude::{CsvReadOptions, CsvWriter, DataFrame, SerReader, SerWriter};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Rows sniffed by the CSV reader before fixing column types
const INFER_SCHEMA_ROWS: usize = 10_000;

/// Load a raw perimeter CSV.
///
/// A missing file is reported as [`FireError::InputNotFound`] before the
/// reader is opened.
pub fn load_data(path: &Path) -> Result<DataFrame> {
    if !path.exists() {
        return Err(FireError::InputNotFound {
            path: path.to_path_buf(),
        });
    }

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;

    info!(
        "Loaded {} records from {}",
        df.height(),
        path.file_name().unwrap_or_default().to_string_lossy()
    );
    Ok(df)
}

/// Writes frames to CSV, creating parent directories as needed
#[derive(Debug, Clone)]
pub struct CsvFrameWriter {
    output_path: PathBuf,
}

impl CsvFrameWriter {
    pub fn new(output_path: PathBuf) -> Self {
        Self { output_path }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Write `df` with a header row and return the number of rows written
    pub fn write(&self, df: &mut DataFrame) -> Result<usize> {
        if let Some(parent) = self.output_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = File::create(&self.output_path)?;
        CsvWriter::new(file)
            .include_header(true)
            .finish(df)
            .map_err(|e| FireError::OutputFailed {
                path: self.output_path.clone(),
                reason: e.to_string(),
            })?;

        debug!(
            "Wrote {} rows x {} columns to {}",
            df.height(),
            df.width(),
            self.output_path.display()
        );
        Ok(df.height())
    }
}

/// Save the cleaned and derived frame
pub fn save_cleaned_data(df: &mut DataFrame, output_path: &Path) -> Result<()> {
    let rows = CsvFrameWriter::new(output_path.to_path_buf()).write(df)?;
    info!(
        "Saved {} cleaned records to {}",
        rows,
        output_path.file_name().unwrap_or_default().to_string_lossy()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_file() {
        let result = load_data(Path::new("/nonexistent/fires.csv"));
        assert!(matches!(result, Err(FireError::InputNotFound { .. })));
    }

    #[test]
    fn test_write_then_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("fires.csv");

        let mut df = df! {
            "YEAR_" => [2001i64, 2002],
            "GIS_ACRES" => [10.5, 20.0],
        }
        .unwrap();

        let writer = CsvFrameWriter::new(path.clone());
        assert_eq!(writer.write(&mut df).unwrap(), 2);
        assert!(path.exists());

        let loaded = load_data(&path).unwrap();
        assert_eq!(loaded.height(), 2);
        assert_eq!(loaded.width(), 2);
        assert!(loaded.column("GIS_ACRES").is_ok());
    }
}
