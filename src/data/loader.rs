// ============================================================
// Layer 4 — CSV Loader
// ============================================================
// Turns delimited text into a Dataset using polars.
//
// Two entry points:
//   - parse(bytes)     → the body of an /upload request
//   - load_file(path)  → the `train --data` CLI command
//
// Both go through the same polars reader so an upload and an
// offline training run accept exactly the same files.
//
// Every column is read as text (`infer_schema_length` of 0), so
// a value that changes type deep into the file never fails the
// upload. Dataset casts the feature and label columns to f64 when
// training asks for them. Ragged rows, unterminated quotes and
// empty input are parse failures. A header-only file parses
// fine and yields a Dataset with zero rows.
//
// Reference: polars CsvReadOptions documentation

use anyhow::{bail, Context, Result};
use polars::prelude::*;
use std::{fs, io::Cursor, path::Path};

use crate::data::dataset::Dataset;

/// Rows polars inspects before typing a column; 0 keeps every column a string
const INFER_SCHEMA_LENGTH: usize = 0;

pub struct CsvLoader;

impl CsvLoader {
    pub fn new() -> Self {
        Self
    }

    /// Parse an in-memory CSV document into a Dataset.
    pub fn parse(&self, bytes: &[u8]) -> Result<Dataset> {
        if bytes.iter().all(|b| b.is_ascii_whitespace()) {
            bail!("No columns to parse from file");
        }

        let frame = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(INFER_SCHEMA_LENGTH))
            .into_reader_with_file_handle(Cursor::new(bytes.to_vec()))
            .finish()
            .context("could not parse CSV")?;

        tracing::debug!(
            "Parsed CSV: {} rows x {} columns",
            frame.height(),
            frame.width()
        );

        Dataset::from_frame(frame)
    }

    /// Read a CSV file from disk and parse it.
    pub fn load_file(&self, path: &Path) -> Result<Dataset> {
        let bytes = fs::read(path)
            .with_context(|| format!("Cannot read '{}'", path.display()))?;

        let dataset = self
            .parse(&bytes)
            .with_context(|| format!("Invalid dataset '{}'", path.display()))?;

        tracing::info!(
            "Loaded {} rows from '{}'",
            dataset.row_count(),
            path.display()
        );
        Ok(dataset)
    }
}

impl Default for CsvLoader {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HEADER: &str = "Machine_ID,Temperature,Run_Time,Downtime_Flag";

    #[test]
    fn test_columns_echo_header() {
        let csv = format!("{HEADER}\nM1,70,100,0\nM2,90,150,1\n");
        let ds  = CsvLoader::new().parse(csv.as_bytes()).unwrap();
        assert_eq!(
            ds.columns(),
            vec!["Machine_ID", "Temperature", "Run_Time", "Downtime_Flag"]
        );
        assert_eq!(ds.row_count(), 2);
    }

    #[test]
    fn test_each_missing_required_column_is_rejected() {
        for dropped in 0..4 {
            let header: Vec<&str> = HEADER
                .split(',')
                .enumerate()
                .filter(|(i, _)| *i != dropped)
                .map(|(_, c)| c)
                .collect();
            let csv = format!("{}\n1,2,3\n", header.join(","));

            let err = CsvLoader::new().parse(csv.as_bytes()).err().unwrap();
            assert!(
                err.to_string().contains("Dataset must include"),
                "dropping column {dropped}: {err}"
            );
        }
    }

    #[test]
    fn test_empty_input_is_rejected() {
        assert!(CsvLoader::new().parse(b"").is_err());
        assert!(CsvLoader::new().parse(b"  \n").is_err());
    }

    #[test]
    fn test_type_change_after_many_rows_is_accepted() {
        let mut csv = format!("{HEADER}\n");
        for i in 0..1500 {
            csv.push_str(&format!("{i},70,100,0\n"));
        }
        csv.push_str("A12,70.5,100,1\n");

        let ds = CsvLoader::new().parse(csv.as_bytes()).unwrap();
        assert_eq!(ds.row_count(), 1501);
        assert_eq!(
            ds.columns(),
            vec!["Machine_ID", "Temperature", "Run_Time", "Downtime_Flag"]
        );

        let rows = ds.labelled_readings().unwrap();
        assert_eq!(rows[0].reading.temperature, 70.0);
        assert_eq!(rows[1500].reading.temperature, 70.5);
        assert_eq!(rows[1500].label.class_index(), 1);
    }

    #[test]
    fn test_header_only_file_has_zero_rows() {
        let ds = CsvLoader::new().parse(format!("{HEADER}\n").as_bytes()).unwrap();
        assert_eq!(ds.row_count(), 0);
    }

    #[test]
    fn test_load_file_reads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{HEADER}").unwrap();
        writeln!(file, "M1,70,100,0").unwrap();

        let ds = CsvLoader::new().load_file(file.path()).unwrap();
        assert_eq!(ds.row_count(), 1);
    }

    #[test]
    fn test_load_file_missing_path_fails() {
        let result = CsvLoader::new().load_file(Path::new("/nonexistent/data.csv"));
        assert!(result.is_err());
    }
}
