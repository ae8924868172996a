// ============================================================
// Layer 4 — Dataset
// ============================================================
// The table held between /upload and /train.
//
// A Dataset can only be built from a frame that carries all
// four required columns, so everything downstream may assume
// they exist. Value checks (numeric features, 0/1 labels) are
// deferred to `labelled_readings`, which runs at training time.

use anyhow::{bail, Context, Result};
use polars::prelude::*;

use crate::domain::reading::{DowntimeLabel, LabelledReading, MachineReading};
use crate::domain::{LABEL_COLUMN, REQUIRED_COLUMNS, RUN_TIME_COLUMN, TEMPERATURE_COLUMN};

pub struct Dataset {
    frame: DataFrame,
}

impl Dataset {
    /// Wrap a parsed frame, rejecting it if any required column is missing.
    pub fn from_frame(frame: DataFrame) -> Result<Self> {
        let columns = column_names(&frame);
        let missing: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|required| !columns.iter().any(|c| c == required))
            .collect();

        if !missing.is_empty() {
            tracing::debug!("Upload is missing columns: {:?}", missing);
            bail!(
                "Dataset must include 'Machine_ID', 'Temperature', 'Run_Time', \
                 and 'Downtime_Flag' columns."
            );
        }

        Ok(Self { frame })
    }

    /// Column names in header order
    pub fn columns(&self) -> Vec<String> {
        column_names(&self.frame)
    }

    pub fn row_count(&self) -> usize {
        self.frame.height()
    }

    /// Convert every row into a (reading, label) pair.
    ///
    /// Fails on the first row whose features are missing or
    /// non-numeric, or whose label is anything other than 0 or 1.
    /// Row numbers in errors are 1-based data rows (header excluded).
    pub fn labelled_readings(&self) -> Result<Vec<LabelledReading>> {
        let temperature = self.numeric_column(TEMPERATURE_COLUMN)?;
        let run_time    = self.numeric_column(RUN_TIME_COLUMN)?;
        let flags       = self.numeric_column(LABEL_COLUMN)?;

        temperature
            .into_iter()
            .zip(run_time)
            .zip(flags)
            .enumerate()
            .map(|(idx, ((t, r), f))| -> Result<LabelledReading> {
                let row = idx + 1;
                let temperature = t.with_context(|| {
                    format!("row {row}: '{TEMPERATURE_COLUMN}' is missing or not numeric")
                })?;
                let run_time = r.with_context(|| {
                    format!("row {row}: '{RUN_TIME_COLUMN}' is missing or not numeric")
                })?;
                let label = match f {
                    Some(v) if v == 0.0 => DowntimeLabel::No,
                    Some(v) if v == 1.0 => DowntimeLabel::Yes,
                    _ => bail!("row {row}: '{LABEL_COLUMN}' must be 0 or 1"),
                };
                Ok(LabelledReading {
                    reading: MachineReading::new(temperature, run_time),
                    label,
                })
            })
            .collect()
    }

    /// Read a column as f64. Values that cannot be cast (text,
    /// empty cells) come back as None.
    fn numeric_column(&self, name: &str) -> Result<Vec<Option<f64>>> {
        let series = self
            .frame
            .column(name)
            .with_context(|| format!("column '{name}' not found"))?
            .as_materialized_series()
            .cast(&DataType::Float64)
            .with_context(|| format!("column '{name}' cannot be read as numbers"))?;

        Ok(series.f64()?.into_iter().collect())
    }
}

fn column_names(frame: &DataFrame) -> Vec<String> {
    frame
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect()
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::CsvLoader;

    fn parse(csv: &str) -> Result<Dataset> {
        CsvLoader::new().parse(csv.as_bytes())
    }

    #[test]
    fn test_labelled_readings_in_row_order() {
        let ds = parse(
            "Machine_ID,Temperature,Run_Time,Downtime_Flag\n\
             M1,70.5,100,0\n\
             M2,91,140.25,1\n",
        )
        .unwrap();

        let rows = ds.labelled_readings().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].reading, MachineReading::new(70.5, 100.0));
        assert_eq!(rows[0].label, DowntimeLabel::No);
        assert_eq!(rows[1].reading, MachineReading::new(91.0, 140.25));
        assert_eq!(rows[1].label, DowntimeLabel::Yes);
    }

    #[test]
    fn test_non_numeric_feature_is_reported_with_row() {
        let ds = parse(
            "Machine_ID,Temperature,Run_Time,Downtime_Flag\n\
             M1,70,100,0\n\
             M2,hot,140,1\n",
        )
        .unwrap();

        let err = ds.labelled_readings().unwrap_err().to_string();
        assert!(err.contains("row 2"), "{err}");
        assert!(err.contains("Temperature"), "{err}");
    }

    #[test]
    fn test_label_outside_zero_one_is_rejected() {
        let ds = parse(
            "Machine_ID,Temperature,Run_Time,Downtime_Flag\n\
             M1,70,100,2\n",
        )
        .unwrap();

        let err = ds.labelled_readings().unwrap_err().to_string();
        assert!(err.contains("Downtime_Flag"), "{err}");
    }

    #[test]
    fn test_extra_columns_are_kept_in_order() {
        let ds = parse(
            "Shift,Machine_ID,Temperature,Run_Time,Downtime_Flag\n\
             A,M1,70,100,0\n",
        )
        .unwrap();

        assert_eq!(
            ds.columns(),
            vec!["Shift", "Machine_ID", "Temperature", "Run_Time", "Downtime_Flag"]
        );
        assert_eq!(ds.row_count(), 1);
    }
}
