// ============================================================
// Layer 6 — Evaluation Metrics and Training Log
// ============================================================
// Scores a fitted model on the held-out test rows and,
// optionally, records each training run to a CSV file.
//
// Metrics (positive class = 1, "downtime"):
//   accuracy = correct / total
//   f1_score = 2·TP / (2·TP + FP + FN)
//
// When there are no positive labels and no positive
// predictions the F1 denominator is zero; the score is then
// reported as 0.0 rather than NaN.
//
// Example training log:
//   timestamp,train_rows,test_rows,accuracy,f1_score
//   1760851200,80,20,0.950000,0.933333
//   1760854800,160,40,0.925000,0.910112
//
// The log is append-only so it keeps a history across restarts.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};

/// Test-set scores returned by /train.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvalMetrics {
    /// Fraction of test rows classified correctly, in [0, 1]
    pub accuracy: f64,

    /// Harmonic mean of precision and recall for class 1, in [0, 1]
    pub f1_score: f64,
}

impl EvalMetrics {
    /// Compare true class indices against predicted ones.
    /// Both slices must be the same length.
    pub fn from_predictions(truth: &[usize], predicted: &[usize]) -> Self {
        debug_assert_eq!(truth.len(), predicted.len());

        let mut correct = 0usize;
        let (mut tp, mut fp, mut fn_) = (0usize, 0usize, 0usize);

        for (&t, &p) in truth.iter().zip(predicted) {
            if t == p {
                correct += 1;
            }
            match (t == 1, p == 1) {
                (true,  true)  => tp  += 1,
                (false, true)  => fp  += 1,
                (true,  false) => fn_ += 1,
                (false, false) => {}
            }
        }

        let accuracy = if truth.is_empty() {
            0.0
        } else {
            correct as f64 / truth.len() as f64
        };

        let denom    = 2 * tp + fp + fn_;
        let f1_score = if denom == 0 { 0.0 } else { (2 * tp) as f64 / denom as f64 };

        Self { accuracy, f1_score }
    }
}

/// One completed training run, as written to the log.
#[derive(Debug, Clone, Copy)]
pub struct TrainingRun {
    pub train_rows: usize,
    pub test_rows:  usize,
    pub metrics:    EvalMetrics,
}

/// Appends training runs to a CSV file.
pub struct TrainingLogger {
    csv_path: PathBuf,
}

impl TrainingLogger {
    /// Open (or create) the log. The header is written only when
    /// the file is new.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let csv_path = path.into();

        if let Some(dir) = csv_path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .with_context(|| format!("Cannot create '{}'", dir.display()))?;
        }

        if !csv_path.exists() {
            let mut f = fs::File::create(&csv_path)
                .with_context(|| format!("Cannot create '{}'", csv_path.display()))?;
            writeln!(f, "timestamp,train_rows,test_rows,accuracy,f1_score")?;
            tracing::debug!("Created training log: '{}'", csv_path.display());
        }

        Ok(Self { csv_path })
    }

    pub fn log(&self, run: &TrainingRun) -> Result<()> {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();

        let mut f = OpenOptions::new()
            .append(true)
            .open(&self.csv_path)
            .with_context(|| format!("Cannot open '{}'", self.csv_path.display()))?;

        writeln!(
            f,
            "{},{},{},{:.6},{:.6}",
            timestamp,
            run.train_rows,
            run.test_rows,
            run.metrics.accuracy,
            run.metrics.f1_score,
        )?;

        tracing::debug!(
            "Logged training run: accuracy={:.4}, f1_score={:.4}",
            run.metrics.accuracy,
            run.metrics.f1_score,
        );
        Ok(())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfect_predictions() {
        let m = EvalMetrics::from_predictions(&[0, 1, 1, 0], &[0, 1, 1, 0]);
        assert_eq!(m.accuracy, 1.0);
        assert_eq!(m.f1_score, 1.0);
    }

    #[test]
    fn test_mixed_predictions() {
        // TP=1, FP=1, FN=1, TN=1
        let m = EvalMetrics::from_predictions(&[1, 1, 0, 0], &[1, 0, 1, 0]);
        assert_eq!(m.accuracy, 0.5);
        assert!((m.f1_score - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_no_positives_gives_zero_f1() {
        let m = EvalMetrics::from_predictions(&[0, 0, 0], &[0, 0, 0]);
        assert_eq!(m.accuracy, 1.0);
        assert_eq!(m.f1_score, 0.0);
    }

    #[test]
    fn test_log_appends_rows_under_one_header() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("training.csv");
        let run  = TrainingRun {
            train_rows: 80,
            test_rows:  20,
            metrics:    EvalMetrics { accuracy: 0.95, f1_score: 0.9 },
        };

        TrainingLogger::new(&path).unwrap().log(&run).unwrap();
        let logger = TrainingLogger::new(&path).unwrap();
        logger.log(&run).unwrap();

        let text  = fs::read_to_string(&logger.csv_path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "timestamp,train_rows,test_rows,accuracy,f1_score");
        assert!(lines[1].ends_with(",80,20,0.950000,0.900000"));
    }
}
