// ============================================================
// Layer 5 — Training Run
// ============================================================
// Fit on the training rows, score on the test rows.
//
// The data layer hands over plain LabelledReadings; this is
// where they become ndarray matrices:
//   records: [n_rows, 2]  (Temperature, Run_Time)
//   targets: [n_rows]     (0 = no downtime, 1 = downtime)

use anyhow::Result;
use ndarray::{Array1, Array2};

use crate::domain::reading::LabelledReading;
use crate::infra::metrics::EvalMetrics;
use crate::ml::forest::{ForestConfig, RandomForest};

/// A fitted forest together with its test-set scores.
pub struct TrainingOutcome {
    pub forest:  RandomForest,
    pub metrics: EvalMetrics,
}

pub fn run_training(
    train: &[LabelledReading],
    test:  &[LabelledReading],
    cfg:   &ForestConfig,
) -> Result<TrainingOutcome> {
    let (train_x, train_y) = to_arrays(train);
    let (test_x,  test_y)  = to_arrays(test);

    tracing::info!(
        "Fitting forest: {} trees, {} training rows",
        cfg.n_trees,
        train.len()
    );
    let forest = RandomForest::fit(&train_x, &train_y, cfg)?;

    let predicted = forest.predict_batch(&test_x);
    let metrics   = EvalMetrics::from_predictions(&test_y.to_vec(), &predicted.to_vec());

    tracing::info!(
        "Evaluated on {} test rows: accuracy={:.4}, f1_score={:.4}",
        test.len(),
        metrics.accuracy,
        metrics.f1_score,
    );

    Ok(TrainingOutcome { forest, metrics })
}

fn to_arrays(rows: &[LabelledReading]) -> (Array2<f64>, Array1<usize>) {
    let mut records = Array2::<f64>::zeros((rows.len(), 2));
    let mut targets = Array1::<usize>::zeros(rows.len());

    for (i, row) in rows.iter().enumerate() {
        let [temperature, run_time] = row.reading.features();
        records[[i, 0]] = temperature;
        records[[i, 1]] = run_time;
        targets[i]      = row.label.class_index();
    }

    (records, targets)
}
