// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates one training run over a held Dataset:
//
//   Step 1: Extract labelled readings     (Layer 4 - data)
//   Step 2: Seeded 80/20 train/test split (Layer 4 - data)
//   Step 3: Fit forest, score test split  (Layer 5 - ml)
//   Step 4: Save the model artifact       (Layer 6 - infra)
//   Step 5: Append to the training log    (Layer 6 - infra, optional)
//
// Steps 1–2 fail as bad input (the data is unusable). Steps
// 3–4 fail as internal errors. A failed log write is only a
// warning; the run itself has already succeeded by then.
//
// The use case is synchronous and CPU-bound. The HTTP path
// runs it on a blocking thread; the CLI calls it directly.

use std::path::PathBuf;

use crate::application::error::ServiceError;
use crate::data::{dataset::Dataset, splitter::split_train_test};
use crate::infra::{
    checkpoint::ModelStore,
    metrics::{EvalMetrics, TrainingLogger, TrainingRun},
};
use crate::ml::forest::{ForestConfig, RandomForest};
use crate::ml::trainer::run_training;

// ─── Training Configuration ──────────────────────────────────────────────────
#[derive(Debug, Clone, PartialEq)]
pub struct TrainConfig {
    /// Share of rows held out for evaluation
    pub test_fraction: f64,

    /// Seed for both the split and the bootstrap sampler
    pub seed: u64,

    pub n_trees: usize,

    pub max_depth: Option<usize>,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            test_fraction: 0.2,
            seed:          42,
            n_trees:       100,
            max_depth:     None,
        }
    }
}

impl TrainConfig {
    fn forest_config(&self) -> ForestConfig {
        ForestConfig {
            n_trees:   self.n_trees,
            max_depth: self.max_depth,
            seed:      self.seed,
        }
    }
}

/// What a training run reports back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainReport {
    pub metrics:    EvalMetrics,
    pub train_rows: usize,
    pub test_rows:  usize,
}

pub struct TrainOutcome {
    pub forest: RandomForest,
    pub report: TrainReport,
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
pub struct TrainUseCase {
    config:      TrainConfig,
    store:       ModelStore,
    metrics_log: Option<PathBuf>,
}

impl TrainUseCase {
    pub fn new(config: TrainConfig, store: ModelStore, metrics_log: Option<PathBuf>) -> Self {
        Self { config, store, metrics_log }
    }

    pub fn execute(&self, dataset: &Dataset) -> Result<TrainOutcome, ServiceError> {
        let cfg = &self.config;

        // ── Step 1: Labelled rows ─────────────────────────────────────────────
        let rows = dataset
            .labelled_readings()
            .map_err(ServiceError::invalid_dataset)?;

        // ── Step 2: Reproducible split ────────────────────────────────────────
        let (train, test) = split_train_test(rows, cfg.test_fraction, cfg.seed)
            .map_err(ServiceError::invalid_dataset)?;
        tracing::info!("Split: {} train, {} test", train.len(), test.len());

        // ── Step 3: Fit and evaluate ──────────────────────────────────────────
        let outcome = run_training(&train, &test, &cfg.forest_config())
            .map_err(ServiceError::Internal)?;

        // ── Step 4: Persist ───────────────────────────────────────────────────
        self.store
            .save(&outcome.forest)
            .map_err(ServiceError::Internal)?;

        let report = TrainReport {
            metrics:    outcome.metrics,
            train_rows: train.len(),
            test_rows:  test.len(),
        };

        // ── Step 5: History ───────────────────────────────────────────────────
        if let Some(path) = &self.metrics_log {
            let run = TrainingRun {
                train_rows: report.train_rows,
                test_rows:  report.test_rows,
                metrics:    report.metrics,
            };
            if let Err(e) = TrainingLogger::new(path).and_then(|log| log.log(&run)) {
                tracing::warn!("Could not append to training log '{}': {e:#}", path.display());
            }
        }

        Ok(TrainOutcome { forest: outcome.forest, report })
    }
}
