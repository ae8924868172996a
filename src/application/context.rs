// ============================================================
// Layer 2 — Service Context
// ============================================================
// The one object that owns mutable service state:
//
//   dataset — the last successfully uploaded table (or none)
//   model   — the forest answering /predict (or none)
//
// Handlers get it as `Arc<ServiceContext>` and never touch
// the state directly.
//
// Locking:
//   - `writer` serialises everything that writes the model or
//     touches the artifact file: training, and the cache-fill
//     that loads the artifact when no model is in memory.
//   - `dataset` and `model` are RwLocks so predictions against
//     an in-memory model only take a read lock.
//   - A training run works on an Arc snapshot of the dataset.
//     An upload arriving mid-run replaces the held table but
//     does not disturb the run.
//
// State machine:
//   NoData ──upload──▶ DataReady ──train──▶ ModelReady
//   (any) ──predict, artifact on disk──▶ ModelReady
//
// Reference: tokio::sync documentation (RwLock, Mutex)

use std::{path::PathBuf, sync::Arc};
use tokio::sync::{Mutex, RwLock};

use crate::application::error::ServiceError;
use crate::application::train_use_case::{TrainConfig, TrainReport, TrainUseCase};
use crate::data::{dataset::Dataset, loader::CsvLoader};
use crate::domain::reading::{MachineReading, Prediction};
use crate::infra::checkpoint::ModelStore;
use crate::ml::inferencer::Inferencer;

/// Default artifact location, relative to the working directory
pub const DEFAULT_ARTIFACT_PATH: &str = "trained_model.bin";

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Where the trained model is written and read back from
    pub artifact_path: PathBuf,

    /// Optional CSV receiving one row per training run
    pub metrics_log: Option<PathBuf>,

    pub train: TrainConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            artifact_path: PathBuf::from(DEFAULT_ARTIFACT_PATH),
            metrics_log:   None,
            train:         TrainConfig::default(),
        }
    }
}

pub struct ServiceContext {
    config:  ServiceConfig,
    store:   ModelStore,
    loader:  CsvLoader,
    dataset: RwLock<Option<Arc<Dataset>>>,
    model:   RwLock<Option<Arc<Inferencer>>>,
    writer:  Mutex<()>,
}

impl ServiceContext {
    pub fn new(config: ServiceConfig) -> Self {
        let store = ModelStore::new(config.artifact_path.clone());
        Self {
            config,
            store,
            loader:  CsvLoader::new(),
            dataset: RwLock::new(None),
            model:   RwLock::new(None),
            writer:  Mutex::new(()),
        }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Parse an uploaded file and, if valid, replace the held dataset.
    /// Returns the column names in header order. A failed upload
    /// leaves the previous dataset in place.
    pub async fn upload(&self, bytes: &[u8]) -> Result<Vec<String>, ServiceError> {
        let dataset = self
            .loader
            .parse(bytes)
            .map_err(ServiceError::invalid_upload)?;

        let columns = dataset.columns();
        tracing::info!(
            "Dataset uploaded: {} rows, columns {:?}",
            dataset.row_count(),
            columns
        );

        *self.dataset.write().await = Some(Arc::new(dataset));
        Ok(columns)
    }

    /// Train on the held dataset, persist the artifact and swap in
    /// the new model.
    pub async fn train(&self) -> Result<TrainReport, ServiceError> {
        let _writer = self.writer.lock().await;

        let dataset = self
            .dataset
            .read()
            .await
            .clone()
            .ok_or(ServiceError::NoData)?;

        let use_case = TrainUseCase::new(
            self.config.train.clone(),
            self.store.clone(),
            self.config.metrics_log.clone(),
        );

        let outcome = tokio::task::spawn_blocking(move || use_case.execute(&dataset))
            .await
            .map_err(|e| ServiceError::Internal(anyhow::anyhow!("training task failed: {e}")))??;

        *self.model.write().await = Some(Arc::new(Inferencer::new(outcome.forest)));
        tracing::info!(
            "Model ready: accuracy={:.4}, f1_score={:.4}",
            outcome.report.metrics.accuracy,
            outcome.report.metrics.f1_score
        );
        Ok(outcome.report)
    }

    pub async fn predict(&self, reading: MachineReading) -> Result<Prediction, ServiceError> {
        let model = self.model_or_load().await?;
        Ok(model.predict(&reading))
    }

    /// The in-memory model, filling the cache from the artifact on a miss.
    ///
    /// Fails with `ModelUnavailable` when there is no model in memory
    /// and the artifact is absent, unreadable or incompatible. A failed
    /// load is not cached; the next call tries the artifact again.
    pub async fn model_or_load(&self) -> Result<Arc<Inferencer>, ServiceError> {
        if let Some(model) = self.model.read().await.clone() {
            return Ok(model);
        }

        let _writer = self.writer.lock().await;

        // A training run or another cache-fill may have won the race
        if let Some(model) = self.model.read().await.clone() {
            return Ok(model);
        }

        let store = self.store.clone();
        let loaded = tokio::task::spawn_blocking(move || Inferencer::from_store(&store))
            .await
            .map_err(|e| ServiceError::Internal(anyhow::anyhow!("model load task failed: {e}")))?;

        match loaded {
            Ok(inferencer) => {
                let model = Arc::new(inferencer);
                *self.model.write().await = Some(model.clone());
                Ok(model)
            }
            Err(e) => {
                tracing::warn!("No model available: {e:#}");
                Err(ServiceError::ModelUnavailable)
            }
        }
    }
}
