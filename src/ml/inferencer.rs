// ============================================================
// Layer 5 — Inferencer
// ============================================================
// Wraps a fitted forest and turns its vote shares into the
// /predict response.
//
// The label is the class with the larger share; an even split
// resolves to "No". Confidence is the winning share rounded to
// two decimals, so 2 of 3 trees agreeing reports 0.67.

use anyhow::Result;

use crate::domain::reading::{MachineReading, Prediction};
use crate::domain::traits::DowntimeClassifier;
use crate::infra::checkpoint::ModelStore;
use crate::ml::forest::RandomForest;

pub struct Inferencer {
    forest: RandomForest,
}

impl Inferencer {
    pub fn new(forest: RandomForest) -> Self {
        Self { forest }
    }

    pub fn from_store(store: &ModelStore) -> Result<Self> {
        Ok(Self::new(store.load()?))
    }

    /// Label plus the winning class probability, rounded to two decimals.
    pub fn predict(&self, reading: &MachineReading) -> Prediction {
        let proba = self.forest.class_probabilities(reading);
        let prediction = Prediction {
            downtime:   proba.label(),
            confidence: round_to_hundredths(proba.max()),
        };

        tracing::debug!(
            "Predicted {:?} for T={} R={} (p_yes={:.4})",
            prediction.downtime,
            reading.temperature,
            reading.run_time,
            proba.yes,
        );
        prediction
    }
}

fn round_to_hundredths(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
