// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The classifier contract the rest of the service depends on.
// The ML layer's RandomForest implements it; the inferencer
// and the HTTP layer only ever see the trait methods.
//
// Persistable describes anything that round-trips through a
// file on disk. The trained forest implements it so the model
// artifact can be written after training and read back later,
// possibly by a different process.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use anyhow::Result;
use std::path::Path;

use crate::domain::reading::{ClassProbabilities, MachineReading};

// ─── DowntimeClassifier ───────────────────────────────────────────────────────
/// A fitted binary classifier over machine readings.
pub trait DowntimeClassifier {
    /// Class probabilities for a single reading. Sums to 1.0.
    fn class_probabilities(&self, reading: &MachineReading) -> ClassProbabilities;
}

// ─── Persistable ──────────────────────────────────────────────────────────────
/// Any component whose state can be saved and restored from disk.
pub trait Persistable: Sized {
    /// Save this component's state to the given path
    fn save(&self, path: &Path) -> Result<()>;

    /// Load a component's state from the given path.
    fn load(path: &Path) -> Result<Self>;
}
