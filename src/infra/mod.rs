// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting concerns that don't belong in any specific
// business layer:
//
//   checkpoint.rs — The model artifact
//                   Writes the fitted forest to the configured
//                   path after training and reads it back when
//                   /predict finds no model in memory. The
//                   file may have been written by an earlier
//                   process.
//
//   metrics.rs    — Evaluation and run history
//                   Accuracy and F1 on the test split, plus an
//                   optional append-only CSV of every training
//                   run.
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §9 (Error Handling with anyhow)

/// Model artifact saving and loading
pub mod checkpoint;

/// Test-set metrics and training-run CSV log
pub mod metrics;
