// ============================================================
// Layer 5 — ML / Model Layer (linfa)
// ============================================================
// This layer contains ALL linfa and ndarray specific code.
// No other layer imports from linfa directly — only this one.
//
// What's in this layer:
//
//   forest.rs     — A random forest of linfa-trees decision
//                   trees. Each tree is fitted on a bootstrap
//                   resample drawn from a seeded RNG, and the
//                   class probability is the share of trees
//                   voting for that class.
//
//   trainer.rs    — Turns labelled readings into ndarray
//                   matrices, fits the forest on the training
//                   rows and scores it on the test rows.
//
//   inferencer.rs — Wraps a fitted forest and answers one
//                   reading at a time with a label and a
//                   rounded confidence.
//
// Reference: linfa / linfa-trees documentation
//            Breiman (2001) Random Forests

/// Bagged decision-tree ensemble
pub mod forest;

/// Fit on the training split, score on the test split
pub mod trainer;

/// Single-reading prediction with rounded confidence
pub mod inferencer;
