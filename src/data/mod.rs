// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything between the bytes of an uploaded CSV file and
// the labelled rows the trainer consumes.
//
//   uploaded bytes / CSV file
//       │
//       ▼
//   CsvLoader         → parses with polars, checks required columns
//       │
//       ▼
//   Dataset           → the held table; extracts labelled readings
//       │
//       ▼
//   split_train_test  → seeded shuffle, 80% train / 20% test
//
// polars stays inside this layer. Nothing above it sees a
// DataFrame.
//
// Reference: polars user guide (CSV reading)
//            Rust Book §13 (Iterators and Closures)

/// Parses delimited text into a Dataset using polars
pub mod loader;

/// The uploaded table and its conversion into training rows
pub mod dataset;

/// Seeded shuffle-and-split into train/test sets
pub mod splitter;
