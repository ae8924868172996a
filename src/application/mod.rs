// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// This layer orchestrates the other layers to serve a request
// (or a CLI command).
//
// Rules for this layer:
//   - No ML math or model code here
//   - No HTTP or printing here (that's Layer 1)
//   - No direct file access (that's Layer 4 and 6)
//   - Only workflow coordination and service state
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// The error taxonomy surfaced to callers
pub mod error;

// The training workflow
pub mod train_use_case;

// Held dataset, held model, and the locks around them
pub mod context;
