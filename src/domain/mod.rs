// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Pure Rust structs and traits that define the core concepts
// of the downtime service.
//
// Rules for this layer:
//   - NO polars, ndarray or linfa types allowed here
//   - NO file I/O or network calls
//   - Only plain Rust structs, enums, and traits
//
// The rest of the system speaks in these types: the HTTP layer
// deserialises a MachineReading, the ML layer returns a
// Prediction, and the data layer produces LabelledReadings.
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// Readings, labels and predictions
pub mod reading;

// Core abstractions (traits) that other layers implement
pub mod traits;

/// Identifies the machine a row belongs to. Required on upload
/// but never used as a feature.
pub const MACHINE_ID_COLUMN: &str = "Machine_ID";

/// Degrees, as recorded by the machine sensor.
pub const TEMPERATURE_COLUMN: &str = "Temperature";

/// Minutes of operation since the last stop.
pub const RUN_TIME_COLUMN: &str = "Run_Time";

/// 1 when the machine went down, 0 otherwise.
pub const LABEL_COLUMN: &str = "Downtime_Flag";

/// Feature columns in the order the model consumes them.
pub const FEATURE_COLUMNS: [&str; 2] = [TEMPERATURE_COLUMN, RUN_TIME_COLUMN];

/// Every uploaded table must carry at least these columns.
pub const REQUIRED_COLUMNS: [&str; 4] = [
    MACHINE_ID_COLUMN,
    TEMPERATURE_COLUMN,
    RUN_TIME_COLUMN,
    LABEL_COLUMN,
];
