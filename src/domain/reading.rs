// ============================================================
// Layer 3 — Reading, Label and Prediction Types
// ============================================================
// A MachineReading is the pair of sensor values the model
// looks at. It doubles as the JSON body of /predict, so the
// serde names match the column names of the uploaded CSV
// ("Temperature", "Run_Time") rather than Rust field names.
//
// DowntimeLabel is the binary target. Class index 0 is "No",
// class index 1 is "Yes", matching the 0/1 Downtime_Flag.
//
// Reference: Rust Book §5 (Structs), §6 (Enums)
//            serde field attributes documentation

use serde::{Deserialize, Serialize};

/// One set of sensor values to classify.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MachineReading {
    #[serde(rename = "Temperature")]
    pub temperature: f64,

    #[serde(rename = "Run_Time")]
    pub run_time: f64,
}

impl MachineReading {
    pub fn new(temperature: f64, run_time: f64) -> Self {
        Self { temperature, run_time }
    }

    /// Feature vector in the order given by `FEATURE_COLUMNS`.
    pub fn features(&self) -> [f64; 2] {
        [self.temperature, self.run_time]
    }
}

/// Whether a machine is expected to go down.
///
/// Serialises as the bare variant name, so a prediction renders
/// as `"Yes"` or `"No"` in the response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DowntimeLabel {
    No,
    Yes,
}

impl DowntimeLabel {
    /// Number of classes the classifier distinguishes
    pub const CLASS_COUNT: usize = 2;

    /// The class index this label is encoded as during training
    pub fn class_index(self) -> usize {
        match self {
            Self::No  => 0,
            Self::Yes => 1,
        }
    }
}

/// A reading together with its known outcome — one training row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelledReading {
    pub reading: MachineReading,
    pub label:   DowntimeLabel,
}

/// Probability mass the classifier assigns to each class.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassProbabilities {
    pub no:  f64,
    pub yes: f64,
}

impl ClassProbabilities {
    /// The most likely label. Ties resolve to "No", the lower
    /// class index, so the result is stable for an even vote.
    pub fn label(&self) -> DowntimeLabel {
        if self.yes > self.no { DowntimeLabel::Yes } else { DowntimeLabel::No }
    }

    /// Probability of the most likely class
    pub fn max(&self) -> f64 {
        self.no.max(self.yes)
    }
}

/// Response body of /predict.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    #[serde(rename = "Downtime")]
    pub downtime: DowntimeLabel,

    /// Maximum class probability, rounded to two decimals
    #[serde(rename = "Confidence")]
    pub confidence: f64,
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reading_uses_column_names_on_the_wire() {
        let reading: MachineReading =
            serde_json::from_str(r#"{"Temperature": 80.0, "Run_Time": 120}"#).unwrap();
        assert_eq!(reading, MachineReading::new(80.0, 120.0));
        assert_eq!(reading.features(), [80.0, 120.0]);
    }

    #[test]
    fn test_reading_rejects_missing_field() {
        let parsed = serde_json::from_str::<MachineReading>(r#"{"Temperature": 80.0}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_label_class_mapping() {
        assert_eq!(DowntimeLabel::Yes.class_index(), 1);
        assert_eq!(DowntimeLabel::No.class_index(), 0);
    }

    #[test]
    fn test_even_vote_resolves_to_no() {
        let p = ClassProbabilities { no: 0.5, yes: 0.5 };
        assert_eq!(p.label(), DowntimeLabel::No);
        assert_eq!(p.max(), 0.5);
    }

    #[test]
    fn test_prediction_serialises_yes_no() {
        let p = Prediction { downtime: DowntimeLabel::Yes, confidence: 0.87 };
        let json = serde_json::to_value(p).unwrap();
        assert_eq!(json["Downtime"], "Yes");
        assert_eq!(json["Confidence"], 0.87);
    }
}
