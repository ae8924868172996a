// ============================================================
// Layer 2 — Service Error Taxonomy
// ============================================================
// Every failure a caller can see falls into one of these.
// The Display text is exactly the `detail` string returned to
// HTTP clients, so the wording here is part of the API.
//
//   bad input            → InvalidUpload, InvalidDataset
//   precondition not met → NoData, ModelUnavailable
//   anything else        → Internal
//
// None of them are fatal: the service keeps serving after
// returning any of these.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// The upload could not be parsed or lacks a required column
    #[error("File upload failed: {0}")]
    InvalidUpload(String),

    /// /train called before any successful upload
    #[error("No data uploaded. Please upload data first.")]
    NoData,

    /// No model in memory and none loadable from the artifact
    #[error("Model not trained or unavailable. Please train the model first.")]
    ModelUnavailable,

    /// The held dataset cannot be trained on (bad values, too few rows)
    #[error("Training failed: {0}")]
    InvalidDataset(String),

    #[error("Internal error: {0:#}")]
    Internal(anyhow::Error),
}

impl ServiceError {
    /// Wrap an anyhow error as bad upload input, keeping its context chain.
    pub fn invalid_upload(err: anyhow::Error) -> Self {
        Self::InvalidUpload(format!("{err:#}"))
    }

    /// Wrap an anyhow error as bad training data, keeping its context chain.
    pub fn invalid_dataset(err: anyhow::Error) -> Self {
        Self::InvalidDataset(format!("{err:#}"))
    }

    /// True for the client-side taxonomy ("bad input" and
    /// "precondition not met").
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Internal(_))
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_strings() {
        assert_eq!(
            ServiceError::NoData.to_string(),
            "No data uploaded. Please upload data first."
        );
        assert_eq!(
            ServiceError::ModelUnavailable.to_string(),
            "Model not trained or unavailable. Please train the model first."
        );
    }

    #[test]
    fn test_invalid_upload_keeps_context_chain() {
        let err = anyhow::anyhow!("bad quote").context("could not parse CSV");
        assert_eq!(
            ServiceError::invalid_upload(err).to_string(),
            "File upload failed: could not parse CSV: bad quote"
        );
    }

    #[test]
    fn test_internal_is_not_client_error() {
        assert!(!ServiceError::Internal(anyhow::anyhow!("disk full")).is_client_error());
        assert!(ServiceError::NoData.is_client_error());
    }
}
