// ============================================================
// Layer 1 — HTTP Error Mapping
// ============================================================
// Every error leaves the service as
//   { "detail": "<human readable message>" }
// with a status code:
//   400 — bad input and unmet preconditions (ServiceError)
//   422 — a request body that doesn't match the expected shape
//   500 — internal failures (artifact write, worker panic)

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::application::error::ServiceError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error("{0}")]
    Unprocessable(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Service(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
            Self::Service(_)      => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = self.to_string();

        if status.is_server_error() {
            tracing::error!("{detail}");
        } else {
            tracing::warn!("Request rejected ({}): {detail}", status.as_u16());
        }

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::from(ServiceError::NoData).status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::from(ServiceError::InvalidUpload("x".into())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(ServiceError::Internal(anyhow::anyhow!("x"))).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::Unprocessable("x".into()).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn test_transparent_detail() {
        let e = ApiError::from(ServiceError::ModelUnavailable);
        assert_eq!(
            e.to_string(),
            "Model not trained or unavailable. Please train the model first."
        );
    }
}
