//! HTTP request handlers for /upload, /train and /predict.

use std::sync::Arc;

use axum::{
    extract::{
        multipart::MultipartRejection,
        rejection::JsonRejection,
        Multipart, State,
    },
    Json,
};
use serde::Serialize;
use tracing::info;

use crate::application::{context::ServiceContext, error::ServiceError};
use crate::domain::reading::{MachineReading, Prediction};
use crate::infra::metrics::EvalMetrics;

use super::error::ApiError;

/// Name of the multipart field carrying the CSV file
const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub message: String,
    pub columns: Vec<String>,
}

/// Accept a CSV file and make it the held dataset.
pub async fn upload(
    State(ctx): State<Arc<ServiceContext>>,
    multipart:  Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut multipart = multipart
        .map_err(|rejection| ServiceError::InvalidUpload(rejection.body_text()))?;

    let bytes   = read_file_field(&mut multipart).await?;
    let columns = ctx.upload(&bytes).await?;

    Ok(Json(UploadResponse {
        message: "File uploaded successfully.".to_string(),
        columns,
    }))
}

async fn read_file_field(multipart: &mut Multipart) -> Result<Vec<u8>, ServiceError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ServiceError::InvalidUpload(e.body_text()))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or("<unnamed>").to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| ServiceError::InvalidUpload(e.body_text()))?;

        info!("Received file: {} ({} bytes)", file_name, data.len());
        return Ok(data.to_vec());
    }

    Err(ServiceError::InvalidUpload(format!(
        "no '{FILE_FIELD}' field in multipart body"
    )))
}

/// Fit a model on the held dataset and report test-set metrics.
pub async fn train(
    State(ctx): State<Arc<ServiceContext>>,
) -> Result<Json<EvalMetrics>, ApiError> {
    let report = ctx.train().await?;
    Ok(Json(report.metrics))
}

/// Classify one reading with the in-memory (or on-disk) model.
pub async fn predict(
    State(ctx): State<Arc<ServiceContext>>,
    payload:    Result<Json<MachineReading>, JsonRejection>,
) -> Result<Json<Prediction>, ApiError> {
    let Json(reading) = payload.map_err(|rejection| ApiError::Unprocessable(rejection.body_text()))?;

    let prediction = ctx.predict(reading).await?;
    Ok(Json(prediction))
}
