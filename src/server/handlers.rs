//! HTTP request handlers

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::{multipart::MultipartError, Json, Multipart, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use super::page;
use crate::chart::ChartSpec;
use crate::config::{BatchConfig, FormConfig, InputError};
use crate::engine::{BatchPrediction, PredictError, Predictor};
use crate::loader::LoadedModel;
use crate::model::LinearModel;
use crate::table::UploadError;

/// Multipart field carrying the CSV
const UPLOAD_FIELD: &str = "file";

/// Shared application state
///
/// Built once at startup from the loaded model; read-only afterwards.
pub struct AppState {
    pub predictor: Predictor,
    pub model: LinearModel,
    pub model_path: PathBuf,
    pub max_body_size: usize,
}

impl AppState {
    pub fn new(
        loaded: LoadedModel,
        form: FormConfig,
        batch: BatchConfig,
        max_body_size: usize,
    ) -> Result<Self> {
        let predictor = Predictor::new(Arc::new(loaded.model.clone()), form, batch)?;
        Ok(Self {
            predictor,
            model_path: loaded.source.path,
            model: loaded.model,
            max_body_size,
        })
    }
}

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// The single-page form
pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(page::render(
        state.predictor.form(),
        state.predictor.batch_config(),
    ))
}

/// Model summary and form bounds
pub async fn model_info(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let model = &state.model;
    let response = ModelInfoResponse {
        object: "model".to_string(),
        model_type: model.model_type.clone(),
        intercept: model.intercept,
        coefficients: model.coefficients.clone(),
        feature_names: model.feature_names.clone(),
        target_name: model.target_name.clone(),
        trained_at: model.trained_at.clone(),
        path: state.model_path.display().to_string(),
        form: state.predictor.form().clone(),
    };
    (StatusCode::OK, Json(response))
}

/// Single-input prediction endpoint
pub async fn predict(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PredictRequest>,
) -> Response {
    let years = match state.predictor.form().check(request.years_experience) {
        Ok(years) => years,
        Err(e) => return input_error(e),
    };

    match state.predictor.predict_single(years) {
        Ok(result) => {
            let response = PredictResponse {
                id: format!("pred-{}", uuid::Uuid::new_v4()),
                object: "prediction".to_string(),
                created: chrono::Utc::now().timestamp(),
                years_experience: result.years_experience,
                prediction: result.prediction,
                formatted: result.formatted,
                message: result.message,
                chart: result.chart,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            tracing::error!("single prediction failed: {:#}", e);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Prediction failed.".to_string(),
                "server_error",
            )
        }
    }
}

/// Batch prediction endpoint: table, chart and CSV export as JSON
pub async fn predict_batch(State(state): State<Arc<AppState>>, multipart: Multipart) -> Response {
    let result = match run_batch(&state, multipart).await {
        Ok(result) => result,
        Err(e) => return predict_error(e),
    };

    let csv = match result.table.to_csv() {
        Ok(csv) => csv,
        Err(e) => return export_error(e),
    };

    let response = BatchResponse {
        id: format!("batch-{}", uuid::Uuid::new_v4()),
        object: "batch_prediction".to_string(),
        created: chrono::Utc::now().timestamp(),
        row_count: result.row_count(),
        comparison: result.comparison,
        columns: result.table.columns,
        rows: result.table.rows,
        chart: result.chart,
        file_name: state.predictor.batch_config().download_file_name.clone(),
        csv,
    };
    (StatusCode::OK, Json(response)).into_response()
}

/// Batch prediction endpoint returning the augmented CSV as a download
pub async fn predict_batch_csv(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Response {
    let result = match run_batch(&state, multipart).await {
        Ok(result) => result,
        Err(e) => return predict_error(e),
    };

    match result.table.to_csv() {
        Ok(csv) => {
            let disposition = format!(
                "attachment; filename=\"{}\"",
                state.predictor.batch_config().download_file_name
            );
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                csv,
            )
                .into_response()
        }
        Err(e) => export_error(e),
    }
}

async fn run_batch(state: &AppState, multipart: Multipart) -> Result<BatchPrediction, PredictError> {
    let (file_name, bytes) = read_upload(multipart, state.max_body_size).await?;
    tracing::info!("Received file: {} ({} bytes)", file_name, bytes.len());
    state.predictor.predict_upload(&bytes)
}

/// Pull the CSV out of a multipart body
///
/// Takes the field named `file`, or failing that the first field with a file name.
async fn read_upload(
    mut multipart: Multipart,
    limit: usize,
) -> Result<(String, Vec<u8>), UploadError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, limit))?
    {
        let is_upload = field.name() == Some(UPLOAD_FIELD) || field.file_name().is_some();
        if !is_upload {
            continue;
        }

        let file_name = field.file_name().unwrap_or("upload.csv").to_string();
        let data = field.bytes().await.map_err(|e| multipart_error(e, limit))?;
        return Ok((file_name, data.to_vec()));
    }

    Err(UploadError::MissingFile)
}

fn multipart_error(err: MultipartError, limit: usize) -> UploadError {
    tracing::warn!("failed to read multipart upload: {}", err);
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        UploadError::TooLarge { limit }
    } else {
        UploadError::Unreadable
    }
}

fn input_error(err: InputError) -> Response {
    error_response(
        StatusCode::UNPROCESSABLE_ENTITY,
        err.to_string(),
        "invalid_input",
    )
}

fn predict_error(err: PredictError) -> Response {
    match err {
        PredictError::Upload(e) => {
            let status = match &e {
                UploadError::TooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
                e if e.is_content_error() => StatusCode::UNPROCESSABLE_ENTITY,
                _ => StatusCode::BAD_REQUEST,
            };
            tracing::info!(kind = e.kind(), "upload rejected: {}", e);
            error_response(status, e.to_string(), e.kind())
        }
        PredictError::Model(e) => {
            tracing::error!("batch prediction failed: {:#}", e);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Prediction failed.".to_string(),
                "server_error",
            )
        }
    }
}

fn export_error(err: anyhow::Error) -> Response {
    tracing::error!("CSV export failed: {:#}", err);
    error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        "Could not export predictions.".to_string(),
        "server_error",
    )
}

fn error_response(status: StatusCode, message: String, kind: &str) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: ErrorDetail {
                message,
                r#type: kind.to_string(),
            },
        }),
    )
        .into_response()
}

// Request/Response types

#[derive(Deserialize)]
pub struct PredictRequest {
    pub years_experience: f64,
}

#[derive(Serialize)]
pub struct PredictResponse {
    pub id: String,
    pub object: String,
    pub created: i64,
    pub years_experience: f64,
    pub prediction: f64,
    pub formatted: String,
    pub message: String,
    pub chart: ChartSpec,
}

#[derive(Serialize)]
pub struct BatchResponse {
    pub id: String,
    pub object: String,
    pub created: i64,
    pub row_count: usize,
    pub comparison: bool,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub chart: ChartSpec,
    pub file_name: String,
    pub csv: String,
}

#[derive(Serialize)]
pub struct ModelInfoResponse {
    pub object: String,
    pub model_type: String,
    pub intercept: f64,
    pub coefficients: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feature_names: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trained_at: Option<String>,
    pub path: String,
    pub form: FormConfig,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub message: String,
    pub r#type: String,
}
