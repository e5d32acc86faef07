//! Route definitions

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    health, index, model_info, predict, predict_batch, predict_batch_csv, AppState,
};

/// Create the router for the page and the prediction API
pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Page
        .route("/", get(index))
        // Health check
        .route("/health", get(health))
        // Prediction API
        .route("/v1/model", get(model_info))
        .route("/v1/predict", post(predict))
        .route("/v1/predict/batch", post(predict_batch))
        .route("/v1/predict/batch/csv", post(predict_batch_csv))
}
