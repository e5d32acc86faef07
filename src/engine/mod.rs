//! Prediction engine
//!
//! This module turns model outputs into what the page shows:
//! - Predictor: single-input and batch prediction over a shared model
//! - format: currency and input formatting

mod format;
mod predictor;

pub use format::{format_currency, format_years};
pub use predictor::{
    BatchPrediction, PredictError, Predictor, SinglePrediction, COMPARISON_TITLE, TREND_TITLE,
    TREND_X_LABEL, TREND_Y_LABEL,
};
