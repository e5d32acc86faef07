//! Regression models.
//!
//! The server only needs the prediction contract: an ordered batch of
//! feature vectors in, an equal-length ordered batch of predictions out.

mod linear;

pub use linear::{LinearModel, LINEAR_REGRESSION};

use anyhow::Result;

/// Prediction contract shared by every model the server can host
pub trait Regressor: Send + Sync {
    /// Number of features each input vector must carry
    fn num_features(&self) -> usize;

    /// Predict one value per feature vector, preserving order
    fn predict(&self, features: &[Vec<f64>]) -> Result<Vec<f64>>;

    /// Predict for single-feature inputs given as a plain column
    fn predict_column(&self, column: &[f64]) -> Result<Vec<f64>> {
        let rows: Vec<Vec<f64>> = column.iter().map(|&x| vec![x]).collect();
        self.predict(&rows)
    }
}
