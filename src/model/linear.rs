//! Fitted ordinary linear regression

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use super::Regressor;

/// Value of `model_type` for linear regression documents
pub const LINEAR_REGRESSION: &str = "linear_regression";

fn default_model_type() -> String {
    LINEAR_REGRESSION.to_string()
}

/// A fitted linear model: `intercept + coefficients · x`
///
/// Parameters come from an external training step; this type never fits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    /// Model family tag
    #[serde(default = "default_model_type")]
    pub model_type: String,

    /// Bias term
    pub intercept: f64,

    /// One weight per feature
    pub coefficients: Vec<f64>,

    /// Feature names in coefficient order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_names: Option<Vec<String>>,

    /// Name of the predicted quantity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_name: Option<String>,

    /// When the training step produced the model (free-form)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trained_at: Option<String>,
}

impl LinearModel {
    /// Create a model from raw parameters
    pub fn new(intercept: f64, coefficients: Vec<f64>) -> Self {
        Self {
            model_type: default_model_type(),
            intercept,
            coefficients,
            feature_names: None,
            target_name: None,
            trained_at: None,
        }
    }

    #[cfg(test)]
    fn with_feature_names(mut self, names: Vec<String>) -> Self {
        self.feature_names = Some(names);
        self
    }

    /// Check that the deserialized parameters describe a usable model
    pub fn validate(&self) -> Result<()> {
        if self.model_type != LINEAR_REGRESSION {
            return Err(anyhow!(
                "unsupported model_type '{}', expected '{}'",
                self.model_type,
                LINEAR_REGRESSION
            ));
        }
        if self.coefficients.is_empty() {
            return Err(anyhow!("model has no coefficients"));
        }
        if !self.intercept.is_finite() {
            return Err(anyhow!("intercept is not finite"));
        }
        if let Some(i) = self.coefficients.iter().position(|c| !c.is_finite()) {
            return Err(anyhow!("coefficient {} is not finite", i));
        }
        if let Some(names) = &self.feature_names {
            if names.len() != self.coefficients.len() {
                return Err(anyhow!(
                    "{} feature names for {} coefficients",
                    names.len(),
                    self.coefficients.len()
                ));
            }
        }
        Ok(())
    }

    /// Predict a single feature vector
    pub fn predict_one(&self, x: &[f64]) -> Result<f64> {
        if x.len() != self.coefficients.len() {
            return Err(anyhow!(
                "expected {} features, got {}",
                self.coefficients.len(),
                x.len()
            ));
        }
        Ok(self.intercept
            + self
                .coefficients
                .iter()
                .zip(x)
                .map(|(w, v)| w * v)
                .sum::<f64>())
    }
}

impl Regressor for LinearModel {
    fn num_features(&self) -> usize {
        self.coefficients.len()
    }

    fn predict(&self, features: &[Vec<f64>]) -> Result<Vec<f64>> {
        features
            .iter()
            .enumerate()
            .map(|(row, x)| {
                self.predict_one(x)
                    .map_err(|e| anyhow!("row {}: {}", row, e))
            })
            .collect()
    }
}
