//! Batch upload settings

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

/// Column names and export settings for batch prediction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Required input column (exact name match)
    #[serde(default = "default_input_column")]
    pub input_column: String,

    /// Optional column compared against predictions in the chart
    #[serde(default = "default_actual_column")]
    pub actual_column: String,

    /// Name of the appended prediction column
    #[serde(default = "default_prediction_column")]
    pub prediction_column: String,

    /// File name offered for the CSV download
    #[serde(default = "default_download_file_name")]
    pub download_file_name: String,
}

fn default_input_column() -> String {
    "YearsExperience".to_string()
}

fn default_actual_column() -> String {
    "ActualSalary".to_string()
}

fn default_prediction_column() -> String {
    "Predicted Salary".to_string()
}

fn default_download_file_name() -> String {
    "predicted_salaries.csv".to_string()
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            input_column: default_input_column(),
            actual_column: default_actual_column(),
            prediction_column: default_prediction_column(),
            download_file_name: default_download_file_name(),
        }
    }
}

impl BatchConfig {
    pub fn validate(&self) -> Result<()> {
        if self.input_column.is_empty() || self.prediction_column.is_empty() {
            return Err(anyhow!("batch column names must not be empty"));
        }
        if self.input_column == self.prediction_column {
            return Err(anyhow!(
                "prediction column '{}' would overwrite the input column",
                self.prediction_column
            ));
        }
        Ok(())
    }
}
