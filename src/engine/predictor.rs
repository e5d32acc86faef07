//! Single-input and batch prediction
//!
//! A `Predictor` holds a shared handle to the loaded model and the form and
//! batch settings. It keeps no state between calls.

use std::sync::Arc;

use anyhow::{anyhow, Result};
use serde::Serialize;
use thiserror::Error;

use super::format::{format_currency, format_years};
use crate::chart::{ChartSpec, Series};
use crate::config::{BatchConfig, FormConfig};
use crate::model::Regressor;
use crate::table::{Table, UploadError};

/// Trend chart title
pub const TREND_TITLE: &str = "Predicted Salary vs. Years of Experience";
/// Trend chart x axis label
pub const TREND_X_LABEL: &str = "Years of Experience";
/// Trend chart y axis label
pub const TREND_Y_LABEL: &str = "Predicted Salary";
/// Comparison chart title
pub const COMPARISON_TITLE: &str = "Actual vs. Predicted Salaries";

/// Why a batch request was abandoned
#[derive(Debug, Error)]
pub enum PredictError {
    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error("prediction failed: {0}")]
    Model(anyhow::Error),
}

/// Result of predicting one manually entered value
#[derive(Debug, Clone, Serialize)]
pub struct SinglePrediction {
    pub years_experience: f64,
    pub prediction: f64,
    pub formatted: String,
    pub message: String,
    pub chart: ChartSpec,
}

/// Result of predicting every row of an uploaded table
#[derive(Debug, Clone, Serialize)]
pub struct BatchPrediction {
    /// Input columns plus the appended prediction column
    pub table: Table,
    pub predictions: Vec<f64>,
    /// True when the actual column was present and the comparison chart was chosen
    pub comparison: bool,
    pub chart: ChartSpec,
}

impl BatchPrediction {
    pub fn row_count(&self) -> usize {
        self.table.num_rows()
    }
}

/// Runs the model for the form and for uploads
pub struct Predictor {
    model: Arc<dyn Regressor>,
    form: FormConfig,
    batch: BatchConfig,
}

impl Predictor {
    /// Create a predictor; the model must take exactly one feature
    pub fn new(model: Arc<dyn Regressor>, form: FormConfig, batch: BatchConfig) -> Result<Self> {
        if model.num_features() != 1 {
            return Err(anyhow!(
                "model expects {} features, but predictions use the single `{}` input",
                model.num_features(),
                batch.input_column
            ));
        }
        Ok(Self { model, form, batch })
    }

    pub fn form(&self) -> &FormConfig {
        &self.form
    }

    pub fn batch_config(&self) -> &BatchConfig {
        &self.batch
    }

    /// Predict a single value and the trend curve around it
    pub fn predict_single(&self, years: f64) -> Result<SinglePrediction> {
        let prediction = self
            .model
            .predict(&[vec![years]])?
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("model returned no prediction"))?;

        let formatted = format_currency(prediction);
        let message = format!(
            "The predicted salary for {} years of experience is: {}",
            format_years(years),
            formatted
        );

        Ok(SinglePrediction {
            years_experience: years,
            prediction,
            formatted,
            message,
            chart: self.trend_chart()?,
        })
    }

    /// Line chart of predictions across the whole form range
    pub fn trend_chart(&self) -> Result<ChartSpec> {
        let xs = self.form.curve_inputs();
        let ys = self.model.predict_column(&xs)?;
        Ok(ChartSpec::line(
            TREND_TITLE,
            TREND_X_LABEL,
            TREND_Y_LABEL,
            xs,
            &ys,
        ))
    }

    /// Parse an uploaded CSV and predict every row
    pub fn predict_upload(&self, bytes: &[u8]) -> Result<BatchPrediction, PredictError> {
        let table = Table::from_csv(bytes)?;
        self.predict_table(table)
    }

    /// Predict every row of a parsed table
    pub fn predict_table(&self, mut table: Table) -> Result<BatchPrediction, PredictError> {
        let cfg = &self.batch;

        if !table.has_column(&cfg.input_column) {
            return Err(UploadError::MissingColumn(cfg.input_column.clone()).into());
        }
        let xs = table.numeric_column(&cfg.input_column)?;

        let predictions = self
            .model
            .predict_column(&xs)
            .map_err(PredictError::Model)?;
        if predictions.len() != xs.len() {
            return Err(PredictError::Model(anyhow!(
                "model returned {} predictions for {} rows",
                predictions.len(),
                xs.len()
            )));
        }

        let actual = table.optional_numeric_column(&cfg.actual_column);
        let comparison = actual.is_some();

        let chart = match actual {
            Some(actual) => ChartSpec::grouped_bar(
                COMPARISON_TITLE,
                cfg.input_column.clone(),
                xs,
                vec![
                    Series::new(cfg.actual_column.clone(), actual),
                    Series::dense(cfg.prediction_column.clone(), &predictions),
                ],
            ),
            None => ChartSpec::bar(
                cfg.input_column.clone(),
                xs,
                Series::dense(cfg.prediction_column.clone(), &predictions),
            ),
        };

        let cells = predictions.iter().map(|p| p.to_string()).collect();
        table
            .push_column(&cfg.prediction_column, cells)
            .map_err(PredictError::Model)?;

        tracing::debug!(
            rows = table.num_rows(),
            comparison,
            "batch prediction complete"
        );

        Ok(BatchPrediction {
            table,
            predictions,
            comparison,
            chart,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::ChartKind;
    use crate::model::LinearModel;

    fn predictor() -> Predictor {
        let model = Arc::new(LinearModel::new(9449.96, vec![25792.2]));
        Predictor::new(model, FormConfig::default(), BatchConfig::default()).unwrap()
    }

    #[test]
    fn test_single_prediction_example() {
        let result = predictor().predict_single(5.0).unwrap();
        assert_eq!(result.formatted, "$138,410.96");
        assert_eq!(
            result.message,
            "The predicted salary for 5.0 years of experience is: $138,410.96"
        );
    }

    #[test]
    fn test_single_prediction_is_deterministic() {
        let p = predictor();
        let a = p.predict_single(7.5).unwrap();
        let b = p.predict_single(7.5).unwrap();
        assert_eq!(a.formatted, b.formatted);
        assert_eq!(a.prediction, b.prediction);
    }

    #[test]
    fn test_trend_chart() {
        let chart = predictor().predict_single(1.0).unwrap().chart;
        assert_eq!(chart.kind, ChartKind::Line);
        assert_eq!(chart.title.as_deref(), Some(TREND_TITLE));
        assert_eq!(chart.x.len(), 100);
        assert_eq!(chart.x[0], 0.0);
        assert_eq!(chart.x[99], 50.0);
        assert!(chart.is_aligned());
    }

    #[test]
    fn test_batch_with_actual_uses_comparison_chart() {
        let csv = b"YearsExperience,ActualSalary\n1.1,39343\n2.0,46205\n";
        let result = predictor().predict_upload(csv).unwrap();

        assert_eq!(result.row_count(), 2);
        assert!(result.comparison);
        assert_eq!(result.chart.kind, ChartKind::GroupedBar);
        assert_eq!(result.chart.title.as_deref(), Some(COMPARISON_TITLE));
        assert_eq!(result.chart.series.len(), 2);
        assert!(result.chart.is_aligned());

        let col = result.table.column_index("Predicted Salary").unwrap();
        assert_eq!(col, 2);
        for row in &result.table.rows {
            assert!(row[col].parse::<f64>().is_ok());
        }
    }

    #[test]
    fn test_batch_without_actual_uses_bar_chart() {
        let csv = b"YearsExperience\n3.0\n1.0\n2.0\n";
        let result = predictor().predict_upload(csv).unwrap();

        assert!(!result.comparison);
        assert_eq!(result.chart.kind, ChartKind::Bar);
        assert_eq!(result.chart.x, vec![3.0, 1.0, 2.0]);
        assert_eq!(result.chart.series[0].name, "Predicted Salary");
    }

    #[test]
    fn test_batch_preserves_row_order() {
        let csv = b"id,YearsExperience\na,3.0\nb,1.0\nc,2.0\n";
        let result = predictor().predict_upload(csv).unwrap();

        let ids: Vec<&str> = result.table.rows.iter().map(|r| r[0].as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert!(result.predictions[0] > result.predictions[2]);
        assert!(result.predictions[2] > result.predictions[1]);
    }

    #[test]
    fn test_batch_missing_column() {
        let err = predictor()
            .predict_upload(b"Experience,ActualSalary\n1,2\n")
            .unwrap_err();
        match err {
            PredictError::Upload(e) => {
                assert_eq!(e, UploadError::MissingColumn("YearsExperience".to_string()))
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_batch_blank_header_is_missing_column() {
        let err = predictor().predict_upload(b",\n1,2\n").unwrap_err();
        assert!(matches!(
            err,
            PredictError::Upload(UploadError::MissingColumn(ref c)) if c == "YearsExperience"
        ));
    }

    #[test]
    fn test_batch_non_numeric_input() {
        let err = predictor()
            .predict_upload(b"YearsExperience\nfive\n")
            .unwrap_err();
        assert!(matches!(
            err,
            PredictError::Upload(UploadError::InvalidNumber { row: 1, .. })
        ));
    }

    #[test]
    fn test_multi_feature_model_rejected() {
        let model = Arc::new(LinearModel::new(0.0, vec![1.0, 2.0]));
        assert!(Predictor::new(model, FormConfig::default(), BatchConfig::default()).is_err());
    }
}
