//! Model loading utilities
//!
//! Models are produced by an external training step and stored as a
//! JSON or YAML document. Loading happens once at startup; any failure
//! is fatal and carries the offending path.

mod detect;

pub use detect::{detect_model_source, ModelFormat, ModelSource};

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::model::LinearModel;

/// A model together with where it came from
#[derive(Debug, Clone)]
pub struct LoadedModel {
    pub model: LinearModel,
    pub source: ModelSource,
}

impl LoadedModel {
    pub fn path(&self) -> &PathBuf {
        &self.source.path
    }
}

/// Load a model from any supported format
///
/// This function auto-detects the format, parses and validates the model.
pub fn load_model<P: AsRef<Path>>(path: P) -> Result<LoadedModel> {
    let path = path.as_ref();
    let source = detect_model_source(path)
        .with_context(|| format!("cannot locate model at {}", path.display()))?;

    let content = std::fs::read_to_string(&source.path)
        .with_context(|| format!("cannot read model file {}", source.path.display()))?;

    let model = parse_model(&content, source.format)
        .with_context(|| format!("invalid model file {}", source.path.display()))?;

    tracing::debug!(
        path = %source.path.display(),
        format = source.format.name(),
        features = model.coefficients.len(),
        "model parsed"
    );

    Ok(LoadedModel { model, source })
}

/// Parse and validate a model document
pub fn parse_model(content: &str, format: ModelFormat) -> Result<LinearModel> {
    let model: LinearModel = match format {
        ModelFormat::Json => serde_json::from_str(content)?,
        ModelFormat::Yaml => serde_yaml::from_str(content)?,
    };
    model.validate()?;
    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_json_model() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("salary.json");
        std::fs::write(
            &path,
            r#"{
                "model_type": "linear_regression",
                "intercept": 9449.96,
                "coefficients": [25792.2],
                "feature_names": ["YearsExperience"],
                "target_name": "Salary"
            }"#,
        )
        .unwrap();

        let loaded = load_model(&path).unwrap();
        assert_eq!(loaded.model.coefficients, vec![25792.2]);
        assert_eq!(loaded.source.format, ModelFormat::Json);
        assert_eq!(loaded.path(), &path);
    }

    #[test]
    fn test_bundled_model_loads() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/linear_regression_model.json");
        let loaded = load_model(path).unwrap();
        assert_eq!(
            loaded.model.feature_names.as_deref(),
            Some(&["YearsExperience".to_string()][..])
        );
    }

    #[test]
    fn test_load_yaml_model() {
        let yaml = "intercept: 10.0\ncoefficients: [2.0]\n";
        let model = parse_model(yaml, ModelFormat::Yaml).unwrap();
        assert_eq!(model.intercept, 10.0);
    }

    #[test]
    fn test_missing_model_reports_path() {
        let err = load_model("/no/such/linear_regression_model.json").unwrap_err();
        let chain = format!("{:#}", err);
        assert!(chain.contains("/no/such/linear_regression_model.json"));
    }

    #[test]
    fn test_corrupt_model_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = load_model(&path).unwrap_err();
        let chain = format!("{:#}", err);
        assert!(chain.contains("invalid model file"));
        assert!(chain.contains("model.json"));
    }

    #[test]
    fn test_invalid_parameters_rejected() {
        let err = parse_model(r#"{"intercept": 1.0, "coefficients": []}"#, ModelFormat::Json)
            .unwrap_err();
        assert!(err.to_string().contains("no coefficients"));
    }
}
