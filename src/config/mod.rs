//! Configuration system for salaryd
//!
//! `SalarydConfig` groups the server, model, form and batch settings.
//! Every field has a default, so an empty file (or no file at all) is valid.

mod batch;
mod form;
mod server;

pub use batch::BatchConfig;
pub use form::{FormConfig, InputError};
pub use server::ServerConfig;

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable consulted when no model path is configured
pub const MODEL_PATH_ENV: &str = "SALARYD_MODEL";

/// Model path used when nothing else is configured
pub const DEFAULT_MODEL_PATH: &str = "./linear_regression_model.json";

/// Model location settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Path to the model file or a directory containing one
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// salaryd configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SalarydConfig {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Model location
    #[serde(default)]
    pub model: ModelConfig,

    /// Single-input form bounds and trend curve
    #[serde(default)]
    pub form: FormConfig,

    /// Batch upload column names and export settings
    #[serde(default)]
    pub batch: BatchConfig,
}

impl SalarydConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from a JSON file
    pub fn from_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration, picking the parser from the file extension
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        let config = match ext {
            "yaml" | "yml" => Self::from_yaml(path),
            "json" => Self::from_json(path),
            _ => return Err(anyhow!("Unsupported config file format: .{}", ext)),
        }
        .with_context(|| format!("failed to load config from {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints that serde cannot express
    pub fn validate(&self) -> Result<()> {
        self.form.validate()?;
        self.batch.validate()?;
        Ok(())
    }

    /// Resolve the model path: explicit override, then config, then env, then default
    pub fn model_path(&self, override_path: Option<PathBuf>) -> PathBuf {
        override_path
            .or_else(|| self.model.path.clone())
            .or_else(|| std::env::var(MODEL_PATH_ENV).ok().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MODEL_PATH))
    }
}
