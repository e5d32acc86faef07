//! Model format and source detection

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};

/// Detected model document format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFormat {
    /// JSON document
    Json,
    /// YAML document
    Yaml,
}

impl ModelFormat {
    /// Format for a file extension, if supported
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "json" => Some(ModelFormat::Json),
            "yaml" | "yml" => Some(ModelFormat::Yaml),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ModelFormat::Json => "JSON",
            ModelFormat::Yaml => "YAML",
        }
    }
}

/// Detected model source
#[derive(Debug, Clone)]
pub struct ModelSource {
    /// Path to the model document
    pub path: PathBuf,
    /// Detected format
    pub format: ModelFormat,
}

/// Detect model format and source from a path
///
/// The path can be:
/// - A direct path to a .json, .yaml or .yml file
/// - A directory containing `model.json`, `model.yaml`, `model.yml`,
///   or failing that any `*.json` file
pub fn detect_model_source<P: AsRef<Path>>(path: P) -> Result<ModelSource> {
    let path = path.as_ref();

    if path.is_file() {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        let format = ModelFormat::from_extension(ext)
            .ok_or_else(|| anyhow!("Unsupported model file format: .{}", ext))?;
        Ok(ModelSource {
            path: path.to_path_buf(),
            format,
        })
    } else if path.is_dir() {
        detect_model_in_directory(path)
    } else {
        Err(anyhow!("Model path does not exist: {}", path.display()))
    }
}

/// Detect a model document in a directory
fn detect_model_in_directory(dir: &Path) -> Result<ModelSource> {
    let well_known = ["model.json", "model.yaml", "model.yml"];

    for name in &well_known {
        let candidate = dir.join(name);
        if candidate.is_file() {
            return detect_model_source(candidate);
        }
    }

    if let Some(json_file) = find_json_in_dir(dir) {
        return Ok(ModelSource {
            path: json_file,
            format: ModelFormat::Json,
        });
    }

    Err(anyhow!(
        "No model file found in directory: {}",
        dir.display()
    ))
}

/// Find the first JSON file in a directory, in sorted order
fn find_json_in_dir(dir: &Path) -> Option<PathBuf> {
    let pattern = dir.join("*.json");
    let mut found: Vec<PathBuf> = glob::glob(pattern.to_str()?)
        .ok()?
        .filter_map(|r| r.ok())
        .filter(|p| p.is_file())
        .collect();
    found.sort();
    found.into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ModelFormat::from_extension("json"), Some(ModelFormat::Json));
        assert_eq!(ModelFormat::from_extension("yml"), Some(ModelFormat::Yaml));
        assert_eq!(ModelFormat::from_extension("pkl"), None);
    }

    #[test]
    fn test_missing_path() {
        let err = detect_model_source("/definitely/not/here.json").unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_directory_prefers_well_known_name() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.json"), "{}").unwrap();
        std::fs::write(dir.path().join("model.yaml"), "").unwrap();

        let source = detect_model_source(dir.path()).unwrap();
        assert_eq!(source.format, ModelFormat::Yaml);
        assert!(source.path.ends_with("model.yaml"));
    }

    #[test]
    fn test_directory_falls_back_to_any_json() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("salary.json"), "{}").unwrap();

        let source = detect_model_source(dir.path()).unwrap();
        assert_eq!(source.format, ModelFormat::Json);
        assert!(source.path.ends_with("salary.json"));
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let pickle = dir.path().join("model.pkl");
        std::fs::write(&pickle, b"\x80\x04").unwrap();

        let err = detect_model_source(&pickle).unwrap_err();
        assert!(err.to_string().contains(".pkl"));
    }
}
