//! Batch prediction command

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};

use super::ModelArgs;
use crate::engine::Predictor;
use crate::loader;

/// Predict every row of a CSV file and write the augmented table
pub async fn batch(input: PathBuf, output: Option<PathBuf>, args: ModelArgs) -> Result<()> {
    let config = args.load_config()?;
    let loaded = loader::load_model(config.model_path(args.model.clone()))?;
    let predictor = Predictor::new(Arc::new(loaded.model), config.form, config.batch)?;

    let bytes = std::fs::read(&input)
        .with_context(|| format!("cannot read {}", input.display()))?;
    let result = predictor
        .predict_upload(&bytes)
        .with_context(|| format!("cannot predict {}", input.display()))?;
    let csv = result.table.to_csv()?;

    match output {
        Some(path) => {
            std::fs::write(&path, csv)
                .with_context(|| format!("cannot write {}", path.display()))?;
            eprintln!(
                "Wrote {} predictions to {}",
                result.row_count(),
                path.display()
            );
        }
        None => print!("{}", csv),
    }

    Ok(())
}
