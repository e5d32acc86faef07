//! Single prediction command

use std::sync::Arc;

use anyhow::Result;

use super::ModelArgs;
use crate::engine::Predictor;
use crate::loader;

/// Predict one value and print the formatted result
pub async fn predict(years: f64, args: ModelArgs) -> Result<()> {
    let config = args.load_config()?;
    let loaded = loader::load_model(config.model_path(args.model.clone()))?;

    let predictor = Predictor::new(Arc::new(loaded.model), config.form, config.batch)?;
    let result = predictor.predict_single(years)?;

    println!("{}", result.message);
    Ok(())
}
