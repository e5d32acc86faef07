//! Model info command

use anyhow::Result;

use super::ModelArgs;
use crate::loader;

/// Show model information
pub async fn info(args: ModelArgs) -> Result<()> {
    let config = args.load_config()?;
    let loaded = loader::load_model(config.model_path(args.model.clone()))?;
    let model = &loaded.model;

    println!("Model: {}\n", loaded.source.path.display());
    println!("Format: {}", loaded.source.format.name());
    println!("Type: {}", model.model_type);
    println!("Intercept: {}", model.intercept);

    let names = model.feature_names.clone().unwrap_or_default();
    for (i, coef) in model.coefficients.iter().enumerate() {
        match names.get(i) {
            Some(name) => println!("Coefficient [{}]: {}", name, coef),
            None => println!("Coefficient {}: {}", i, coef),
        }
    }

    if let Some(target) = &model.target_name {
        println!("Target: {}", target);
    }
    if let Some(trained_at) = &model.trained_at {
        println!("Trained at: {}", trained_at);
    }

    let form = &config.form;
    println!(
        "\nForm input: {}..={} step {} (default {})",
        form.min, form.max, form.step, form.default
    );

    Ok(())
}
