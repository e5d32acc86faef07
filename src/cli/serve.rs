//! HTTP server command

use std::sync::Arc;

use anyhow::{Context, Result};

use super::ModelArgs;
use crate::loader;
use crate::server::{self, AppState};

/// Start the prediction server
pub async fn serve(args: ModelArgs, port: Option<u16>, host: Option<String>) -> Result<()> {
    let config = args.load_config()?;

    let mut server_config = config.server.clone();
    if let Some(port) = port {
        server_config.port = port;
    }
    if let Some(host) = host {
        server_config.host = host;
    }

    // The server never starts without a usable model
    let model_path = config.model_path(args.model.clone());
    tracing::info!("Loading model: {}", model_path.display());
    let loaded = loader::load_model(&model_path)?;
    tracing::info!(
        "Model loaded successfully ({} format, intercept {}, coefficients {:?})",
        loaded.source.format.name(),
        loaded.model.intercept,
        loaded.model.coefficients
    );

    let state = AppState::new(
        loaded,
        config.form.clone(),
        config.batch.clone(),
        server_config.max_body_size,
    )
    .context("model cannot serve predictions")?;

    tracing::info!("Starting server at http://{}", server_config.addr());
    server::start(Arc::new(state), server_config).await?;

    Ok(())
}
