//! HTTP server for the prediction form
//!
//! Serves the single-page form and a small JSON API.

mod handlers;
mod page;
mod routes;

use std::sync::Arc;

use anyhow::Result;
use axum::extract::DefaultBodyLimit;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

pub use handlers::AppState;
pub use routes::api_routes;

/// Build the application router with the configured layers
pub fn router(state: Arc<AppState>, config: &ServerConfig) -> Router {
    let mut app = Router::new()
        .merge(api_routes())
        .layer(DefaultBodyLimit::max(config.max_body_size));

    if config.cors_enabled {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        app = app.layer(cors);
    }

    if config.request_logging {
        app = app.layer(TraceLayer::new_for_http());
    }

    app.with_state(state)
}

/// Start the HTTP server
pub async fn start(state: Arc<AppState>, config: ServerConfig) -> Result<()> {
    let app = router(state, &config);

    let addr = config.addr();
    let listener = TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("Endpoints:");
    tracing::info!("  GET  / - Prediction form");
    tracing::info!("  GET  /health - Health check");
    tracing::info!("  GET  /v1/model - Model summary");
    tracing::info!("  POST /v1/predict - Single-input prediction");
    tracing::info!("  POST /v1/predict/batch - Batch prediction (multipart CSV)");
    tracing::info!("  POST /v1/predict/batch/csv - Batch prediction as CSV download");

    axum::serve(listener, app).await?;

    Ok(())
}
