//! salaryd - Salary prediction server
//!
//! salaryd serves a single-page form over a pre-trained linear regression
//! model. A user enters years of experience or uploads a CSV, and gets
//! predicted salaries back with chart descriptions for the page to draw.
//!
//! # Architecture
//!
//! - **loader**: reads the model document once at startup, failing fast
//! - **engine**: single-input and batch prediction over a shared model
//! - **table**: CSV upload parsing, validation and export
//! - **chart**: declarative line and bar chart descriptions
//! - **server**: the form page and JSON API
//!
//! Training is out of scope: the model file comes from an external step.
//!
//! # Example
//!
//! ```bash
//! # Start the form at http://localhost:8080
//! salaryd serve --model linear_regression_model.json
//!
//! # One-off prediction
//! salaryd predict 5.0
//!
//! # Predict a whole file
//! salaryd batch salaries.csv --output predicted_salaries.csv
//! ```

pub mod chart;
pub mod cli;
pub mod config;
pub mod engine;
pub mod loader;
pub mod model;
pub mod server;
pub mod table;

// Re-export key types
pub use config::{BatchConfig, FormConfig, SalarydConfig, ServerConfig};
pub use engine::{BatchPrediction, PredictError, Predictor, SinglePrediction};
pub use loader::{load_model, LoadedModel, ModelFormat, ModelSource};
pub use model::{LinearModel, Regressor};
pub use table::{Table, UploadError};
