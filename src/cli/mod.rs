//! CLI commands
//!
//! `serve` runs the web form; `predict`, `batch` and `info` use the same
//! model and settings from the terminal.

mod batch;
mod info;
mod predict;
mod serve;

pub use batch::batch;
pub use info::info;
pub use predict::predict;
pub use serve::serve;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use crate::config::SalarydConfig;

/// salaryd - Salary prediction from years of experience
#[derive(Parser)]
#[command(name = "salaryd")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every command that loads the model
#[derive(Args, Debug, Clone, Default)]
pub struct ModelArgs {
    /// Configuration file (YAML or JSON)
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Model file or directory (overrides config and SALARYD_MODEL)
    #[arg(long, short)]
    pub model: Option<PathBuf>,
}

impl ModelArgs {
    /// Load the configuration file if one was given
    pub fn load_config(&self) -> Result<SalarydConfig> {
        match &self.config {
            Some(path) => {
                tracing::debug!("Loading config: {}", path.display());
                SalarydConfig::from_file(path)
            }
            None => Ok(SalarydConfig::default()),
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the prediction web form
    Serve {
        #[command(flatten)]
        args: ModelArgs,

        /// Port to listen on (overrides config)
        #[arg(long)]
        port: Option<u16>,

        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,
    },

    /// Predict the salary for one value
    Predict {
        /// Years of experience
        #[arg(allow_hyphen_values = true)]
        years: f64,

        #[command(flatten)]
        args: ModelArgs,
    },

    /// Predict every row of a CSV file
    Batch {
        /// Input CSV with a YearsExperience column
        input: PathBuf,

        /// Output CSV (default: stdout)
        #[arg(long, short)]
        output: Option<PathBuf>,

        #[command(flatten)]
        args: ModelArgs,
    },

    /// Show model information
    Info {
        #[command(flatten)]
        args: ModelArgs,
    },
}
