use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use salaryd::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "salaryd=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { args, port, host } => {
            salaryd::cli::serve(args, port, host).await?;
        }
        Commands::Predict { years, args } => {
            salaryd::cli::predict(years, args).await?;
        }
        Commands::Batch {
            input,
            output,
            args,
        } => {
            salaryd::cli::batch(input, output, args).await?;
        }
        Commands::Info { args } => {
            salaryd::cli::info(args).await?;
        }
    }

    Ok(())
}
