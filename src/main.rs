//! Jamie CLI entry point.

use anyhow::Result;
use clap::Parser;
use jamie::cli::{commands, Cli, Commands};
use jamie::config::Settings;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let settings = match &cli.config {
        Some(path) => Settings::load_from(Some(&std::path::PathBuf::from(path)))?,
        None => Settings::load()?,
    };

    // Initialize logging
    let log_level = cli.log_level(&settings).to_string();

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("jamie={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();

    // Execute command
    match &cli.command {
        Commands::Build {
            corpus,
            output_dir,
            model,
            provider,
        } => {
            commands::run_build(corpus, output_dir.clone(), model.clone(), *provider, settings)
                .await?;
        }

        Commands::Inspect { corpus } => {
            commands::run_inspect(corpus, settings).await?;
        }

        Commands::Verify { output_dir } => {
            commands::run_verify(output_dir.clone(), settings)?;
        }

        Commands::Config { action } => {
            commands::run_config(action, settings)?;
        }
    }

    Ok(())
}
