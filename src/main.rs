use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use catalog_search::cli::{Cli, Commands};
use catalog_search::config::Config;
use catalog_search::logging::{init_early_logging, init_logging};
use catalog_search::metrics;

#[tokio::main]
async fn main() -> Result<()> {
    let project_root = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let config = match Config::load(&project_root) {
        Ok(config) => config,
        Err(e) => {
            init_early_logging();
            return Err(e);
        }
    };

    // The guard MUST be held until program exit to ensure logs are flushed
    let _logging_guard = init_logging(&config.logging, &project_root)?;

    tracing::debug!("Loaded configuration from: {}", project_root.display());

    metrics::register_metrics();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init { force } => {
            catalog_search::commands::init::run(force).await?;
        }
        Commands::Serve { port, catalog } => {
            catalog_search::commands::serve::run(port, catalog).await?;
        }
        Commands::Search(args) => {
            catalog_search::commands::search::run(args).await?;
        }
        Commands::Suggest {
            term,
            limit,
            catalog,
        } => {
            catalog_search::commands::suggest::run(&term, limit, catalog).await?;
        }
    }

    Ok(())
}
