use anyhow::{bail, Result};
use std::env;
use tracing::info;

use crate::Config;

pub async fn run(force: bool) -> Result<()> {
    let root = env::current_dir()?;

    if Config::is_initialized(&root) && !force {
        bail!(
            "catalog-search is already initialized in {:?} (use --force to overwrite)",
            Config::config_dir(&root)
        );
    }

    let config = Config::default();
    config.save(&root)?;

    info!("Initialized catalog-search in {:?}", Config::config_dir(&root));
    println!(
        "✓ Created {} with default configuration",
        Config::config_dir(&root).display()
    );

    let seed = config.seed_path(&root);
    if !seed.exists() {
        println!("\nWarning: catalog seed {} does not exist yet", seed.display());
    }

    println!("\nNext steps:");
    println!("  1. Edit .catalog-search/config.toml to customize settings");
    println!("  2. Run 'catalog-search search <term>' to try a query");
    println!("  3. Run 'catalog-search serve' to start the HTTP API");

    Ok(())
}
