use anyhow::Result;
use std::env;
use std::path::PathBuf;

use crate::Config;

/// Run the suggest command, printing one suggestion per line
pub async fn run(term: &str, limit: Option<usize>, catalog: Option<PathBuf>) -> Result<()> {
    let root = env::current_dir()?;
    let config = Config::load(&root)?;

    let search = super::build_search(&config, &root, catalog)?;
    let limit = limit.unwrap_or(config.search.suggestion_limit);
    let found = search
        .suggest(term, config.search.suggestion_window, limit)
        .await?;

    if found.is_empty() {
        println!("No suggestions for: {}", term);
        return Ok(());
    }

    for suggestion in found {
        println!("{}", suggestion);
    }

    Ok(())
}
