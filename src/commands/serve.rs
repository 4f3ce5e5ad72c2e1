//! HTTP server command implementation.
//!
//! Loads the catalog and serves the product API.

use anyhow::Result;
use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use crate::config::Config;
use crate::web::{AppState, WebServer};

/// Run the serve command
///
/// # Arguments
///
/// * `port` - Overrides `[server] port` from the config
/// * `catalog` - Overrides `[catalog] seed_path` from the config
pub async fn run(port: Option<u16>, catalog: Option<PathBuf>) -> Result<()> {
    let root = env::current_dir()?;
    let mut config = Config::load(&root)?;

    if let Some(port) = port {
        config.server.port = port;
    }

    let search = Arc::new(super::build_search(&config, &root, catalog)?);
    let records = search.store().total_records().await?;
    if records == 0 {
        println!("Warning: the catalog is empty. Every search will return no products.\n");
    }
    info!(records = records, "Catalog ready");

    let state = AppState::new(search, config);
    WebServer::new(state).start().await
}
