pub mod init;
pub mod search;
pub mod serve;
pub mod suggest;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

use crate::catalog::{InMemoryStore, RecordStore};
use crate::search::HybridSearch;
use crate::Config;

/// Load the catalog seed and build a hybrid search tuned from `config`.
///
/// `catalog` overrides the configured seed path when given.
pub fn build_search(
    config: &Config,
    root: &Path,
    catalog: Option<PathBuf>,
) -> Result<HybridSearch> {
    let seed = catalog.unwrap_or_else(|| config.seed_path(root));
    let store = InMemoryStore::from_seed_file(&seed)
        .with_context(|| format!("Failed to load catalog from {}", seed.display()))?;
    let store: Arc<dyn RecordStore> = Arc::new(store);

    info!(seed = %seed.display(), "Catalog loaded");

    Ok(HybridSearch::new(store)
        .with_primary_overfetch(config.search.primary_overfetch)
        .with_max_scan_candidates(config.search.max_scan_candidates)
        .with_max_page_size(config.search.max_page_size)
        .with_deep_paging(config.search.deep_paging))
}
