use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

use catalog_search::catalog::Product;
use catalog_search::commands::build_search;
use catalog_search::web::AppState;
use catalog_search::{Config, HybridSearch};

/// Seed catalog shipped with the crate
pub fn seed_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("data/products.json")
}

/// A project directory with a saved config pointing at a catalog seed.
pub struct TestCatalog {
    pub temp_dir: TempDir,
    pub config: Config,
    pub search: Arc<HybridSearch>,
}

impl TestCatalog {
    /// Project using the shipped seed catalog
    pub fn seeded() -> Result<Self> {
        Self::with_seed(seed_path())
    }

    /// Project using a custom product list written into the temp dir
    pub fn with_products(products: &[Product]) -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let seed = temp_dir.path().join("products.json");
        std::fs::write(&seed, serde_json::to_string_pretty(products)?)?;
        Self::build(temp_dir, seed)
    }

    fn with_seed(seed: PathBuf) -> Result<Self> {
        Self::build(TempDir::new()?, seed)
    }

    fn build(temp_dir: TempDir, seed: PathBuf) -> Result<Self> {
        let mut config = Config::default();
        config.catalog.seed_path = seed;
        config.save(temp_dir.path())?;

        let config = Config::load(temp_dir.path())?;
        let search = Arc::new(build_search(&config, temp_dir.path(), None)?);

        Ok(Self {
            temp_dir,
            config,
            search,
        })
    }

    pub fn state(&self) -> AppState {
        AppState::new(Arc::clone(&self.search), self.config.clone())
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }
}
