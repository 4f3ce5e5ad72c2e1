//! Application state for the web server.

use std::sync::Arc;

use crate::config::Config;
use crate::search::HybridSearch;

/// Shared application state for the web server.
///
/// Cloned for each request handler; the search engine behind the `Arc` is
/// shared.
#[derive(Clone)]
pub struct AppState {
    /// Hybrid search over the loaded catalog
    pub search: Arc<HybridSearch>,
    /// Configuration
    pub config: Config,
}

impl AppState {
    /// Create a new application state.
    pub fn new(search: Arc<HybridSearch>, config: Config) -> Self {
        Self { search, config }
    }
}
