use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::search::hybrid::{
    DEFAULT_MAX_PAGE_SIZE, DEFAULT_MAX_SCAN_CANDIDATES, DEFAULT_PRIMARY_OVERFETCH,
};
use crate::search::{DEFAULT_FUZZY_THRESHOLD, DEFAULT_PAGE_SIZE};

const CONFIG_DIR: &str = ".catalog-search";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub search: SearchConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// JSON file with the product list, relative to the project root
    #[serde(default = "default_seed_path")]
    pub seed_path: PathBuf,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            seed_path: default_seed_path(),
        }
    }
}

fn default_seed_path() -> PathBuf {
    PathBuf::from("data/products.json")
}

/// Search configuration for hybrid search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Default number of products per page
    #[serde(default = "default_search_limit")]
    pub default_limit: usize,

    /// Largest page size a request may ask for
    #[serde(default = "default_max_page_size")]
    pub max_page_size: usize,

    /// Default minimum per-word similarity for fuzzy matching
    #[serde(default = "default_fuzzy_threshold")]
    pub fuzzy_threshold: f32,

    /// Text-index fetch size as a multiple of the page size
    #[serde(default = "default_primary_overfetch")]
    pub primary_overfetch: usize,

    /// Grow the text-index window with the page number so fast-path pages
    /// past `primary_overfetch` pages are not empty
    #[serde(default)]
    pub deep_paging: bool,

    /// Upper bound on records scored by the fuzzy fallback scan
    #[serde(default = "default_max_scan_candidates")]
    pub max_scan_candidates: usize,

    /// Number of records scanned for autocomplete suggestions
    #[serde(default = "default_suggestion_window")]
    pub suggestion_window: usize,

    /// Maximum suggestions returned
    #[serde(default = "default_suggestion_limit")]
    pub suggestion_limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_limit: default_search_limit(),
            max_page_size: default_max_page_size(),
            fuzzy_threshold: default_fuzzy_threshold(),
            primary_overfetch: default_primary_overfetch(),
            deep_paging: false,
            max_scan_candidates: default_max_scan_candidates(),
            suggestion_window: default_suggestion_window(),
            suggestion_limit: default_suggestion_limit(),
        }
    }
}

fn default_search_limit() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_max_page_size() -> usize {
    DEFAULT_MAX_PAGE_SIZE
}

fn default_fuzzy_threshold() -> f32 {
    DEFAULT_FUZZY_THRESHOLD
}

fn default_primary_overfetch() -> usize {
    DEFAULT_PRIMARY_OVERFETCH
}

fn default_max_scan_candidates() -> usize {
    DEFAULT_MAX_SCAN_CANDIDATES
}

fn default_suggestion_window() -> usize {
    1000
}

fn default_suggestion_limit() -> usize {
    8
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_http_host")]
    pub host: String,

    /// Port to bind to
    #[serde(default = "default_http_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_http_host(),
            port: default_http_port(),
        }
    }
}

fn default_http_host() -> String {
    "127.0.0.1".to_string()
}

fn default_http_port() -> u16 {
    8080
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Write logs to rolling files
    #[serde(default)]
    pub enabled: bool,

    /// Write logs to stderr
    #[serde(default = "default_true")]
    pub stderr: bool,

    /// File log level: trace, debug, info, warn or error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log directory, relative to the project root unless absolute
    #[serde(default = "default_log_directory")]
    pub directory: PathBuf,

    /// Log file name prefix
    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,

    /// Rotation: minutely, hourly, daily or never
    #[serde(default = "default_rotation")]
    pub rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            stderr: true,
            level: default_log_level(),
            directory: default_log_directory(),
            file_prefix: default_file_prefix(),
            rotation: default_rotation(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_directory() -> PathBuf {
    PathBuf::from(CONFIG_DIR).join("logs")
}

fn default_file_prefix() -> String {
    "catalog-search.log".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

impl Config {
    /// Load configuration from the .catalog-search directory
    pub fn load(root: &Path) -> Result<Self> {
        let config_path = root.join(CONFIG_DIR).join(CONFIG_FILE);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config from {:?}", config_path))?;

            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config from {:?}", config_path))
        } else {
            Ok(Config::default())
        }
    }

    /// Save configuration to the .catalog-search directory
    pub fn save(&self, root: &Path) -> Result<()> {
        let config_dir = root.join(CONFIG_DIR);
        let config_path = config_dir.join(CONFIG_FILE);

        std::fs::create_dir_all(&config_dir)
            .with_context(|| format!("Failed to create config directory {:?}", config_dir))?;

        let content =
            toml::to_string_pretty(self).with_context(|| "Failed to serialize config")?;

        std::fs::write(&config_path, content)
            .with_context(|| format!("Failed to write config to {:?}", config_path))?;

        Ok(())
    }

    /// Get the path to the .catalog-search directory
    pub fn config_dir(root: &Path) -> PathBuf {
        root.join(CONFIG_DIR)
    }

    /// Get the path to the catalog seed file
    pub fn seed_path(&self, root: &Path) -> PathBuf {
        if self.catalog.seed_path.is_absolute() {
            self.catalog.seed_path.clone()
        } else {
            root.join(&self.catalog.seed_path)
        }
    }

    /// Check if a config directory exists in the given directory
    pub fn is_initialized(root: &Path) -> bool {
        Self::config_dir(root).exists()
    }
}
