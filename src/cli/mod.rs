use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "catalog-search")]
#[command(author, version, about = "Fuzzy product search and ranking for a shop catalog")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a default configuration in the current directory
    Init {
        /// Overwrite an existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Start the HTTP product API
    Serve {
        /// Port to listen on (overrides the configured port)
        #[arg(short, long)]
        port: Option<u16>,

        /// Catalog seed file (overrides the configured seed path)
        #[arg(short, long)]
        catalog: Option<PathBuf>,
    },

    /// Search the catalog and print one ranked page
    Search(SearchArgs),

    /// Print autocomplete suggestions for a partial term
    Suggest {
        /// Partial search term
        term: String,

        /// Maximum number of suggestions
        #[arg(short, long)]
        limit: Option<usize>,

        /// Catalog seed file (overrides the configured seed path)
        #[arg(short, long)]
        catalog: Option<PathBuf>,
    },
}

/// Arguments for the `search` subcommand.
#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    /// Search term
    pub term: String,

    /// 1-based page number
    #[arg(long, default_value = "1")]
    pub page: usize,

    /// Products per page
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Minimum per-word similarity for fuzzy matching
    #[arg(short, long)]
    pub threshold: Option<f32>,

    #[arg(long)]
    pub brand: Option<String>,

    #[arg(long)]
    pub category: Option<String>,

    #[arg(long)]
    pub min_price: Option<f64>,

    #[arg(long)]
    pub max_price: Option<f64>,

    #[arg(long)]
    pub min_rating: Option<f64>,

    #[arg(long)]
    pub min_views: Option<u64>,

    /// Only products on sale
    #[arg(long)]
    pub on_sale: bool,

    /// Only featured products
    #[arg(long)]
    pub featured: bool,

    /// createdAt, price, rating, views, name or reviewCount
    #[arg(long, default_value = "createdAt")]
    pub sort_by: String,

    /// asc or desc
    #[arg(long, default_value = "desc")]
    pub sort_order: String,

    /// Catalog seed file (overrides the configured seed path)
    #[arg(short, long)]
    pub catalog: Option<PathBuf>,
}
