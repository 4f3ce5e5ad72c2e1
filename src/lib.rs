pub mod catalog;
pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
pub mod metrics;
pub mod search;
pub mod web;

pub use catalog::{InMemoryStore, Product, ProductFilter, RecordStore};
pub use config::Config;
pub use search::{HybridSearch, Query, ResultPage, SearchError};
