//! Product catalog storage consumed by the search core.
//!
//! This module contains:
//! - `record` - The `Product` record type
//! - `filter` - Structured filter predicates and sort orders
//! - `store` - The async `RecordStore` trait and its error type
//! - `text_index` - Tantivy keyword index over product text fields
//! - `memory` - In-memory `RecordStore` implementation

pub mod filter;
pub mod memory;
pub mod record;
pub mod store;
mod text_index;

pub use filter::{ProductFilter, Sort, SortKey, SortOrder};
pub use memory::InMemoryStore;
pub use record::Product;
pub use store::{FilterOptions, FindOptions, NumericStats, RecordStore, StoreError};
