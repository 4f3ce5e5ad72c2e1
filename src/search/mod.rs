//! Search module providing fuzzy scoring, suggestions and hybrid search.
//!
//! This module contains:
//! - `similarity` - Edit-distance similarity between strings
//! - `fuzzy` - Word-level fuzzy matching of a phrase against text
//! - `suggest` - Autocomplete suggestions by substring containment
//! - `traits` - Common `CandidateSearch` trait for search strategies
//! - `primary` - Text-index candidate search
//! - `fallback` - Fuzzy full-scan candidate search
//! - `hybrid` - Orchestrator merging both strategies into ranked pages

pub mod error;
pub mod fallback;
pub mod fuzzy;
pub mod hybrid;
pub mod primary;
pub mod query;
pub mod similarity;
pub mod suggest;
pub mod traits;

// Re-export commonly used types
pub use error::SearchError;
pub use fallback::FullScanFuzzySearch;
pub use fuzzy::{fuzzy_match, product_relevance, DEFAULT_FUZZY_THRESHOLD};
pub use hybrid::{merge_ranked, HybridSearch};
pub use primary::PrimaryIndexSearch;
pub use query::{Query, ResultPage, DEFAULT_PAGE_SIZE};
pub use similarity::{levenshtein_distance, similarity};
pub use suggest::suggestions;
pub use traits::{CandidateSearch, ScoredRecord};
