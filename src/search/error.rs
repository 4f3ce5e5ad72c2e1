//! Errors surfaced by catalog search.

use thiserror::Error;

use crate::catalog::StoreError;

/// Errors during a search or suggestion request.
#[derive(Error, Debug)]
pub enum SearchError {
    /// The record store failed; the whole request is aborted.
    #[error("Record store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),

    /// Malformed pagination or filter values.
    #[error("Invalid query: {0}")]
    InvalidQuery(String),
}

impl SearchError {
    /// Whether the caller, rather than the service, is at fault.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidQuery(_))
    }
}
