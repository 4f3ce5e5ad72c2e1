//! Prometheus metrics for catalog search
//!
//! This module provides observability through Prometheus-compatible metrics
//! for product search and autocomplete suggestions.

use lazy_static::lazy_static;
use prometheus::{Counter, Encoder, Histogram, HistogramOpts, Opts, Registry, TextEncoder};
use std::sync::Once;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    // ============================================================================
    // Search metrics
    // ============================================================================

    /// Total number of search requests
    pub static ref SEARCH_REQUESTS: Counter = Counter::with_opts(
        Opts::new(
            "catalog_search_requests_total",
            "Total number of product search requests"
        )
    ).expect("Failed to create SEARCH_REQUESTS counter");

    /// Search request latency in seconds
    pub static ref SEARCH_LATENCY: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "catalog_search_latency_seconds",
            "Product search latency in seconds"
        ).buckets(vec![0.001, 0.005, 0.01, 0.05, 0.1, 0.25, 0.5, 1.0])
    ).expect("Failed to create SEARCH_LATENCY histogram");

    /// Number of products returned per page
    pub static ref SEARCH_RESULTS: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "catalog_search_results_count",
            "Number of products returned per search page"
        ).buckets(vec![0.0, 1.0, 5.0, 12.0, 24.0, 50.0, 100.0])
    ).expect("Failed to create SEARCH_RESULTS histogram");

    // ============================================================================
    // Fuzzy fallback metrics
    // ============================================================================

    /// Number of searches where the text index under-filled the page
    pub static ref FUZZY_FALLBACKS: Counter = Counter::with_opts(
        Opts::new(
            "catalog_search_fuzzy_fallbacks_total",
            "Searches that fell back to the fuzzy scan"
        )
    ).expect("Failed to create FUZZY_FALLBACKS counter");

    /// Records scored per fuzzy scan
    pub static ref FUZZY_CANDIDATES_SCANNED: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "catalog_search_fuzzy_candidates_scanned",
            "Records scored per fuzzy fallback scan"
        ).buckets(vec![10.0, 100.0, 1000.0, 5000.0, 10000.0, 50000.0])
    ).expect("Failed to create FUZZY_CANDIDATES_SCANNED histogram");

    // ============================================================================
    // Suggestion metrics
    // ============================================================================

    /// Total autocomplete suggestion requests
    pub static ref SUGGESTION_REQUESTS: Counter = Counter::with_opts(
        Opts::new(
            "catalog_search_suggestion_requests_total",
            "Total autocomplete suggestion requests"
        )
    ).expect("Failed to create SUGGESTION_REQUESTS counter");
}

static REGISTER: Once = Once::new();

/// Register all metrics with the global registry
///
/// Safe to call more than once; only the first call registers.
/// Panics if metrics registration fails.
pub fn register_metrics() {
    REGISTER.call_once(|| {
        REGISTRY
            .register(Box::new(SEARCH_REQUESTS.clone()))
            .expect("Failed to register SEARCH_REQUESTS");
        REGISTRY
            .register(Box::new(SEARCH_LATENCY.clone()))
            .expect("Failed to register SEARCH_LATENCY");
        REGISTRY
            .register(Box::new(SEARCH_RESULTS.clone()))
            .expect("Failed to register SEARCH_RESULTS");
        REGISTRY
            .register(Box::new(FUZZY_FALLBACKS.clone()))
            .expect("Failed to register FUZZY_FALLBACKS");
        REGISTRY
            .register(Box::new(FUZZY_CANDIDATES_SCANNED.clone()))
            .expect("Failed to register FUZZY_CANDIDATES_SCANNED");
        REGISTRY
            .register(Box::new(SUGGESTION_REQUESTS.clone()))
            .expect("Failed to register SUGGESTION_REQUESTS");
    });
}

/// Gather all metrics and encode them in Prometheus text format
///
/// Returns an empty string if encoding fails.
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();

    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!("Failed to encode metrics: {}", e);
        return String::new();
    }

    String::from_utf8(buffer).unwrap_or_else(|e| {
        tracing::error!("Metrics contained invalid UTF-8: {}", e);
        String::new()
    })
}
