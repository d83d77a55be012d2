//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - App catalog cache (refreshes, size, searches)
//! - Store detail fetches
//! - Upstream Steam API calls

use once_cell::sync::Lazy;
use prometheus::{
    Histogram, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge, Opts,
};

// =============================================================================
// Catalog Cache Metrics
// =============================================================================

/// Catalog refresh attempts by result.
pub static CATALOG_REFRESHES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "steamgames_catalog_refreshes_total",
            "Total app catalog refresh attempts",
        ),
        &["result"], // "success", "failed"
    )
    .unwrap()
});

/// Entries in the current catalog snapshot.
pub static CATALOG_ENTRIES: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "steamgames_catalog_entries",
        "Number of apps in the cached catalog snapshot",
    )
    .unwrap()
});

/// App searches served.
pub static SEARCHES_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new("steamgames_searches_total", "Total app name searches").unwrap()
});

/// Results returned per search.
pub static SEARCH_RESULTS: Lazy<Histogram> = Lazy::new(|| {
    Histogram::with_opts(
        HistogramOpts::new(
            "steamgames_search_results",
            "Number of results returned per app search",
        )
        .buckets(vec![0.0, 1.0, 2.0, 5.0, 10.0, 25.0, 50.0]),
    )
    .unwrap()
});

// =============================================================================
// Store Metrics
// =============================================================================

/// Per-app detail fetches by result.
pub static DETAIL_FETCHES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "steamgames_detail_fetches_total",
            "Total per-app store detail fetches",
        ),
        &["result"], // "success", "rejected", "parse_error", "transport_error"
    )
    .unwrap()
});

// =============================================================================
// Upstream Metrics
// =============================================================================

/// Upstream request duration.
pub static UPSTREAM_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "steamgames_upstream_duration_seconds",
            "Duration of Steam API calls",
        )
        .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0]),
        &["service", "operation"],
    )
    .unwrap()
});

// =============================================================================
// Helper functions
// =============================================================================

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(CATALOG_REFRESHES.clone()),
        Box::new(CATALOG_ENTRIES.clone()),
        Box::new(SEARCHES_TOTAL.clone()),
        Box::new(SEARCH_RESULTS.clone()),
        Box::new(DETAIL_FETCHES.clone()),
        Box::new(UPSTREAM_DURATION.clone()),
    ]
}
