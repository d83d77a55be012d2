//! Prometheus metrics for observability.
//!
//! This module provides metrics for monitoring the steam-games server:
//! - HTTP request metrics (latency, counts, in flight)
//! - MCP tool call metrics
//! - Catalog cache age (collected dynamically)
//!
//! Core metrics (catalog refreshes, store fetches, upstream latency) are
//! registered into the same registry.

use once_cell::sync::Lazy;
use prometheus::{
    self, Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder,
};

/// Global metrics registry.
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    register_metrics(&registry);
    registry
});

// =============================================================================
// HTTP Request Metrics
// =============================================================================

/// HTTP request duration in seconds.
pub static HTTP_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "steamgames_http_request_duration_seconds",
            "HTTP request duration in seconds",
        )
        .buckets(vec![
            0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
        ]),
        &["method", "path", "status"],
    )
    .unwrap()
});

/// HTTP requests total count.
pub static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("steamgames_http_requests_total", "Total HTTP requests"),
        &["method", "path", "status"],
    )
    .unwrap()
});

/// HTTP requests currently in flight.
pub static HTTP_REQUESTS_IN_FLIGHT: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "steamgames_http_requests_in_flight",
        "Number of HTTP requests currently being processed",
    )
    .unwrap()
});

// =============================================================================
// Tool Metrics
// =============================================================================

/// MCP tool calls by tool and outcome.
pub static TOOL_CALLS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("steamgames_tool_calls_total", "Total MCP tool calls"),
        &["tool", "result"], // result: "ok", "error"
    )
    .unwrap()
});

/// MCP tool call duration in seconds.
pub static TOOL_CALL_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "steamgames_tool_call_duration_seconds",
            "MCP tool call duration in seconds",
        )
        .buckets(vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0]),
        &["tool"],
    )
    .unwrap()
});

// =============================================================================
// Catalog Metrics
// =============================================================================

/// Age of the catalog snapshot in seconds (-1 when not loaded).
pub static CATALOG_AGE_SECONDS: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "steamgames_catalog_age_seconds",
        "Age of the cached app catalog in seconds, -1 if not loaded",
    )
    .unwrap()
});

// =============================================================================
// Registration
// =============================================================================

fn register_metrics(registry: &Registry) {
    // HTTP
    registry
        .register(Box::new(HTTP_REQUEST_DURATION.clone()))
        .unwrap();
    registry
        .register(Box::new(HTTP_REQUESTS_TOTAL.clone()))
        .unwrap();
    registry
        .register(Box::new(HTTP_REQUESTS_IN_FLIGHT.clone()))
        .unwrap();

    // Tools
    registry
        .register(Box::new(TOOL_CALLS_TOTAL.clone()))
        .unwrap();
    registry
        .register(Box::new(TOOL_CALL_DURATION.clone()))
        .unwrap();

    // Catalog
    registry
        .register(Box::new(CATALOG_AGE_SECONDS.clone()))
        .unwrap();

    // Core metrics (catalog cache, store fetcher, upstream calls)
    for metric in steamgames_core::metrics::all_metrics() {
        registry.register(metric).unwrap();
    }
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::warn!(error = %e, "Failed to encode metrics");
    }
    String::from_utf8(buffer).unwrap_or_default()
}

/// Collect dynamic metrics from current application state.
///
/// Called before encoding so gauges reflect the cache as it is now.
pub fn collect_dynamic_metrics(state: &crate::state::AppState) {
    let status = state.cache().cache_status();
    CATALOG_AGE_SECONDS.set(status.age_secs.map(|a| a as i64).unwrap_or(-1));
}
