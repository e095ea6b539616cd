//! Prometheus metrics for the search pipeline.

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounterVec, Opts};

/// Searches executed, by result.
pub static SEARCHES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("maglens_searches_total", "Total searches executed"),
        &["result"], // "ok", "error", "superseded"
    )
    .unwrap()
});

/// Index search duration in seconds.
pub static SEARCH_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "maglens_search_duration_seconds",
            "Duration of index search calls",
        )
        .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        &[],
    )
    .unwrap()
});

/// Results kept per page after re-filtering.
pub static SEARCH_RESULTS: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "maglens_search_results",
            "Number of results kept per page after re-filtering",
        )
        .buckets(vec![0.0, 1.0, 5.0, 10.0, 25.0, 50.0]),
        &[],
    )
    .unwrap()
});

/// File listing resolutions, by tier.
pub static FILE_RESOLUTIONS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "maglens_file_resolutions_total",
            "Total file listing resolutions",
        ),
        &["tier"], // "indexed", "peer_network", "unavailable"
    )
    .unwrap()
});

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(SEARCHES_TOTAL.clone()),
        Box::new(SEARCH_DURATION.clone()),
        Box::new(SEARCH_RESULTS.clone()),
        Box::new(FILE_RESOLUTIONS.clone()),
    ]
}
