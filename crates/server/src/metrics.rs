//! Metrics registry wiring.

use once_cell::sync::Lazy;
use prometheus::{Encoder, Registry, TextEncoder};

/// Process-wide registry holding the core pipeline metrics.
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    for metric in maglens_core::metrics::all_metrics() {
        registry
            .register(metric)
            .expect("Failed to register metric");
    }
    registry
});

/// Render the registry in Prometheus text exposition format.
pub fn render() -> String {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    if encoder.encode(&REGISTRY.gather(), &mut buffer).is_err() {
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}
