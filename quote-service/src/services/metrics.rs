//! Metrics collection and Prometheus export.

use metrics::counter;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;

/// Global handle to the Prometheus recorder.
static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Where a served daily quote came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteSource {
    /// Already stored for today.
    Cached,
    /// Freshly generated and stored.
    Ai,
    /// Predefined, stored as today's quote.
    Predefined,
    /// Predefined, served without persistence.
    Fallback,
}

impl QuoteSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuoteSource::Cached => "cached",
            QuoteSource::Ai => "ai",
            QuoteSource::Predefined => "predefined",
            QuoteSource::Fallback => "fallback",
        }
    }
}

/// Install the Prometheus recorder. Call once at startup.
pub fn init_metrics() {
    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            if METRICS_HANDLE.set(handle).is_err() {
                tracing::warn!("Metrics recorder already initialized");
            }
        }
        Err(e) => tracing::error!("Failed to install Prometheus recorder: {}", e),
    }
}

/// Current metrics in Prometheus text format.
pub fn get_metrics() -> String {
    METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized".to_string())
}

pub fn record_quote_served(source: QuoteSource) {
    counter!("quotes_served_total", "source" => source.as_str()).increment(1);
}

pub fn record_ai_generation(success: bool) {
    let outcome = if success { "success" } else { "failure" };
    counter!("ai_generation_total", "outcome" => outcome).increment(1);
}
