//! Prometheus metrics for facetest-service.
//!
//! HTTP-level series come from the `metrics` recorder fed by
//! `service_core::middleware::metrics_middleware`; analysis outcomes live in
//! a dedicated registry. Both are rendered together on `/metrics`.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use prometheus::{Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder};
use std::sync::OnceLock;

pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();
pub static REGISTRY: OnceLock<Registry> = OnceLock::new();

pub static ANALYSES_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();
pub static FALLBACKS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();
pub static PROVIDER_LATENCY_SECONDS: OnceLock<HistogramVec> = OnceLock::new();

/// Initialize all metrics. Call once at startup.
pub fn init_metrics() -> anyhow::Result<()> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("failed to install Prometheus recorder: {}", e))?;

    let registry = Registry::new();

    // outcome: model, fallback, no_face
    let analyses = IntCounterVec::new(
        Opts::new("facetest_analyses_total", "Face analyses served by outcome"),
        &["test", "outcome"],
    )?;

    // Fallbacks hide upstream failures from clients; this is where they show.
    let fallbacks = IntCounterVec::new(
        Opts::new(
            "facetest_fallbacks_total",
            "Fabricated results served, by failure reason",
        ),
        &["test", "reason"],
    )?;

    let provider_latency = HistogramVec::new(
        HistogramOpts::new(
            "facetest_provider_latency_seconds",
            "Latency of model calls in seconds",
        )
        .buckets(vec![0.25, 0.5, 1.0, 2.0, 4.0, 8.0, 15.0, 30.0, 60.0, 120.0]),
        &["test"],
    )?;

    registry.register(Box::new(analyses.clone()))?;
    registry.register(Box::new(fallbacks.clone()))?;
    registry.register(Box::new(provider_latency.clone()))?;

    if METRICS_HANDLE.set(handle).is_err()
        || REGISTRY.set(registry).is_err()
        || ANALYSES_TOTAL.set(analyses).is_err()
        || FALLBACKS_TOTAL.set(fallbacks).is_err()
        || PROVIDER_LATENCY_SECONDS.set(provider_latency).is_err()
    {
        anyhow::bail!("metrics already initialized");
    }

    Ok(())
}

/// Render both the recorder and the custom registry in text format.
pub fn get_metrics() -> String {
    let mut output = METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized\n".to_string());

    if let Some(registry) = REGISTRY.get() {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        if encoder.encode(&registry.gather(), &mut buffer).is_ok() {
            if let Ok(custom_metrics) = String::from_utf8(buffer) {
                output.push_str(&custom_metrics);
            }
        }
    }

    output
}

pub fn record_analysis(test: &str, outcome: &str) {
    if let Some(counter) = ANALYSES_TOTAL.get() {
        counter.with_label_values(&[test, outcome]).inc();
    }
}

pub fn record_fallback(test: &str, reason: &str) {
    if let Some(counter) = FALLBACKS_TOTAL.get() {
        counter.with_label_values(&[test, reason]).inc();
    }
}

pub fn observe_provider_latency(test: &str, seconds: f64) {
    if let Some(histogram) = PROVIDER_LATENCY_SECONDS.get() {
        histogram.with_label_values(&[test]).observe(seconds);
    }
}
