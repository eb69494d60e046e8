//! # Prometheus Metrics
//!
//! Operational metrics for the wallet service, scraped at `/metrics` on the
//! metrics port.
//!
//! Labels are the operation name and, for failures, the error kind. Nothing
//! derived from request content (addresses, keys) ever becomes a label.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use prometheus::{
    Encoder, HistogramOpts, HistogramTimer, HistogramVec, IntCounterVec, Opts, Registry,
    TextEncoder,
};
use std::sync::Arc;

/// Metric handles for the service.
#[derive(Clone)]
pub struct WalletMetrics {
    registry: Registry,
    /// Completed operations, by `op`.
    pub operations_total: IntCounterVec,
    /// Operations that returned an error, by `op` and `kind`.
    pub operation_failures_total: IntCounterVec,
    /// Wall-clock time spent in each operation, by `op`.
    pub operation_latency_seconds: HistogramVec,
}

impl WalletMetrics {
    /// Creates and registers all metrics. Call once at startup.
    pub fn new() -> Self {
        let registry = Registry::new_custom(Some("dlt_wallet".into()), None)
            .expect("failed to create prometheus registry");

        let operations_total = IntCounterVec::new(
            Opts::new("operations_total", "Total number of wallet operations served"),
            &["op"],
        )
        .expect("metric creation");
        registry
            .register(Box::new(operations_total.clone()))
            .expect("metric registration");

        let operation_failures_total = IntCounterVec::new(
            Opts::new(
                "operation_failures_total",
                "Total number of wallet operations that returned an error",
            ),
            &["op", "kind"],
        )
        .expect("metric creation");
        registry
            .register(Box::new(operation_failures_total.clone()))
            .expect("metric registration");

        // Derivation is PBKDF2-bound and lands in the tens of milliseconds;
        // signing and checksums are far below that.
        let operation_latency_seconds = HistogramVec::new(
            HistogramOpts::new(
                "operation_latency_seconds",
                "Wallet operation latency in seconds",
            )
            .buckets(vec![
                0.0001, 0.0005, 0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0,
            ]),
            &["op"],
        )
        .expect("metric creation");
        registry
            .register(Box::new(operation_latency_seconds.clone()))
            .expect("metric registration");

        Self {
            registry,
            operations_total,
            operation_failures_total,
            operation_latency_seconds,
        }
    }

    /// Start timing `op`. The observation is recorded when the timer drops.
    pub fn start_timer(&self, op: &str) -> HistogramTimer {
        self.operation_latency_seconds
            .with_label_values(&[op])
            .start_timer()
    }

    /// Count one completed operation.
    pub fn record(&self, op: &str) {
        self.operations_total.with_label_values(&[op]).inc();
    }

    /// Count one failed operation.
    pub fn record_failure(&self, op: &str, kind: &str) {
        self.operation_failures_total
            .with_label_values(&[op, kind])
            .inc();
    }

    /// Encodes all registered metrics into the Prometheus text exposition format.
    pub fn encode(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8(buffer).expect("prometheus output is valid utf-8"))
    }
}

impl Default for WalletMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared metrics state passed to axum handlers.
pub type SharedMetrics = Arc<WalletMetrics>;

/// Axum handler that renders `/metrics` in Prometheus text format.
pub async fn metrics_handler(
    axum::extract::State(metrics): axum::extract::State<SharedMetrics>,
) -> impl IntoResponse {
    match metrics.encode() {
        Ok(body) => (
            StatusCode::OK,
            [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!("failed to encode metrics: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "metrics encoding failed").into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_recorded_operations() {
        let metrics = WalletMetrics::new();
        metrics.record("derive_keys");
        metrics.record_failure("sign", "invalid_private_key_encoding");
        drop(metrics.start_timer("derive_keys"));

        let text = metrics.encode().unwrap();
        assert!(text.contains("dlt_wallet_operations_total{op=\"derive_keys\"} 1"));
        assert!(text.contains(
            "dlt_wallet_operation_failures_total{kind=\"invalid_private_key_encoding\",op=\"sign\"} 1"
        ));
        assert!(text.contains("dlt_wallet_operation_latency_seconds_count{op=\"derive_keys\"} 1"));
    }

    #[test]
    fn separate_instances_do_not_share_counts() {
        let a = WalletMetrics::new();
        let b = WalletMetrics::new();
        a.record("sign");
        assert_eq!(a.operations_total.with_label_values(&["sign"]).get(), 1);
        assert_eq!(b.operations_total.with_label_values(&["sign"]).get(), 0);
    }
}
