//! Prometheus exposition of the resolution metrics.
//!
//! Installs a global `PrometheusRecorder` and serves `/metrics` on the given
//! address. Without an installed exporter the collector's macros are no-ops.

use std::net::SocketAddr;

use metrics_exporter_prometheus::{Matcher, PrometheusBuilder};
use tracing::info;

use crate::metrics::METRIC_RESOLUTION_DURATION;

/// Latency buckets, in seconds. Outbound calls are bounded by a 1-300s timeout.
const RESOLUTION_DURATION_BUCKETS: &[f64] = &[
    0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0,
];

/// Running Prometheus exporter.
pub struct MetricsExporter {
    bind_addr: SocketAddr,
}

impl MetricsExporter {
    /// Install the exporter as the global metrics recorder.
    ///
    /// # Errors
    /// Returns an error if the address does not parse, a recorder is already
    /// installed, or the listener cannot be built.
    pub fn install(bind_addr: &str) -> Result<Self, MetricsExporterError> {
        let addr: SocketAddr = bind_addr
            .parse()
            .map_err(|e| MetricsExporterError::InvalidBindAddress(bind_addr.to_string(), e))?;

        PrometheusBuilder::new()
            .set_buckets_for_metric(
                Matcher::Full(METRIC_RESOLUTION_DURATION.to_string()),
                RESOLUTION_DURATION_BUCKETS,
            )?
            .with_http_listener(addr)
            .install()
            .map_err(|e| match e {
                metrics_exporter_prometheus::BuildError::FailedToSetGlobalRecorder(_) => {
                    MetricsExporterError::RecorderAlreadyInstalled
                }
                other => MetricsExporterError::from(other),
            })?;

        info!(
            "Prometheus metrics exporter started on http://{}/metrics",
            addr
        );

        Ok(Self { bind_addr: addr })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}

/// Errors that can occur when installing the metrics exporter.
#[derive(Debug, thiserror::Error)]
pub enum MetricsExporterError {
    #[error("Invalid bind address '{0}': {1}")]
    InvalidBindAddress(String, std::net::AddrParseError),

    #[error("A metrics recorder is already installed")]
    RecorderAlreadyInstalled,

    #[error("Failed to build Prometheus recorder: {0}")]
    BuildError(String),
}

impl From<metrics_exporter_prometheus::BuildError> for MetricsExporterError {
    fn from(err: metrics_exporter_prometheus::BuildError) -> Self {
        MetricsExporterError::BuildError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_bind_address() {
        let result = MetricsExporter::install("not-a-valid-addr");
        assert!(
            matches!(result, Err(MetricsExporterError::InvalidBindAddress(_, _))),
            "Expected InvalidBindAddress error for invalid address"
        );
    }

    #[test]
    fn test_buckets_are_sorted() {
        assert!(
            RESOLUTION_DURATION_BUCKETS
                .windows(2)
                .all(|pair| pair[0] < pair[1])
        );
    }

    #[test]
    fn test_error_display() {
        let parse_error = "invalid".parse::<SocketAddr>().unwrap_err();
        let error = MetricsExporterError::InvalidBindAddress("metrics".to_string(), parse_error);
        let error_string = error.to_string();
        assert!(error_string.contains("Invalid bind address"));
        assert!(error_string.contains("metrics"));

        assert_eq!(
            MetricsExporterError::RecorderAlreadyInstalled.to_string(),
            "A metrics recorder is already installed"
        );
    }
}
