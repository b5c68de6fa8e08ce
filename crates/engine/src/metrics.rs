//! Metrics collection for claims resolution.
//!
//! This module records, per strategy:
//! - Resolution counters by outcome
//! - Resolution latency histograms
//! - Error counters by category
//! - Rejected inbound requests by reason
//!
//! # What this module does NOT handle:
//! - Metrics exposition/export (see `metrics_exporter`)
//!
//! # Invariants
//! - Label names are fixed: `strategy`, `outcome`, `error_category`, `reason`
//! - Metric recording is infallible and never disrupts a request
//! - Zero-cost when no metrics recorder is installed

use std::time::Duration;

use claims_config::Strategy;

use crate::error::{DirectoryError, ParseError, ResolveError, TokenError};

/// Metric name for resolution counter.
pub const METRIC_RESOLUTIONS_TOTAL: &str = "claims_resolutions_total";

/// Metric name for resolution duration histogram.
pub const METRIC_RESOLUTION_DURATION: &str = "claims_resolution_duration_seconds";

/// Metric name for resolution error counter.
pub const METRIC_RESOLUTION_ERRORS_TOTAL: &str = "claims_resolution_errors_total";

/// Metric name for rejected request counter.
pub const METRIC_REQUESTS_REJECTED_TOTAL: &str = "claims_requests_rejected_total";

/// How a resolution ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Found,
    NotFound,
    Error,
}

impl Outcome {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Outcome::Found => "found",
            Outcome::NotFound => "not_found",
            Outcome::Error => "error",
        }
    }
}

/// Error categories for metrics labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Required settings are missing.
    Configuration,
    /// The event carries nothing the strategy can look up.
    MissingIdentifier,
    /// Connection, DNS or TLS failure on an HTTP call.
    Transport,
    /// Any outbound call that ran out of time.
    Timeout,
    /// HTTP 4xx from the token or graph endpoint.
    Http4xx,
    /// HTTP 5xx from the token or graph endpoint.
    Http5xx,
    /// Response body could not be used.
    InvalidResponse,
    /// LDAP connect failure.
    DirectoryConnect,
    /// LDAP bind rejected.
    DirectoryBind,
    /// LDAP search failed.
    DirectorySearch,
}

impl ErrorCategory {
    /// Returns the string label for this error category.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Configuration => "configuration",
            ErrorCategory::MissingIdentifier => "missing_identifier",
            ErrorCategory::Transport => "transport",
            ErrorCategory::Timeout => "timeout",
            ErrorCategory::Http4xx => "http_4xx",
            ErrorCategory::Http5xx => "http_5xx",
            ErrorCategory::InvalidResponse => "invalid_response",
            ErrorCategory::DirectoryConnect => "directory_connect",
            ErrorCategory::DirectoryBind => "directory_bind",
            ErrorCategory::DirectorySearch => "directory_search",
        }
    }

    fn from_status(status: u16) -> Self {
        if (500..600).contains(&status) {
            ErrorCategory::Http5xx
        } else {
            ErrorCategory::Http4xx
        }
    }

    fn from_transport(error: &reqwest::Error) -> Self {
        if error.is_timeout() {
            ErrorCategory::Timeout
        } else {
            ErrorCategory::Transport
        }
    }
}

impl From<&ResolveError> for ErrorCategory {
    fn from(error: &ResolveError) -> Self {
        match error {
            ResolveError::MissingSettings(_) => ErrorCategory::Configuration,
            ResolveError::MissingIdentifier { .. } => ErrorCategory::MissingIdentifier,
            ResolveError::Token(TokenError::Transport { source, .. }) => {
                ErrorCategory::from_transport(source)
            }
            ResolveError::Token(TokenError::HttpStatus { status, .. }) => {
                ErrorCategory::from_status(*status)
            }
            ResolveError::Token(TokenError::BadResponse { .. }) => ErrorCategory::InvalidResponse,
            ResolveError::Directory(error) => match error {
                DirectoryError::Connect { .. } => ErrorCategory::DirectoryConnect,
                DirectoryError::Bind { .. } => ErrorCategory::DirectoryBind,
                DirectoryError::Search { .. } => ErrorCategory::DirectorySearch,
                DirectoryError::Timeout { .. } => ErrorCategory::Timeout,
                DirectoryError::HttpStatus { status, .. } => ErrorCategory::from_status(*status),
                DirectoryError::Transport { source, .. } => ErrorCategory::from_transport(source),
                DirectoryError::BadResponse { .. } => ErrorCategory::InvalidResponse,
            },
        }
    }
}

/// Metrics collector for resolutions.
///
/// Thin wrapper around the `metrics` crate macros with consistent labels.
#[derive(Debug, Clone, Default)]
pub struct MetricsCollector {
    enabled: bool,
}

impl MetricsCollector {
    /// Create an enabled collector.
    pub fn new() -> Self {
        Self { enabled: true }
    }

    /// Create a collector that records nothing.
    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Record one finished resolution and its latency.
    pub fn record_resolution(&self, strategy: Strategy, outcome: Outcome, duration: Duration) {
        if !self.enabled {
            return;
        }

        metrics::counter!(METRIC_RESOLUTIONS_TOTAL,
            "strategy" => strategy.as_str(),
            "outcome" => outcome.as_str(),
        )
        .increment(1);

        metrics::histogram!(METRIC_RESOLUTION_DURATION,
            "strategy" => strategy.as_str(),
        )
        .record(duration.as_secs_f64());
    }

    /// Record a resolution error.
    pub fn record_error(&self, strategy: Strategy, error: &ResolveError) {
        if !self.enabled {
            return;
        }

        metrics::counter!(METRIC_RESOLUTION_ERRORS_TOTAL,
            "strategy" => strategy.as_str(),
            "error_category" => ErrorCategory::from(error).as_str(),
        )
        .increment(1);
    }

    /// Record an inbound request rejected before resolution.
    pub fn record_rejected(&self, error: &ParseError) {
        if !self.enabled {
            return;
        }

        let reason = match error {
            ParseError::MalformedBody(_) => "malformed_body",
            ParseError::MissingSubject => "missing_subject",
        };
        metrics::counter!(METRIC_REQUESTS_REJECTED_TOTAL, "reason" => reason).increment(1);
    }
}
