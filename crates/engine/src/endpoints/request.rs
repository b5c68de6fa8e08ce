//! Single-shot request helper shared by the token and graph endpoints.
//!
//! There is no retry. A request is sent once, with trace context attached,
//! and anything other than a 2xx status is reported back as a status failure.

use reqwest::{RequestBuilder, Response};
use tracing::debug;

use crate::telemetry::inject_trace_context;

/// Why a request did not produce a usable response.
#[derive(Debug)]
pub(crate) enum RequestFailure {
    /// Connection, TLS, or timeout failure before a status line arrived.
    Transport(reqwest::Error),
    /// Non-success status.
    Status(u16),
}

/// Send `builder` once and require a success status.
pub(crate) async fn send_checked(builder: RequestBuilder) -> Result<Response, RequestFailure> {
    let response = inject_trace_context(builder)
        .send()
        .await
        .map_err(RequestFailure::Transport)?;

    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        debug!(status = status.as_u16(), url = %response.url(), "Non-success response");
        Err(RequestFailure::Status(status.as_u16()))
    }
}
