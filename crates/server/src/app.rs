//! HTTP routes.
//!
//! Routes:
//! - `GET|POST /api/claims`, with aliases `/api/AzureADQuery` and `/api/LDAPQuery`
//! - `GET /healthz`
//!
//! A parsed event always answers 200 with the claims envelope. Only a missing
//! subject or a malformed body answers 400 with `{"error": "..."}`.

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use claims_engine::{ParseError, ResolutionEngine};
use serde::Serialize;
use tower_http::trace::TraceLayer;

pub const CLAIMS_PATH: &str = "/api/claims";
pub const CLOUD_ALIAS_PATH: &str = "/api/AzureADQuery";
pub const DIRECTORY_ALIAS_PATH: &str = "/api/LDAPQuery";

/// Query parameter naming the subject directly.
pub const NAME_PARAM: &str = "name";

/// First `name` value in the query string. Repeated keys do not reject the request.
fn first_name(params: &[(String, String)]) -> Option<&str> {
    params
        .iter()
        .find(|(key, _)| key == NAME_PARAM)
        .map(|(_, value)| value.as_str())
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

/// Build the router over a shared engine.
pub fn build_app(engine: ResolutionEngine) -> Router {
    Router::new()
        .route(CLAIMS_PATH, get(claims).post(claims))
        .route(CLOUD_ALIAS_PATH, get(claims).post(claims))
        .route(DIRECTORY_ALIAS_PATH, get(claims).post(claims))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .with_state(engine)
}

async fn claims(
    State(engine): State<ResolutionEngine>,
    Query(params): Query<Vec<(String, String)>>,
    body: Bytes,
) -> Response {
    match engine.handle(&body, first_name(&params)).await {
        Ok(response) => (StatusCode::OK, Json(response.into_envelope())).into_response(),
        Err(error) => bad_request(&error),
    }
}

fn bad_request(error: &ParseError) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: error.to_string(),
        }),
    )
        .into_response()
}

async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, Json(HealthResponse { status: "ok" }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_first_name_wins() {
        let params = pairs(&[("code", "x"), ("name", "a"), ("name", "b")]);
        assert_eq!(first_name(&params), Some("a"));
    }

    #[test]
    fn test_first_name_absent() {
        assert_eq!(first_name(&pairs(&[("code", "x")])), None);
        assert_eq!(first_name(&[]), None);
    }
}
