//! OAuth2 client-credentials grant.

use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::auth::AccessToken;
use crate::endpoints::request::{RequestFailure, send_checked};
use crate::endpoints::url_encoding::encode_path_segment;
use crate::error::TokenError;

#[derive(Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
}

/// Exchange the app credentials for a bearer token scoped to `resource`.
///
/// Sends `POST {login_base_url}/{tenant_id}/oauth2/token` with a form body.
/// Neither the secret nor the returned token is ever logged.
pub async fn acquire_token(
    client: &Client,
    login_base_url: &str,
    tenant_id: &str,
    client_id: &str,
    client_secret: &SecretString,
    resource: &str,
) -> Result<AccessToken, TokenError> {
    let uri = format!(
        "{}/{}/oauth2/token",
        login_base_url.trim_end_matches('/'),
        encode_path_segment(tenant_id)
    );
    debug!(uri = %uri, resource = %resource, "Requesting client-credentials token");

    let builder = client.post(&uri).form(&[
        ("grant_type", "client_credentials"),
        ("client_id", client_id),
        ("client_secret", client_secret.expose_secret()),
        ("resource", resource),
    ]);

    let response = match send_checked(builder).await {
        Ok(response) => response,
        Err(RequestFailure::Transport(source)) => {
            warn!(operation = "acquire_token", uri = %uri, timeout = source.is_timeout(), "Token request failed");
            return Err(TokenError::Transport { uri, source });
        }
        Err(RequestFailure::Status(status)) => {
            warn!(operation = "acquire_token", uri = %uri, status, "Token endpoint rejected request");
            return Err(TokenError::HttpStatus { uri, status });
        }
    };

    let body = response
        .bytes()
        .await
        .map_err(|source| TokenError::Transport {
            uri: uri.clone(),
            source,
        })?;

    let parsed: TokenResponse = serde_json::from_slice(&body).map_err(|e| {
        warn!(operation = "acquire_token", uri = %uri, "Token response is not valid JSON");
        TokenError::BadResponse {
            uri: uri.clone(),
            message: format!("body is not a token response: {e}"),
        }
    })?;

    match parsed.access_token.filter(|t| !t.trim().is_empty()) {
        Some(token) => Ok(AccessToken::new(SecretString::new(token.into()), resource)),
        None => {
            warn!(operation = "acquire_token", uri = %uri, "Token response has no access_token");
            Err(TokenError::BadResponse {
                uri,
                message: "access_token is missing or empty".to_string(),
            })
        }
    }
}
