//! Cloud directory (Microsoft Graph) user lookup.

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::auth::AccessToken;
use crate::endpoints::request::{RequestFailure, send_checked};
use crate::endpoints::url_encoding::encode_path_segment;
use crate::error::DirectoryError;

/// Properties requested with `$select`.
const USER_SELECT: &str = "onPremisesUserPrincipalName,onPremisesSamAccountName";

/// The subset of a Graph user this service reads.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphUser {
    pub on_premises_user_principal_name: Option<String>,
    pub on_premises_sam_account_name: Option<String>,
}

/// `{graph}/v1.0/users/{id}?$select=...`, with the query written literally.
fn user_uri(graph_base_url: &str, object_id: &str) -> String {
    format!(
        "{}/v1.0/users/{}?$select={}",
        graph_base_url.trim_end_matches('/'),
        encode_path_segment(object_id),
        USER_SELECT
    )
}

/// Fetch a user by object id and return its on-premises UPN.
///
/// Returns `Ok(None)` when the user exists but has no synced on-premises UPN.
pub async fn get_on_prem_upn(
    client: &Client,
    graph_base_url: &str,
    token: &AccessToken,
    object_id: &str,
) -> Result<Option<String>, DirectoryError> {
    let uri = user_uri(graph_base_url, object_id);
    debug!(uri = %uri, "Looking up user in cloud directory");

    let builder = client.get(&uri).bearer_auth(token.bearer());

    let response = match send_checked(builder).await {
        Ok(response) => response,
        Err(RequestFailure::Transport(source)) => {
            warn!(operation = "get_on_prem_upn", uri = %uri, timeout = source.is_timeout(), "Graph request failed");
            return Err(DirectoryError::Transport { uri, source });
        }
        Err(RequestFailure::Status(status)) => {
            warn!(operation = "get_on_prem_upn", uri = %uri, status, "Graph lookup returned non-success status");
            return Err(DirectoryError::HttpStatus { uri, status });
        }
    };

    let body = response
        .bytes()
        .await
        .map_err(|source| DirectoryError::Transport {
            uri: uri.clone(),
            source,
        })?;

    let user: GraphUser = serde_json::from_slice(&body).map_err(|e| {
        warn!(operation = "get_on_prem_upn", uri = %uri, "Graph response is not a user object");
        DirectoryError::BadResponse {
            uri: uri.clone(),
            message: e.to_string(),
        }
    })?;

    Ok(user
        .on_premises_user_principal_name
        .map(|upn| upn.trim().to_string())
        .filter(|upn| !upn.is_empty()))
}
