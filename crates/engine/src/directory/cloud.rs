//! Cloud lookup of `onPremisesUserPrincipalName` by object id.

use claims_config::{Config, Strategy};
use reqwest::Client;
use tracing::debug;

use super::{ResolutionResult, missing_settings};
use crate::endpoints::{acquire_token, get_on_prem_upn};
use crate::error::ResolveError;

/// Acquire a token, then read the user's on-premises UPN.
///
/// The token is scoped to the graph host and dropped when this returns.
pub(super) async fn resolve_by_object_id(
    http: &Client,
    config: &Config,
    object_id: &str,
) -> Result<ResolutionResult, ResolveError> {
    let cloud = &config.cloud;
    let (Some(client_id), Some(client_secret), Some(tenant_id)) = (
        cloud.client_id.as_deref(),
        cloud.client_secret.as_ref(),
        cloud.tenant_id.as_deref(),
    ) else {
        return Err(missing_settings(Strategy::CloudByObjectId, config).into());
    };

    let login_base_url = cloud.effective_login_base_url();
    let graph_base_url = cloud.effective_graph_base_url();
    debug!(
        environment = ?cloud.environment(),
        login_base_url = %login_base_url,
        graph_base_url = %graph_base_url,
        "Resolving by object id"
    );

    let token = acquire_token(
        http,
        &login_base_url,
        tenant_id,
        client_id,
        client_secret,
        &graph_base_url,
    )
    .await?;

    let upn = get_on_prem_upn(http, &graph_base_url, &token, object_id).await?;
    Ok(upn.map(ResolutionResult::found).unwrap_or_default())
}
