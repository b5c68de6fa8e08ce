//! Environment variable parsing for configuration.
//!
//! Responsibilities:
//! - Read and parse the `CLAIMS_*` environment variables.
//! - Apply environment variable values to a ConfigLoader instance.
//! - Provide helper functions for reading env vars with empty/whitespace filtering.
//!
//! Does NOT handle:
//! - Building the final Config (see builder.rs).
//! - .env file loading (handled by ConfigLoader::load_dotenv).
//!
//! Invariants:
//! - Empty or whitespace-only environment variables are treated as unset.
//! - Returned values are trimmed (leading/trailing whitespace removed).
//! - Invalid numeric values return ConfigError::InvalidValue.

use secrecy::SecretString;
use std::time::Duration;

use super::builder::ConfigLoader;
use super::error::ConfigError;
use crate::constants::{
    ENV_BIND_ADDR, ENV_CLIENT_ID, ENV_CLIENT_SECRET, ENV_CLOUD_ENVIRONMENT, ENV_GRAPH_BASE_URL,
    ENV_LDAP_BIND_PASSWORD, ENV_LDAP_BIND_USERNAME, ENV_LDAP_CONNECTION, ENV_LDAP_PATH,
    ENV_LOGIN_BASE_URL, ENV_STRATEGY, ENV_TENANT_ID, ENV_TIMEOUT,
};
use crate::types::Strategy;

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value (leading/trailing whitespace removed) if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

fn secret_var(key: &str) -> Option<SecretString> {
    env_var_or_none(key).map(|value| SecretString::new(value.into()))
}

/// Apply environment variable configuration to the loader.
///
/// Values already set through builder methods are left untouched.
pub fn apply_env(loader: &mut ConfigLoader) -> Result<(), ConfigError> {
    if loader.strategy().is_none()
        && let Some(raw) = env_var_or_none(ENV_STRATEGY)
    {
        let strategy: Strategy = raw.parse().map_err(|e: crate::types::UnknownStrategy| {
            ConfigError::InvalidValue {
                var: ENV_STRATEGY.to_string(),
                message: e.to_string(),
            }
        })?;
        loader.set_strategy(Some(strategy));
    }

    if loader.client_id().is_none()
        && let Some(client_id) = env_var_or_none(ENV_CLIENT_ID)
    {
        loader.set_client_id(Some(client_id));
    }
    if loader.client_secret().is_none()
        && let Some(secret) = secret_var(ENV_CLIENT_SECRET)
    {
        loader.set_client_secret(Some(secret));
    }
    if loader.tenant_id().is_none()
        && let Some(tenant_id) = env_var_or_none(ENV_TENANT_ID)
    {
        loader.set_tenant_id(Some(tenant_id));
    }
    if loader.cloud_environment().is_none()
        && let Some(environment) = env_var_or_none(ENV_CLOUD_ENVIRONMENT)
    {
        loader.set_cloud_environment(Some(environment));
    }
    if loader.login_base_url().is_none()
        && let Some(url) = env_var_or_none(ENV_LOGIN_BASE_URL)
    {
        loader.set_login_base_url(Some(url));
    }
    if loader.graph_base_url().is_none()
        && let Some(url) = env_var_or_none(ENV_GRAPH_BASE_URL)
    {
        loader.set_graph_base_url(Some(url));
    }

    if loader.ldap_path().is_none()
        && let Some(path) = env_var_or_none(ENV_LDAP_PATH)
    {
        loader.set_ldap_path(Some(path));
    }
    if loader.ldap_bind_username().is_none()
        && let Some(username) = env_var_or_none(ENV_LDAP_BIND_USERNAME)
    {
        loader.set_ldap_bind_username(Some(username));
    }
    if loader.ldap_bind_password().is_none()
        && let Some(password) = secret_var(ENV_LDAP_BIND_PASSWORD)
    {
        loader.set_ldap_bind_password(Some(password));
    }
    if loader.ldap_connection().is_none()
        && let Some(connection) = secret_var(ENV_LDAP_CONNECTION)
    {
        loader.set_ldap_connection(Some(connection));
    }

    if loader.timeout().is_none()
        && let Some(timeout) = env_var_or_none(ENV_TIMEOUT)
    {
        let secs: u64 = timeout.parse().map_err(|_| ConfigError::InvalidValue {
            var: ENV_TIMEOUT.to_string(),
            message: "must be a number".to_string(),
        })?;
        loader.set_timeout(Some(Duration::from_secs(secs)));
    }
    if loader.bind_addr().is_none()
        && let Some(addr) = env_var_or_none(ENV_BIND_ADDR)
    {
        loader.set_bind_addr(Some(addr));
    }

    Ok(())
}
