//! Configuration loader builder implementation.
//!
//! Responsibilities:
//! - Provide a builder-pattern `ConfigLoader` that layers builder values over env vars.
//! - Parse and normalize URLs (cloud endpoint overrides, directory path, connection string).
//! - Build the final `Config` from loaded values.
//!
//! Does NOT handle:
//! - Direct environment variable parsing logic (delegated to env.rs).
//! - Reporting missing credentials (see `validation`); absent credentials are not load errors.
//!
//! Invariants / Assumptions:
//! - Builder methods take precedence over environment variables.
//! - Explicit directory variables take precedence over the connection string.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.

use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;

use super::env::apply_env;
use super::error::ConfigError;
use crate::constants::{
    DEFAULT_BIND_ADDR, DEFAULT_TIMEOUT_SECS, ENV_GRAPH_BASE_URL, ENV_LDAP_CONNECTION,
    ENV_LDAP_PATH, ENV_LOGIN_BASE_URL, MAX_TIMEOUT_SECS,
};
use crate::types::{
    CloudConfig, Config, ConnectionConfig, DirectoryConfig, DirectoryLocation, ParsedDirectoryUrl,
    Strategy,
};

/// Configuration loader that builds config from environment variables and builder overrides.
#[derive(Default)]
pub struct ConfigLoader {
    strategy: Option<Strategy>,
    client_id: Option<String>,
    client_secret: Option<SecretString>,
    tenant_id: Option<String>,
    cloud_environment: Option<String>,
    login_base_url: Option<String>,
    graph_base_url: Option<String>,
    ldap_path: Option<String>,
    ldap_bind_username: Option<String>,
    ldap_bind_password: Option<SecretString>,
    ldap_connection: Option<SecretString>,
    timeout: Option<Duration>,
    bind_addr: Option<String>,
}

impl ConfigLoader {
    /// Create a new configuration loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if dotenv loading is disabled via environment variable.
    fn dotenv_disabled() -> bool {
        matches!(
            std::env::var("DOTENV_DISABLED").ok().as_deref(),
            Some("true") | Some("1")
        )
    }

    /// Load environment variables from .env file if present.
    ///
    /// If `DOTENV_DISABLED` environment variable is set to "true" or "1",
    /// the .env file will not be loaded (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The `.env` file exists but has invalid syntax (`ConfigError::DotenvParse`)
    /// - The `.env` file exists but cannot be read due to I/O errors (`ConfigError::DotenvIo`)
    ///
    /// Missing `.env` files are silently ignored (returns `Ok(self)`).
    pub fn load_dotenv(self) -> Result<Self, ConfigError> {
        if Self::dotenv_disabled() {
            return Ok(self);
        }

        match dotenvy::dotenv() {
            Ok(_) => Ok(self),
            Err(e) if Self::is_not_found(&e) => Ok(self),
            Err(dotenvy::Error::LineParse(_, idx)) => {
                Err(ConfigError::DotenvParse { error_index: idx })
            }
            Err(dotenvy::Error::Io(io_err)) => Err(ConfigError::DotenvIo {
                kind: io_err.kind(),
            }),
            Err(_) => Err(ConfigError::DotenvUnknown),
        }
    }

    fn is_not_found(err: &dotenvy::Error) -> bool {
        matches!(
            err,
            dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
        )
    }

    /// Read configuration from environment variables.
    pub fn from_env(mut self) -> Result<Self, ConfigError> {
        apply_env(&mut self)?;
        Ok(self)
    }

    /// Set the resolution strategy.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = Some(strategy);
        self
    }

    /// Set the application (client) id.
    pub fn with_client_id(mut self, client_id: String) -> Self {
        self.client_id = Some(client_id);
        self
    }

    /// Set the client secret.
    pub fn with_client_secret(mut self, secret: String) -> Self {
        self.client_secret = Some(SecretString::new(secret.into()));
        self
    }

    /// Set the tenant id.
    pub fn with_tenant_id(mut self, tenant_id: String) -> Self {
        self.tenant_id = Some(tenant_id);
        self
    }

    /// Set the raw cloud environment discriminator.
    pub fn with_cloud_environment(mut self, environment: String) -> Self {
        self.cloud_environment = Some(environment);
        self
    }

    /// Override the token host.
    pub fn with_login_base_url(mut self, url: String) -> Self {
        self.login_base_url = Some(url);
        self
    }

    /// Override the graph host.
    pub fn with_graph_base_url(mut self, url: String) -> Self {
        self.graph_base_url = Some(url);
        self
    }

    /// Set the directory path (`ldap[s]://host[:port]/base-dn`).
    pub fn with_ldap_path(mut self, path: String) -> Self {
        self.ldap_path = Some(path);
        self
    }

    /// Set the directory bind username.
    pub fn with_ldap_bind_username(mut self, username: String) -> Self {
        self.ldap_bind_username = Some(username);
        self
    }

    /// Set the directory bind password.
    pub fn with_ldap_bind_password(mut self, password: String) -> Self {
        self.ldap_bind_password = Some(SecretString::new(password.into()));
        self
    }

    /// Set the outbound timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the HTTP listen address.
    pub fn with_bind_addr(mut self, addr: String) -> Self {
        self.bind_addr = Some(addr);
        self
    }

    /// Build the final configuration.
    pub fn build(self) -> Result<Config, ConfigError> {
        let login_base_url = self
            .login_base_url
            .as_deref()
            .map(|raw| validate_and_normalize_base_url(ENV_LOGIN_BASE_URL, raw))
            .transpose()?;
        let graph_base_url = self
            .graph_base_url
            .as_deref()
            .map(|raw| validate_and_normalize_base_url(ENV_GRAPH_BASE_URL, raw))
            .transpose()?;

        let cloud = CloudConfig {
            client_id: self.client_id,
            client_secret: self.client_secret,
            tenant_id: self.tenant_id,
            environment_name: self.cloud_environment,
            login_base_url,
            graph_base_url,
        };

        let path = self
            .ldap_path
            .as_deref()
            .map(|raw| parse_directory_url(ENV_LDAP_PATH, raw))
            .transpose()?;
        let connection_string = self
            .ldap_connection
            .as_ref()
            .map(|raw| parse_directory_url(ENV_LDAP_CONNECTION, raw.expose_secret()))
            .transpose()?;
        let directory = merge_directory(
            path,
            connection_string,
            self.ldap_bind_username,
            self.ldap_bind_password,
        );

        let connection = ConnectionConfig {
            timeout: self
                .timeout
                .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            bind_addr: self
                .bind_addr
                .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
        };

        Self::validate_timeout_config(&connection)?;

        Ok(Config {
            strategy: self.strategy.unwrap_or_default(),
            cloud,
            directory,
            connection,
        })
    }

    /// Validates that the timeout is greater than 0 and not above `MAX_TIMEOUT_SECS`.
    fn validate_timeout_config(connection: &ConnectionConfig) -> Result<(), ConfigError> {
        let timeout_secs = connection.timeout.as_secs();

        if timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout {
                message: "timeout must be greater than 0 seconds".to_string(),
            });
        }

        if timeout_secs > MAX_TIMEOUT_SECS {
            return Err(ConfigError::InvalidTimeout {
                message: format!(
                    "timeout exceeds maximum allowed value of {} seconds",
                    MAX_TIMEOUT_SECS
                ),
            });
        }

        Ok(())
    }

    // Internal accessor methods for use by other loader modules

    pub(crate) fn strategy(&self) -> Option<Strategy> {
        self.strategy
    }

    pub(crate) fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub(crate) fn bind_addr(&self) -> Option<&String> {
        self.bind_addr.as_ref()
    }

    pub(crate) fn client_id(&self) -> Option<&String> {
        self.client_id.as_ref()
    }

    pub(crate) fn client_secret(&self) -> Option<&SecretString> {
        self.client_secret.as_ref()
    }

    pub(crate) fn tenant_id(&self) -> Option<&String> {
        self.tenant_id.as_ref()
    }

    pub(crate) fn cloud_environment(&self) -> Option<&String> {
        self.cloud_environment.as_ref()
    }

    pub(crate) fn login_base_url(&self) -> Option<&String> {
        self.login_base_url.as_ref()
    }

    pub(crate) fn graph_base_url(&self) -> Option<&String> {
        self.graph_base_url.as_ref()
    }

    pub(crate) fn ldap_path(&self) -> Option<&String> {
        self.ldap_path.as_ref()
    }

    pub(crate) fn ldap_bind_username(&self) -> Option<&String> {
        self.ldap_bind_username.as_ref()
    }

    pub(crate) fn ldap_bind_password(&self) -> Option<&SecretString> {
        self.ldap_bind_password.as_ref()
    }

    pub(crate) fn ldap_connection(&self) -> Option<&SecretString> {
        self.ldap_connection.as_ref()
    }

    pub(crate) fn set_strategy(&mut self, strategy: Option<Strategy>) {
        self.strategy = strategy;
    }

    pub(crate) fn set_client_id(&mut self, client_id: Option<String>) {
        self.client_id = client_id;
    }

    pub(crate) fn set_client_secret(&mut self, secret: Option<SecretString>) {
        self.client_secret = secret;
    }

    pub(crate) fn set_tenant_id(&mut self, tenant_id: Option<String>) {
        self.tenant_id = tenant_id;
    }

    pub(crate) fn set_cloud_environment(&mut self, environment: Option<String>) {
        self.cloud_environment = environment;
    }

    pub(crate) fn set_login_base_url(&mut self, url: Option<String>) {
        self.login_base_url = url;
    }

    pub(crate) fn set_graph_base_url(&mut self, url: Option<String>) {
        self.graph_base_url = url;
    }

    pub(crate) fn set_ldap_path(&mut self, path: Option<String>) {
        self.ldap_path = path;
    }

    pub(crate) fn set_ldap_bind_username(&mut self, username: Option<String>) {
        self.ldap_bind_username = username;
    }

    pub(crate) fn set_ldap_bind_password(&mut self, password: Option<SecretString>) {
        self.ldap_bind_password = password;
    }

    pub(crate) fn set_ldap_connection(&mut self, connection: Option<SecretString>) {
        self.ldap_connection = connection;
    }

    pub(crate) fn set_timeout(&mut self, timeout: Option<Duration>) {
        self.timeout = timeout;
    }

    pub(crate) fn set_bind_addr(&mut self, addr: Option<String>) {
        self.bind_addr = addr;
    }
}

fn parse_directory_url(var: &str, raw: &str) -> Result<ParsedDirectoryUrl, ConfigError> {
    DirectoryLocation::parse(raw).map_err(|message| ConfigError::InvalidValue {
        var: var.to_string(),
        message,
    })
}

/// Combine the explicit directory variables with the connection string.
///
/// Each piece comes from the first source that has it: explicit variable,
/// then credentials embedded in the path, then the connection string.
fn merge_directory(
    path: Option<ParsedDirectoryUrl>,
    connection_string: Option<ParsedDirectoryUrl>,
    bind_username: Option<String>,
    bind_password: Option<SecretString>,
) -> DirectoryConfig {
    let (path_location, path_username, path_password) = match path {
        Some(p) => (Some(p.location), p.username, p.password),
        None => (None, None, None),
    };
    let (conn_location, conn_username, conn_password) = match connection_string {
        Some(c) => (Some(c.location), c.username, c.password),
        None => (None, None, None),
    };

    DirectoryConfig {
        location: path_location.or(conn_location),
        bind_username: bind_username.or(path_username).or(conn_username),
        bind_password: bind_password.or(path_password).or(conn_password),
    }
}

/// Validates and normalizes an http(s) base URL override.
///
/// Validation rules:
/// - Parse as an absolute URL
/// - Require scheme is http or https
/// - Require host is present
/// - Normalize by stripping trailing slash
fn validate_and_normalize_base_url(var: &str, raw: &str) -> Result<String, ConfigError> {
    let parsed = url::Url::parse(raw.trim()).map_err(|e| ConfigError::InvalidValue {
        var: var.to_string(),
        message: format!(
            "must be an absolute http(s) URL with a host (e.g. https://login.microsoftonline.com): {e}"
        ),
    })?;

    let scheme = parsed.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(ConfigError::InvalidValue {
            var: var.to_string(),
            message: format!("scheme must be http or https, got: {scheme}"),
        });
    }

    if parsed.host_str().is_none() {
        return Err(ConfigError::InvalidValue {
            var: var.to_string(),
            message: "host is required".to_string(),
        });
    }

    Ok(parsed.as_str().trim_end_matches('/').to_string())
}
