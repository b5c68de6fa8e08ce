//! Centralized constants for the claims provider workspace.
//!
//! This module contains default values and fixed endpoints used across crates
//! to avoid magic string and number duplication.

// =============================================================================
// Connection & Timeout Defaults
// =============================================================================

/// Default timeout for every outbound call (token, graph, LDAP), in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Maximum allowed outbound timeout in seconds.
pub const MAX_TIMEOUT_SECS: u64 = 300;

/// Default maximum number of HTTP redirects to follow.
pub const DEFAULT_MAX_REDIRECTS: usize = 5;

/// Default listen address for the HTTP trigger.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:7071";

/// Default LDAP port when the directory path omits one.
pub const DEFAULT_LDAP_PORT: u16 = 389;

/// Default LDAPS port when the directory path omits one.
pub const DEFAULT_LDAPS_PORT: u16 = 636;

// =============================================================================
// Cloud Endpoints
// =============================================================================

/// Exact discriminator value that selects the public cloud endpoint set.
///
/// Any other value, including an unset variable, selects the sovereign set.
pub const PUBLIC_CLOUD_NAME: &str = "AzurePublicCloud";

/// Token host for the public cloud.
pub const PUBLIC_LOGIN_BASE_URL: &str = "https://login.microsoftonline.com";

/// Directory graph host for the public cloud.
pub const PUBLIC_GRAPH_BASE_URL: &str = "https://graph.microsoft.com";

/// Token host for the sovereign (government) cloud.
pub const SOVEREIGN_LOGIN_BASE_URL: &str = "https://login.microsoftonline.us";

/// Directory graph host for the sovereign (government) cloud.
pub const SOVEREIGN_GRAPH_BASE_URL: &str = "https://graph.microsoft.us";

// =============================================================================
// Environment Variable Names
// =============================================================================

pub const ENV_STRATEGY: &str = "CLAIMS_STRATEGY";
pub const ENV_CLIENT_ID: &str = "CLAIMS_CLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "CLAIMS_CLIENT_SECRET";
pub const ENV_TENANT_ID: &str = "CLAIMS_TENANT_ID";
pub const ENV_CLOUD_ENVIRONMENT: &str = "CLAIMS_CLOUD_ENVIRONMENT";
pub const ENV_LOGIN_BASE_URL: &str = "CLAIMS_LOGIN_BASE_URL";
pub const ENV_GRAPH_BASE_URL: &str = "CLAIMS_GRAPH_BASE_URL";
pub const ENV_LDAP_PATH: &str = "CLAIMS_LDAP_PATH";
pub const ENV_LDAP_BIND_USERNAME: &str = "CLAIMS_LDAP_BIND_USERNAME";
pub const ENV_LDAP_BIND_PASSWORD: &str = "CLAIMS_LDAP_BIND_PASSWORD";
pub const ENV_LDAP_CONNECTION: &str = "CLAIMS_LDAP_CONNECTION";
pub const ENV_TIMEOUT: &str = "CLAIMS_TIMEOUT";
pub const ENV_BIND_ADDR: &str = "CLAIMS_BIND_ADDR";
pub const ENV_OTLP_ENDPOINT: &str = "CLAIMS_OTLP_ENDPOINT";
