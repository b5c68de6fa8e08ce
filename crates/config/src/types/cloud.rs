//! Cloud directory (client-credentials) settings.
//!
//! Responsibilities:
//! - Hold the app registration credentials used for the client-credentials grant.
//! - Map the cloud environment discriminator to a fixed endpoint set.
//!
//! Invariants:
//! - Only the exact string `AzurePublicCloud` selects the public endpoint set.
//!   Every other value, including an unset discriminator, selects the sovereign set.
//! - Explicit base URL overrides win over the environment's endpoint set.

use secrecy::SecretString;

use crate::constants::{
    PUBLIC_CLOUD_NAME, PUBLIC_GRAPH_BASE_URL, PUBLIC_LOGIN_BASE_URL, SOVEREIGN_GRAPH_BASE_URL,
    SOVEREIGN_LOGIN_BASE_URL,
};

/// Endpoint set selected by the cloud environment discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloudEnvironment {
    /// Public commercial cloud.
    Public,
    /// Sovereign/government cloud.
    Sovereign,
}

impl CloudEnvironment {
    /// Select the endpoint set for a raw discriminator value.
    pub fn from_discriminator(value: Option<&str>) -> Self {
        match value {
            Some(PUBLIC_CLOUD_NAME) => CloudEnvironment::Public,
            _ => CloudEnvironment::Sovereign,
        }
    }

    /// Token host for this environment.
    pub const fn login_base_url(&self) -> &'static str {
        match self {
            CloudEnvironment::Public => PUBLIC_LOGIN_BASE_URL,
            CloudEnvironment::Sovereign => SOVEREIGN_LOGIN_BASE_URL,
        }
    }

    /// Directory graph host for this environment. Also the token `resource`.
    pub const fn graph_base_url(&self) -> &'static str {
        match self {
            CloudEnvironment::Public => PUBLIC_GRAPH_BASE_URL,
            CloudEnvironment::Sovereign => SOVEREIGN_GRAPH_BASE_URL,
        }
    }
}

/// Settings for the cloud lookup strategy.
#[derive(Debug, Clone, Default)]
pub struct CloudConfig {
    /// Application (client) id.
    pub client_id: Option<String>,
    /// Application client secret.
    pub client_secret: Option<SecretString>,
    /// Directory tenant id.
    pub tenant_id: Option<String>,
    /// Raw cloud environment discriminator.
    pub environment_name: Option<String>,
    /// Token host override.
    pub login_base_url: Option<String>,
    /// Graph host override.
    pub graph_base_url: Option<String>,
}

impl CloudConfig {
    /// The endpoint set selected by `environment_name`.
    pub fn environment(&self) -> CloudEnvironment {
        CloudEnvironment::from_discriminator(self.environment_name.as_deref())
    }

    /// Effective token host, without a trailing slash.
    pub fn effective_login_base_url(&self) -> String {
        self.login_base_url
            .as_deref()
            .unwrap_or(self.environment().login_base_url())
            .trim_end_matches('/')
            .to_string()
    }

    /// Effective graph host, without a trailing slash.
    pub fn effective_graph_base_url(&self) -> String {
        self.graph_base_url
            .as_deref()
            .unwrap_or(self.environment().graph_base_url())
            .trim_end_matches('/')
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_public_name_selects_public() {
        assert_eq!(
            CloudEnvironment::from_discriminator(Some("AzurePublicCloud")),
            CloudEnvironment::Public
        );
    }

    #[test]
    fn test_everything_else_selects_sovereign() {
        for value in [
            None,
            Some(""),
            Some("azurepubliccloud"),
            Some("AzurePublicCloud "),
            Some("AzureUSGovernment"),
            Some("AzurePublic"),
        ] {
            assert_eq!(
                CloudEnvironment::from_discriminator(value),
                CloudEnvironment::Sovereign,
                "value {:?} should fall back to sovereign",
                value
            );
        }
    }

    #[test]
    fn test_effective_urls_follow_environment() {
        let public = CloudConfig {
            environment_name: Some("AzurePublicCloud".to_string()),
            ..Default::default()
        };
        assert_eq!(
            public.effective_login_base_url(),
            "https://login.microsoftonline.com"
        );
        assert_eq!(public.effective_graph_base_url(), "https://graph.microsoft.com");

        let sovereign = CloudConfig::default();
        assert_eq!(
            sovereign.effective_login_base_url(),
            "https://login.microsoftonline.us"
        );
        assert_eq!(sovereign.effective_graph_base_url(), "https://graph.microsoft.us");
    }

    #[test]
    fn test_overrides_win_and_are_normalized() {
        let config = CloudConfig {
            environment_name: Some("AzurePublicCloud".to_string()),
            login_base_url: Some("http://127.0.0.1:9000/".to_string()),
            graph_base_url: Some("http://127.0.0.1:9001//".to_string()),
            ..Default::default()
        };
        assert_eq!(config.effective_login_base_url(), "http://127.0.0.1:9000");
        assert_eq!(config.effective_graph_base_url(), "http://127.0.0.1:9001");
    }

    #[test]
    fn test_debug_does_not_expose_client_secret() {
        let config = CloudConfig {
            client_id: Some("app-id".to_string()),
            client_secret: Some(SecretString::new("cloud-secret-value".to_string().into())),
            ..Default::default()
        };
        let debug_output = format!("{:?}", config);
        assert!(!debug_output.contains("cloud-secret-value"));
        assert!(debug_output.contains("app-id"));
    }
}
