//! Connection limits and the main `Config` structure.
//!
//! Invariants:
//! - `timeout` bounds every outbound call made for one request.
//! - Default values come from `constants`, not magic numbers.

use std::time::Duration;

use crate::constants::{DEFAULT_BIND_ADDR, DEFAULT_TIMEOUT_SECS};
use crate::types::cloud::CloudConfig;
use crate::types::directory::DirectoryConfig;
use crate::types::strategy::Strategy;

/// Outbound limits and the inbound listen address.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// Timeout applied to token, graph and LDAP calls.
    pub timeout: Duration,
    /// Listen address for the HTTP trigger.
    pub bind_addr: String,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Active resolution strategy.
    pub strategy: Strategy,
    /// Cloud client-credentials settings.
    pub cloud: CloudConfig,
    /// On-prem directory settings.
    pub directory: DirectoryConfig,
    /// Timeouts and listen address.
    pub connection: ConnectionConfig,
}

impl Config {
    /// Create a configuration for the given strategy with every credential unset.
    pub fn for_strategy(strategy: Strategy) -> Self {
        Self {
            strategy,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.strategy, Strategy::CloudByObjectId);
        assert_eq!(config.connection.timeout, Duration::from_secs(5));
        assert_eq!(config.connection.bind_addr, "0.0.0.0:7071");
        assert!(config.cloud.client_id.is_none());
        assert!(config.directory.location.is_none());
    }

    #[test]
    fn test_for_strategy() {
        let config = Config::for_strategy(Strategy::OnPremByMail);
        assert_eq!(config.strategy, Strategy::OnPremByMail);
        assert!(config.directory.bind_username.is_none());
    }
}
