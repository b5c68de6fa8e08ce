//! Per-strategy configuration completeness check.
//!
//! Responsibilities:
//! - Report every setting the active strategy needs but does not have.
//!
//! Does NOT handle:
//! - Parsing or normalizing values (see `loader`).
//! - Any network access.
//!
//! Invariants:
//! - The full missing set is returned in one pass, never fail-fast.
//! - Keys are reported by environment variable name in a deterministic order.

use std::collections::BTreeSet;
use std::fmt;

use crate::constants::{
    ENV_CLIENT_ID, ENV_CLIENT_SECRET, ENV_CLOUD_ENVIRONMENT, ENV_LDAP_BIND_PASSWORD,
    ENV_LDAP_BIND_USERNAME, ENV_LDAP_PATH, ENV_TENANT_ID,
};
use crate::types::{Config, Strategy};

/// Outcome of [`validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    /// Environment variable names of the missing settings.
    pub missing: BTreeSet<&'static str>,
}

impl ValidationResult {
    /// True when nothing is missing.
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: Vec<&str> = self.missing.iter().copied().collect();
        f.write_str(&keys.join(", "))
    }
}

/// Check that `config` carries every setting `strategy` requires.
pub fn validate(strategy: Strategy, config: &Config) -> ValidationResult {
    let mut missing = BTreeSet::new();

    match strategy {
        Strategy::CloudByObjectId => {
            let cloud = &config.cloud;
            if cloud.client_id.is_none() {
                missing.insert(ENV_CLIENT_ID);
            }
            if cloud.client_secret.is_none() {
                missing.insert(ENV_CLIENT_SECRET);
            }
            if cloud.tenant_id.is_none() {
                missing.insert(ENV_TENANT_ID);
            }
            if cloud.environment_name.is_none() {
                missing.insert(ENV_CLOUD_ENVIRONMENT);
            }
        }
        Strategy::OnPremBySam | Strategy::OnPremByMail => {
            let directory = &config.directory;
            if directory.location.is_none() {
                missing.insert(ENV_LDAP_PATH);
            }
            if directory.bind_username.is_none() {
                missing.insert(ENV_LDAP_BIND_USERNAME);
            }
            if directory.bind_password.is_none() {
                missing.insert(ENV_LDAP_BIND_PASSWORD);
            }
        }
    }

    ValidationResult { missing }
}
