//! Tests for the configuration loader.
//!
//! Invariants:
//! - Tests use `serial_test` and `global_test_lock()` to prevent environment variable pollution.
//! - Every env-driven test clears all `CLAIMS_*` variables it does not set.

use std::sync::Mutex;

use crate::constants::{
    ENV_BIND_ADDR, ENV_CLIENT_ID, ENV_CLIENT_SECRET, ENV_CLOUD_ENVIRONMENT, ENV_GRAPH_BASE_URL,
    ENV_LDAP_BIND_PASSWORD, ENV_LDAP_BIND_USERNAME, ENV_LDAP_CONNECTION, ENV_LDAP_PATH,
    ENV_LOGIN_BASE_URL, ENV_STRATEGY, ENV_TENANT_ID, ENV_TIMEOUT,
};

pub mod env_tests;

/// Returns the global test lock for environment variable isolation.
pub fn env_lock() -> &'static Mutex<()> {
    crate::test_util::global_test_lock()
}

const ALL_VARS: [&str; 13] = [
    ENV_STRATEGY,
    ENV_CLIENT_ID,
    ENV_CLIENT_SECRET,
    ENV_TENANT_ID,
    ENV_CLOUD_ENVIRONMENT,
    ENV_LOGIN_BASE_URL,
    ENV_GRAPH_BASE_URL,
    ENV_LDAP_PATH,
    ENV_LDAP_BIND_USERNAME,
    ENV_LDAP_BIND_PASSWORD,
    ENV_LDAP_CONNECTION,
    ENV_TIMEOUT,
    ENV_BIND_ADDR,
];

/// Run `f` with exactly the given `CLAIMS_*` variables set and all others unset.
pub fn with_claims_env<R>(vars: &[(&'static str, &'static str)], f: impl FnOnce() -> R) -> R {
    let mut kvs: Vec<(&'static str, Option<&'static str>)> =
        ALL_VARS.iter().map(|key| (*key, None)).collect();
    for (key, value) in vars {
        match kvs.iter_mut().find(|(k, _)| k == key) {
            Some(slot) => slot.1 = Some(*value),
            None => kvs.push((*key, Some(*value))),
        }
    }
    temp_env::with_vars(kvs, f)
}
