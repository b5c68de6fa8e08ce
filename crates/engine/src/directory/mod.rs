//! UPN resolution against the cloud or on-prem directory.
//!
//! Responsibilities:
//! - Check the active strategy's settings before any outbound call.
//! - Run exactly one strategy per query: cloud by object id, LDAP by
//!   `sAMAccountName`, or LDAP by `mail`.
//!
//! Does NOT handle:
//! - Picking the identifier out of the event (see `event`).
//! - Building the response (see `claims`).
//!
//! Invariants:
//! - No fallback from one strategy to another within a query.
//! - `resolve` never fails: every error is logged and becomes `found = false`.
//! - Nothing (token, bind, connection) outlives one call to `resolve`.

mod cloud;
pub mod ldap;

use std::sync::Arc;

use claims_config::{Config, Strategy, validate};
use reqwest::Client;
use tracing::{info, warn};

use crate::error::{MissingSettings, ResolveError};
pub use ldap::{DirectoryConnector, DirectoryEntry, LdapConnector, OnPremLookup, SearchRequest};

/// What to look up, and how.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionQuery {
    pub strategy: Strategy,
    pub identifier: String,
}

impl ResolutionQuery {
    pub fn new(strategy: Strategy, identifier: impl Into<String>) -> Self {
        Self {
            strategy,
            identifier: identifier.into(),
        }
    }
}

/// Outcome of a lookup. An empty UPN with `found = false` means "no match".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionResult {
    pub upn: String,
    pub found: bool,
}

impl ResolutionResult {
    pub fn found(upn: impl Into<String>) -> Self {
        Self {
            upn: upn.into(),
            found: true,
        }
    }

    pub fn not_found() -> Self {
        Self::default()
    }
}

/// Runs resolution queries against the configured directories.
///
/// Cheap to clone: the configuration, HTTP connection pool and LDAP connector
/// are shared, and none of them hold per-request credentials or tokens.
#[derive(Clone)]
pub struct DirectoryResolver {
    config: Arc<Config>,
    http: Client,
    connector: Arc<dyn DirectoryConnector>,
}

impl DirectoryResolver {
    pub fn new(config: Arc<Config>, http: Client, connector: Arc<dyn DirectoryConnector>) -> Self {
        Self {
            config,
            http,
            connector,
        }
    }

    /// Resolve a UPN, logging and swallowing every failure.
    pub async fn resolve(&self, query: &ResolutionQuery) -> ResolutionResult {
        match self.try_resolve(query).await {
            Ok(result) => result,
            Err(error) => {
                warn!(strategy = %query.strategy, error = %error, "Resolution failed");
                ResolutionResult::not_found()
            }
        }
    }

    /// Resolve a UPN, returning the failure reason instead of logging it.
    pub async fn try_resolve(
        &self,
        query: &ResolutionQuery,
    ) -> Result<ResolutionResult, ResolveError> {
        let missing = missing_settings(query.strategy, &self.config);
        if !missing.missing.is_empty() {
            return Err(missing.into());
        }

        let result = match OnPremLookup::for_strategy(query.strategy) {
            None => cloud::resolve_by_object_id(&self.http, &self.config, &query.identifier).await?,
            Some(lookup) => {
                ldap::resolve_on_prem(
                    self.connector.as_ref(),
                    &self.config,
                    lookup,
                    &query.identifier,
                )
                .await?
            }
        };

        if !result.found {
            info!(strategy = %query.strategy, "No matching user in directory");
        }
        Ok(result)
    }
}

/// Settings for `strategy` that `config` lacks.
pub(crate) fn missing_settings(strategy: Strategy, config: &Config) -> MissingSettings {
    MissingSettings {
        strategy,
        missing: validate(strategy, config).missing,
    }
}
