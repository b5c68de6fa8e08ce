//! On-prem LDAP lookups by `sAMAccountName` or `mail`.
//!
//! Responsibilities:
//! - Build escaped search filters and pick the matching entry.
//! - Bind and search through a [`DirectoryConnector`]; [`LdapConnector`] is the
//!   `ldap3` implementation.
//!
//! Invariants:
//! - Filter values are escaped (RFC 4515) before interpolation.
//! - Attribute names are matched case-insensitively on returned entries.
//! - One connection per search; it is unbound before the search returns.
//! - Every connect, bind and search is bounded by the configured timeout.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use claims_config::{Config, Strategy};
use ldap3::{LdapConnAsync, LdapConnSettings, Scope, SearchEntry, ldap_escape};
use secrecy::{ExposeSecret, SecretString};
use tokio::time::timeout;
use tracing::{debug, warn};

use super::{ResolutionResult, missing_settings};
use crate::error::{DirectoryError, ResolveError};

pub const ATTR_SAM_ACCOUNT_NAME: &str = "sAMAccountName";
pub const ATTR_USER_PRINCIPAL_NAME: &str = "userPrincipalName";
pub const ATTR_MAIL: &str = "mail";

const SEARCH_ATTRIBUTES: [&str; 3] = [ATTR_SAM_ACCOUNT_NAME, ATTR_USER_PRINCIPAL_NAME, ATTR_MAIL];

/// One bind-and-search against a directory server.
pub struct SearchRequest<'a> {
    /// Server URL, e.g. `ldap://dc01.contoso.com:389`.
    pub url: &'a str,
    pub base_dn: &'a str,
    pub bind_username: &'a str,
    pub bind_password: &'a SecretString,
    pub filter: String,
    pub attributes: &'a [&'a str],
    /// Applied to connect, bind and search separately.
    pub timeout: Duration,
}

/// A search result entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub dn: String,
    pub attrs: HashMap<String, Vec<String>>,
}

impl DirectoryEntry {
    pub fn new(dn: impl Into<String>) -> Self {
        Self {
            dn: dn.into(),
            attrs: HashMap::new(),
        }
    }

    /// Add a single-valued attribute.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.entry(name.into()).or_default().push(value.into());
        self
    }

    /// First value of `name`, matching the attribute name case-insensitively.
    pub fn first(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .and_then(|(_, values)| values.first())
            .map(String::as_str)
    }

    fn upn(&self) -> Option<&str> {
        self.first(ATTR_USER_PRINCIPAL_NAME)
            .map(str::trim)
            .filter(|upn| !upn.is_empty())
    }
}

/// Transport for directory searches.
#[async_trait]
pub trait DirectoryConnector: Send + Sync {
    /// Bind with the request's credentials, search the subtree under its base
    /// DN, and return every entry.
    async fn search(&self, request: &SearchRequest<'_>) -> Result<Vec<DirectoryEntry>, DirectoryError>;
}

/// `ldap3`-backed connector. Opens a fresh connection for every search.
#[derive(Debug, Clone, Copy, Default)]
pub struct LdapConnector;

#[async_trait]
impl DirectoryConnector for LdapConnector {
    async fn search(&self, request: &SearchRequest<'_>) -> Result<Vec<DirectoryEntry>, DirectoryError> {
        let settings = LdapConnSettings::new().set_conn_timeout(request.timeout);
        let (conn, mut ldap) = timeout(
            request.timeout,
            LdapConnAsync::with_settings(settings, request.url),
        )
        .await
        .map_err(|_| DirectoryError::Timeout {
            operation: "connect",
            url: request.url.to_string(),
            after: request.timeout,
        })?
        .map_err(|e| DirectoryError::Connect {
            url: request.url.to_string(),
            message: e.to_string(),
        })?;

        let url = request.url.to_string();
        tokio::spawn(async move {
            if let Err(e) = conn.drive().await {
                warn!(url = %url, error = %e, "LDAP connection closed with error");
            }
        });

        let outcome = bind_and_search(&mut ldap, request).await;

        if let Err(e) = ldap.unbind().await {
            debug!(url = %request.url, error = %e, "LDAP unbind failed");
        }
        outcome
    }
}

async fn bind_and_search(
    ldap: &mut ldap3::Ldap,
    request: &SearchRequest<'_>,
) -> Result<Vec<DirectoryEntry>, DirectoryError> {
    let timed_out = |operation: &'static str| DirectoryError::Timeout {
        operation,
        url: request.url.to_string(),
        after: request.timeout,
    };

    timeout(
        request.timeout,
        ldap.simple_bind(request.bind_username, request.bind_password.expose_secret()),
    )
    .await
    .map_err(|_| timed_out("bind"))?
    .and_then(|result| result.success())
    .map_err(|e| DirectoryError::Bind {
        url: request.url.to_string(),
        message: e.to_string(),
    })?;

    let (entries, _) = timeout(
        request.timeout,
        ldap.search(
            request.base_dn,
            Scope::Subtree,
            &request.filter,
            request.attributes.to_vec(),
        ),
    )
    .await
    .map_err(|_| timed_out("search"))?
    .and_then(|result| result.success())
    .map_err(|e| DirectoryError::Search {
        url: request.url.to_string(),
        message: e.to_string(),
    })?;

    Ok(entries
        .into_iter()
        .map(|entry| {
            let entry = SearchEntry::construct(entry);
            DirectoryEntry {
                dn: entry.dn,
                attrs: entry.attrs,
            }
        })
        .collect())
}

/// `(&(objectClass=user)(sAMAccountName={identifier}))`, escaped.
pub fn sam_filter(identifier: &str) -> String {
    format!(
        "(&(objectClass=user)({}={}))",
        ATTR_SAM_ACCOUNT_NAME,
        ldap_escape(identifier)
    )
}

/// `(&(objectClass=user)(mail={identifier}))`, escaped.
pub fn mail_filter(identifier: &str) -> String {
    format!(
        "(&(objectClass=user)({}={}))",
        ATTR_MAIL,
        ldap_escape(identifier)
    )
}

/// UPN of the first entry whose `sAMAccountName` equals `identifier`, ignoring case.
pub fn select_by_sam<'a>(entries: &'a [DirectoryEntry], identifier: &str) -> Option<&'a str> {
    let wanted = identifier.to_lowercase();
    entries
        .iter()
        .find(|entry| {
            entry
                .first(ATTR_SAM_ACCOUNT_NAME)
                .is_some_and(|sam| sam.to_lowercase() == wanted)
        })
        .and_then(DirectoryEntry::upn)
}

/// UPN of the first entry that has one.
///
/// The entry's `mail` is not compared against the queried address; the server
/// filter is trusted.
pub fn select_by_mail(entries: &[DirectoryEntry]) -> Option<&str> {
    entries.iter().find_map(DirectoryEntry::upn)
}

/// Which attribute an on-prem search matches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnPremLookup {
    BySam,
    ByMail,
}

impl OnPremLookup {
    /// The on-prem lookup for `strategy`, or `None` for the cloud strategy.
    pub fn for_strategy(strategy: Strategy) -> Option<Self> {
        match strategy {
            Strategy::OnPremBySam => Some(OnPremLookup::BySam),
            Strategy::OnPremByMail => Some(OnPremLookup::ByMail),
            Strategy::CloudByObjectId => None,
        }
    }

    pub fn strategy(self) -> Strategy {
        match self {
            OnPremLookup::BySam => Strategy::OnPremBySam,
            OnPremLookup::ByMail => Strategy::OnPremByMail,
        }
    }

    /// Escaped search filter for `identifier`.
    pub fn filter(self, identifier: &str) -> String {
        match self {
            OnPremLookup::BySam => sam_filter(identifier),
            OnPremLookup::ByMail => mail_filter(identifier),
        }
    }

    /// UPN picked from the search results.
    pub fn select<'a>(self, entries: &'a [DirectoryEntry], identifier: &str) -> Option<&'a str> {
        match self {
            OnPremLookup::BySam => select_by_sam(entries, identifier),
            OnPremLookup::ByMail => select_by_mail(entries),
        }
    }
}

/// Run the sam or mail lookup.
pub(super) async fn resolve_on_prem(
    connector: &dyn DirectoryConnector,
    config: &Config,
    lookup: OnPremLookup,
    identifier: &str,
) -> Result<ResolutionResult, ResolveError> {
    let directory = &config.directory;
    let (Some(location), Some(bind_username), Some(bind_password)) = (
        directory.location.as_ref(),
        directory.bind_username.as_deref(),
        directory.bind_password.as_ref(),
    ) else {
        return Err(missing_settings(lookup.strategy(), config).into());
    };

    let filter = lookup.filter(identifier);
    debug!(url = %location.url, base_dn = %location.base_dn, filter = %filter, "Searching directory");

    let request = SearchRequest {
        url: &location.url,
        base_dn: &location.base_dn,
        bind_username,
        bind_password,
        filter,
        attributes: &SEARCH_ATTRIBUTES,
        timeout: config.connection.timeout,
    };
    let entries = connector.search(&request).await?;
    debug!(entries = entries.len(), "Directory search returned");

    let upn = lookup.select(&entries, identifier);
    Ok(upn.map(ResolutionResult::found).unwrap_or_default())
}
