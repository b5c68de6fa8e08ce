//! On-prem directory (LDAP) settings.
//!
//! Responsibilities:
//! - Hold the bind target and service credentials for on-prem lookups.
//! - Parse directory paths of the form `ldap[s]://host[:port]/base-dn`, including
//!   the connection-string variant that embeds `user:password@` credentials.
//!
//! Does NOT handle:
//! - Connecting or binding (see the engine crate's `directory::ldap` module).
//!
//! Invariants:
//! - `DirectoryLocation::url` never carries credentials and never has a path.
//! - The base DN is percent-decoded and may be empty (directory default context).

use percent_encoding::percent_decode_str;
use secrecy::SecretString;

use crate::constants::{DEFAULT_LDAP_PORT, DEFAULT_LDAPS_PORT};

/// Where to bind and search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryLocation {
    /// Server URL without credentials or path, e.g. `ldap://dc01.contoso.com:389`.
    pub url: String,
    /// Search base, e.g. `DC=contoso,DC=com`.
    pub base_dn: String,
}

/// Result of parsing a directory path or connection string.
#[derive(Debug, Clone)]
pub struct ParsedDirectoryUrl {
    pub location: DirectoryLocation,
    pub username: Option<String>,
    pub password: Option<SecretString>,
}

impl DirectoryLocation {
    /// Parse `ldap[s]://[user[:password]@]host[:port]/base-dn`.
    ///
    /// The scheme is matched case-insensitively, so `LDAP://dc01/DC=contoso,DC=com`
    /// is accepted.
    pub fn parse(raw: &str) -> Result<ParsedDirectoryUrl, String> {
        let parsed = url::Url::parse(raw.trim())
            .map_err(|e| format!("must be an ldap:// or ldaps:// URL with a host: {e}"))?;

        let default_port = match parsed.scheme() {
            "ldap" => DEFAULT_LDAP_PORT,
            "ldaps" => DEFAULT_LDAPS_PORT,
            other => return Err(format!("scheme must be ldap or ldaps, got: {other}")),
        };

        let host = parsed
            .host_str()
            .filter(|h| !h.is_empty())
            .ok_or_else(|| "host is required (e.g. ldap://dc01.contoso.com)".to_string())?;
        let port = parsed.port().unwrap_or(default_port);

        let base_dn = decode(parsed.path().trim_start_matches('/'))?;

        let username = match parsed.username() {
            "" => None,
            encoded => Some(decode(encoded)?),
        };
        let password = parsed
            .password()
            .map(decode)
            .transpose()?
            .filter(|p| !p.is_empty())
            .map(|p| SecretString::new(p.into()));

        Ok(ParsedDirectoryUrl {
            location: DirectoryLocation {
                url: format!("{}://{}:{}", parsed.scheme(), host, port),
                base_dn,
            },
            username,
            password,
        })
    }
}

fn decode(value: &str) -> Result<String, String> {
    percent_decode_str(value)
        .decode_utf8()
        .map(|s| s.into_owned())
        .map_err(|_| "contains invalid percent-encoded UTF-8".to_string())
}

/// Settings for the on-prem lookup strategies.
#[derive(Debug, Clone, Default)]
pub struct DirectoryConfig {
    /// Bind target and search base.
    pub location: Option<DirectoryLocation>,
    /// Bind DN or `user@domain`.
    pub bind_username: Option<String>,
    /// Bind password.
    pub bind_password: Option<SecretString>,
}
