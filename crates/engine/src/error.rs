//! Error types for the resolution engine.
//!
//! Invariants:
//! - No variant carries a client secret, bind password or bearer token, so
//!   `Display` and `Debug` output is always safe to log.
//! - Only `ParseError` ever reaches the HTTP boundary. Everything else is
//!   logged and converted into an unresolved outcome.

use std::collections::BTreeSet;
use std::fmt;
use std::time::Duration;

use claims_config::Strategy;
use thiserror::Error;

/// The inbound event could not be used.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Body is not JSON or does not match the event shape.
    #[error("malformed request body: {0}")]
    MalformedBody(String),

    /// None of object id, mail, UPN or name is present.
    #[error("request does not identify a user (expected an object id, mail, userPrincipalName or name)")]
    MissingSubject,
}

/// The client-credentials grant failed.
#[derive(Error, Debug)]
pub enum TokenError {
    /// Network failure or timeout.
    #[error("token request to {uri} failed: {source}")]
    Transport {
        uri: String,
        #[source]
        source: reqwest::Error,
    },

    /// Token endpoint answered with a non-success status.
    #[error("token request to {uri} returned HTTP {status}")]
    HttpStatus { uri: String, status: u16 },

    /// Body is not JSON or has no usable `access_token`.
    #[error("token response from {uri} is invalid: {message}")]
    BadResponse { uri: String, message: String },
}

/// A directory lookup failed.
#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("failed to connect to directory {url}: {message}")]
    Connect { url: String, message: String },

    #[error("directory bind to {url} failed: {message}")]
    Bind { url: String, message: String },

    #[error("directory search on {url} failed: {message}")]
    Search { url: String, message: String },

    #[error("directory {operation} on {url} timed out after {after:?}")]
    Timeout {
        operation: &'static str,
        url: String,
        after: Duration,
    },

    #[error("directory request to {uri} returned HTTP {status}")]
    HttpStatus { uri: String, status: u16 },

    #[error("directory request to {uri} failed: {source}")]
    Transport {
        uri: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("directory response from {uri} is invalid: {message}")]
    BadResponse { uri: String, message: String },
}

/// The active strategy lacks required settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingSettings {
    pub strategy: Strategy,
    /// Environment variable names, sorted.
    pub missing: BTreeSet<&'static str>,
}

impl fmt::Display for MissingSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: Vec<&str> = self.missing.iter().copied().collect();
        write!(
            f,
            "strategy {} is missing settings: {}",
            self.strategy,
            keys.join(", ")
        )
    }
}

impl std::error::Error for MissingSettings {}

/// Every reason a resolution can end without a UPN, short of "no match".
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error(transparent)]
    MissingSettings(#[from] MissingSettings),

    #[error("event has no identifier usable by strategy {strategy}")]
    MissingIdentifier { strategy: Strategy },

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Directory(#[from] DirectoryError),
}

/// Failure while assembling a [`crate::ResolutionEngine`].
#[derive(Error, Debug)]
pub enum BuildError {
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}
