//! Per-request sequencing: parse, validate, resolve, build.
//!
//! This module is responsible for:
//! - Building the shared HTTP client and resolver from configuration
//! - Running one request end to end and recording its metrics
//!
//! # What this module does NOT handle:
//! - HTTP routing and status codes (see the server crate)
//! - Strategy details (see `directory`)
//!
//! # Invariants
//! - Only a [`ParseError`] escapes [`ResolutionEngine::handle`]; every
//!   downstream failure becomes an empty UPN
//! - The response is built after resolution finishes, never partially

use std::sync::Arc;
use std::time::{Duration, Instant};

use claims_config::{Config, Strategy, constants::DEFAULT_MAX_REDIRECTS};
use tracing::{Span, debug, warn};

use crate::claims::ClaimsResponse;
use crate::directory::{
    DirectoryConnector, DirectoryResolver, LdapConnector, ResolutionQuery, ResolutionResult,
};
use crate::error::{BuildError, ParseError, ResolveError};
use crate::event::parse_event;
use crate::metrics::{MetricsCollector, Outcome};

/// Builder for [`ResolutionEngine`].
///
/// ```rust,ignore
/// let engine = ResolutionEngine::builder()
///     .from_config(Arc::new(config))
///     .metrics(MetricsCollector::new())
///     .build()?;
/// ```
#[derive(Default)]
pub struct ResolutionEngineBuilder {
    config: Option<Arc<Config>>,
    connector: Option<Arc<dyn DirectoryConnector>>,
    metrics: Option<MetricsCollector>,
}

impl ResolutionEngineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `config` for the strategy, credentials and timeout.
    pub fn from_config(mut self, config: Arc<Config>) -> Self {
        self.config = Some(config);
        self
    }

    /// Replace the `ldap3` connector, e.g. with an in-memory directory.
    pub fn connector(mut self, connector: Arc<dyn DirectoryConnector>) -> Self {
        self.connector = Some(connector);
        self
    }

    pub fn metrics(mut self, metrics: MetricsCollector) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Build the engine. Without a config, [`Config::default`] is used, which
    /// selects the cloud strategy with no credentials.
    ///
    /// # Errors
    /// Returns [`BuildError::HttpClient`] if the HTTP client fails to build.
    pub fn build(self) -> Result<ResolutionEngine, BuildError> {
        let config = self.config.unwrap_or_default();

        let http = reqwest::Client::builder()
            .timeout(config.connection.timeout)
            .redirect(reqwest::redirect::Policy::limited(DEFAULT_MAX_REDIRECTS))
            .build()?;

        let connector = self
            .connector
            .unwrap_or_else(|| Arc::new(LdapConnector));

        Ok(ResolutionEngine {
            strategy: config.strategy,
            resolver: DirectoryResolver::new(config, http, connector),
            metrics: self.metrics.unwrap_or_default(),
        })
    }
}

/// Turns one inbound event into one claims response.
///
/// Cheap to clone; clones share the HTTP connection pool.
#[derive(Clone)]
pub struct ResolutionEngine {
    strategy: Strategy,
    resolver: DirectoryResolver,
    metrics: MetricsCollector,
}

impl ResolutionEngine {
    pub fn builder() -> ResolutionEngineBuilder {
        ResolutionEngineBuilder::new()
    }

    /// The strategy every request runs.
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Parse `body`, resolve the subject's UPN and build the response.
    ///
    /// `name` is the optional `name` query parameter.
    ///
    /// # Errors
    /// Returns [`ParseError`] when the body is malformed or carries no subject.
    /// Resolution failures are logged and yield a response without a UPN.
    #[tracing::instrument(
        skip_all,
        fields(correlation_id = tracing::field::Empty, strategy = %self.strategy)
    )]
    pub async fn handle(
        &self,
        body: &[u8],
        name: Option<&str>,
    ) -> Result<ClaimsResponse, ParseError> {
        let event = match parse_event(body, name) {
            Ok(event) => event,
            Err(error) => {
                warn!(error = %error, "Rejected authentication event");
                self.metrics.record_rejected(&error);
                return Err(error);
            }
        };
        Span::current().record("correlation_id", event.correlation_id.as_str());

        let started = Instant::now();
        let result = match event.identifier_for(self.strategy) {
            Some(identifier) => {
                let query = ResolutionQuery::new(self.strategy, identifier);
                self.resolver.try_resolve(&query).await
            }
            None => Err(ResolveError::MissingIdentifier {
                strategy: self.strategy,
            }),
        };
        let result = self.finish(result, started.elapsed());

        debug!(found = result.found, "Building claims response");
        Ok(ClaimsResponse::with_default_roles(
            event.correlation_id,
            result.upn,
        ))
    }

    fn finish(
        &self,
        result: Result<ResolutionResult, ResolveError>,
        elapsed: Duration,
    ) -> ResolutionResult {
        match result {
            Ok(result) => {
                let outcome = if result.found {
                    Outcome::Found
                } else {
                    Outcome::NotFound
                };
                self.metrics
                    .record_resolution(self.strategy, outcome, elapsed);
                result
            }
            Err(error) => {
                warn!(error = %error, "Resolution failed, responding without UPN");
                self.metrics.record_error(self.strategy, &error);
                self.metrics
                    .record_resolution(self.strategy, Outcome::Error, elapsed);
                ResolutionResult::not_found()
            }
        }
    }
}
