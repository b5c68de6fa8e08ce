//! Claims resolution for token-issuance events.
//!
//! Decodes an authentication event, resolves the subject's on-premises UPN
//! through the cloud directory or LDAP, and builds the claims payload.

pub mod auth;
pub mod claims;
pub mod directory;
pub mod endpoints;
pub mod engine;
pub mod error;
pub mod event;
pub mod metrics;
pub mod metrics_exporter;
pub mod telemetry;

#[cfg(any(feature = "test-utils", test))]
pub mod testing;

pub use auth::AccessToken;
pub use claims::{API_VERSION, ClaimsResponse, DEFAULT_CUSTOM_ROLES, ResponseContent};
pub use directory::{
    DirectoryConnector, DirectoryEntry, DirectoryResolver, LdapConnector, ResolutionQuery,
    ResolutionResult, SearchRequest,
};
pub use engine::{ResolutionEngine, ResolutionEngineBuilder};
pub use error::{BuildError, DirectoryError, MissingSettings, ParseError, ResolveError, TokenError};
pub use event::{AuthenticationEvent, parse_event};
pub use metrics::{ErrorCategory, MetricsCollector, Outcome};
