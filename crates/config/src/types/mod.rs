//! Configuration type definitions for the claims provider.
//!
//! Responsibilities:
//! - Define the resolution strategy selector and the cloud environment discriminator.
//! - Define cloud (client-credentials) and on-prem directory settings.
//! - Define the main `Config` structure combining strategy, credentials and connection limits.
//!
//! Does NOT handle:
//! - Configuration loading from environment variables (see `loader` module).
//! - Deciding whether a strategy is fully configured (see `validation` module).
//! - Actual network connections or token exchange (see engine crate).
//!
//! Invariants:
//! - All secret types use `secrecy::SecretString` to prevent accidental logging.
//! - Credential fields are optional here; absence is reported per request, not at load time.

mod cloud;
mod connection;
mod directory;
mod strategy;

pub use cloud::{CloudConfig, CloudEnvironment};
pub use connection::{Config, ConnectionConfig};
pub use directory::{DirectoryConfig, DirectoryLocation, ParsedDirectoryUrl};
pub use strategy::{Strategy, UnknownStrategy};
