//! Configuration management for the claims provider.
//!
//! This crate provides types and loaders for the resolution strategy, cloud
//! client-credentials settings and on-prem directory settings, sourced from
//! environment variables.

pub mod constants;
mod loader;
pub mod types;
pub mod validation;

pub use loader::{ConfigError, ConfigLoader, env_var_or_none};
pub use types::{
    CloudConfig, CloudEnvironment, Config, ConnectionConfig, DirectoryConfig, DirectoryLocation,
    Strategy, UnknownStrategy,
};
pub use validation::{ValidationResult, validate};
