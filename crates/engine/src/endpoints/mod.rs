//! Outbound HTTP endpoint implementations.
//!
//! Free functions taking a shared `reqwest::Client` and the resolved base URL,
//! one per remote operation. Credentials are passed in per call and never stored.

mod graph;
mod request;
mod token;
pub mod url_encoding;

pub use graph::{GraphUser, get_on_prem_upn};
pub use token::acquire_token;
