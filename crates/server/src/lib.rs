//! Claims provider HTTP service.

pub mod app;
pub mod args;

pub use app::build_app;
