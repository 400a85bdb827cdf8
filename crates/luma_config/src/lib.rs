//! Parsing and validation of `luma.toml` run configuration files.
//!
//! This crate reads the run configuration file and produces a strongly-typed
//! [`RunConfig`] with validated weights, clock period, and pipeline settings.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str, parse_period};
pub use types::*;
