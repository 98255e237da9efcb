//! # promptrelay-config
//!
//! TOML configuration for promptrelay: schema with defaults, loader with
//! environment variable expansion, merge with the built-in catalog, and
//! validation.

mod error;
mod loader;
mod schema;
mod store;
mod validator;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::{Config, Settings};
pub use store::{config_dir, Store};
pub use validator::{ConfigValidator, ValidationIssue, ValidationResult};
