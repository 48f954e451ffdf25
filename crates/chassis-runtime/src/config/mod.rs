//! Configuration module for the chassis runtime.
//!
//! This module provides layered configuration loading and validation for the
//! service container: built-in defaults, an optional discovered or named
//! configuration file, environment variables, and caller overrides, merged in
//! that order.

pub mod error;
pub mod loader;
pub mod schema;
pub mod validation;

pub use error::{ConfigError, ConfigResult};
pub use loader::{CONFIG_STEM, SUPPORTED_EXTENSIONS, load_config};
pub use schema::{AppConfig, CacheConfig, LoggingConfig, PluginRef};
pub use validation::validate_config;
