//! # Chassis Runtime
//!
//! The orchestration layer of the chassis bootstrap library.
//!
//! This crate wires the pieces together at startup:
//!
//! - Layered configuration loading ([`config::load_config`]): built-in
//!   defaults, a discovered or named configuration file, `CHASSIS_*`
//!   environment variables, and caller overrides, merged in that order
//! - Plugin resolution and service composition
//!   ([`services::ServiceContainer`]): every configured plugin reference is
//!   resolved once through the typed factories, fail-fast
//! - The one-call bootstrap ([`services::load_service_container`])
//!
//! Everything is synchronous and happens exactly once at startup; the
//! resulting container is the application's handle on the composed services
//! for the rest of the process lifetime.
//!
//! # Example
//!
//! ```rust,ignore
//! use chassis_runtime::load_service_container;
//!
//! let services = load_service_container(
//!     Some(Path::new("./project")),
//!     serde_json::json!({ "cache": { "skip_cache": true } }),
//! )?;
//!
//! services.log().info("application starting")?;
//! assert_eq!(services.cache().get("anything")?, None);
//! ```

pub mod config;
pub mod error;
pub mod services;

pub use config::{AppConfig, ConfigError, ConfigResult, load_config};
pub use error::{RuntimeError, RuntimeResult};
pub use services::{CacheService, LogService, PluginFactories, ServiceContainer, load_service_container};
