//! # Chassis
//!
//! A pluggable application bootstrap library.
//!
//! ## Overview
//!
//! Chassis discovers configuration from layered sources, resolves abstract
//! plugin references into concrete instances through typed registries, and
//! publishes ready-to-use services (a multiplexing log service and a
//! content-addressed cache) for application code to consume.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐     ┌─────────────────┐     ┌──────────────────────────┐
//! │ Config Loader│────▶│ Plugin Factories│────▶│ ServiceContainer         │
//! │ defaults     │     │ id → descriptor │     │  LogService  (fan-out)   │──▶ app code
//! │ < file < env │     │ settings → inst │     │  CacheService (policy)   │
//! │ < overrides  │     └─────────────────┘     └──────────────────────────┘
//! └──────────────┘
//! ```
//!
//! - **Config Loader**: merges defaults, a discovered or named configuration
//!   file, `CHASSIS_*` environment variables, and caller overrides
//! - **Factories**: flat identifier→descriptor registries, one per service
//!   kind; plugins validate their own settings
//! - **Services**: composed once at startup from the resolved instances,
//!   owned for the life of the process
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use chassis::prelude::*;
//!
//! fn main() -> Result<(), chassis::runtime::RuntimeError> {
//!     let services = load_service_container(
//!         Some(Path::new(".")),
//!         serde_json::json!({ "cache": { "clear_cache": true } }),
//!     )?;
//!
//!     services.log().info("application starting")?;
//!     services.cache().set("greeting", "hello")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Third-party plugins
//!
//! Implement [`Plugin`](framework::plugin::Plugin) plus a capability trait,
//! register the type under a new identifier, and reference it from the
//! configuration:
//!
//! ```rust,ignore
//! let mut factories = PluginFactories::with_builtins()?;
//! factories.logging.register::<SyslogPlugin>("syslog")?;
//! let services = ServiceContainer::build(&config, &factories)?;
//! ```

pub use chassis_core as core;
pub use chassis_framework as framework;
pub use chassis_runtime as runtime;

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use chassis::prelude::*;
/// ```
pub mod prelude {
    // Runtime - main entry points
    pub use chassis_runtime::{
        AppConfig, PluginFactories, ServiceContainer, load_config, load_service_container,
    };

    // Plugin system - for writing third-party plugins
    pub use chassis_framework::plugin::{Factory, Plugin, PluginDescriptor};
    pub use chassis_framework::{CachePluginFactory, FactoryError, LogPluginFactory};

    // Core types - capabilities and records
    pub use chassis_core::{
        CachePlugin, LogLevel, LogPlugin, LogRecord, SettingsError, SettingsMap,
    };
}
