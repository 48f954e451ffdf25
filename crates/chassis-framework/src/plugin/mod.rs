//! Plugin system for the chassis bootstrap library.
//!
//! # Architecture
//!
//! A plugin is a replaceable behavior unit selected by a string identifier
//! and configured through its own settings schema. Turning a configured
//! reference into a live instance is a two-stage pipeline:
//!
//! 1. **Settings derivation**: the plugin deserializes and validates its raw
//!    settings section into a typed value, resolving relative paths against
//!    the working directory. Pure; no side effects.
//! 2. **Construction**: the plugin builds itself from the validated
//!    settings, creating directories and opening files as needed.
//!
//! Both stages live on the [`Plugin`] trait. A [`PluginDescriptor`] pairs
//! them behind a type-erased resolver so descriptors for unrelated plugin
//! types can share one registry. The [`Factory`] owns that registry; the
//! typed sub-factories ([`LogPluginFactory`], [`CachePluginFactory`]) add a
//! capability check on top and hand back trait objects ready for the service
//! container.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use chassis_framework::plugin::{LogPluginFactory, builtin};
//!
//! let mut factory = LogPluginFactory::new();
//! factory.register::<builtin::FsLogger>(builtin::FS_LOGGER_PLUGIN_ID)?;
//!
//! let sink = factory.resolve("fs-logger", cwd, &raw_settings)?;
//! sink.log(&record)?;
//! ```
//!
//! # Third-party plugins
//!
//! Implement [`Plugin`] plus the capability trait, then register under a new
//! identifier in the same flat namespace:
//!
//! ```rust,ignore
//! struct SyslogPlugin { /* … */ }
//!
//! impl Plugin for SyslogPlugin {
//!     type Settings = SyslogSettings;
//!     fn derive_settings(cwd: &Path, raw: &SettingsMap) -> Result<SyslogSettings, SettingsError> { /* … */ }
//!     fn construct(settings: SyslogSettings) -> Result<Self, ConstructionError> { /* … */ }
//! }
//!
//! impl LogPlugin for SyslogPlugin { /* … */ }
//!
//! factory.register::<SyslogPlugin>("syslog")?;
//! ```

pub mod contract;
pub mod descriptor;
pub mod factory;

#[cfg(feature = "builtin")]
pub mod builtin;

pub use contract::Plugin;
pub use descriptor::{PluginDescriptor, PluginInstance};
pub use factory::{CachePluginFactory, Factory, LogPluginFactory};
