//! # Chassis Framework
//!
//! The plugin system of the chassis bootstrap library.
//!
//! This crate turns abstract plugin references (an identifier plus a raw
//! settings section) into live, capability-typed instances:
//!
//! - [`plugin::Plugin`]: the contract every plugin type implements
//!   (settings derivation + construction)
//! - [`plugin::PluginDescriptor`]: the registry entry pairing both operations
//!   behind a type-erased resolver
//! - [`plugin::Factory`]: the flat identifier→descriptor registry
//! - [`plugin::LogPluginFactory`] / [`plugin::CachePluginFactory`]: typed
//!   sub-factories that hand back capability trait objects
//! - [`plugin::builtin`]: the plugins shipped with chassis (`builtin`
//!   feature, on by default)
//!
//! Resolution is startup-only and synchronous: the runtime resolves every
//! configured reference once, then hands the instances to the service
//! container for the life of the process.

pub mod error;
pub mod plugin;

pub use error::{FactoryError, FactoryResult};
pub use plugin::{
    CachePluginFactory, Factory, LogPluginFactory, Plugin, PluginDescriptor, PluginInstance,
};
