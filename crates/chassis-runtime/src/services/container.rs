//! The service container: resolution and composition of configured plugins.

use std::path::Path;

use chassis_framework::plugin::builtin::{
    CONSOLE_PLUGIN_ID, ConsoleLogger, FS_CACHE_PLUGIN_ID, FS_LOGGER_PLUGIN_ID, FsCache, FsLogger,
};
use chassis_framework::{CachePluginFactory, FactoryResult, LogPluginFactory};
use serde_json::Value;
use tracing::info;

use crate::config::{AppConfig, load_config};
use crate::error::RuntimeResult;

use super::cache::CacheService;
use super::log::LogService;

// =============================================================================
// PluginFactories
// =============================================================================

/// The factories the container resolves plugins through, one per service
/// kind.
///
/// Register third-party plugins into the matching factory before building the
/// container; all factories share the flat identifier namespace convention.
#[derive(Debug, Default)]
pub struct PluginFactories {
    /// Factory for logging plugins.
    pub logging: LogPluginFactory,
    /// Factory for cache plugins.
    pub cache: CachePluginFactory,
}

impl PluginFactories {
    /// Creates factories with nothing registered.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates factories with the built-in plugins registered:
    /// `fs-logger` and `console` for logging, `fs-cache` for caching.
    pub fn with_builtins() -> FactoryResult<Self> {
        let mut factories = Self::empty();
        factories.logging.register::<FsLogger>(FS_LOGGER_PLUGIN_ID)?;
        factories.logging.register::<ConsoleLogger>(CONSOLE_PLUGIN_ID)?;
        factories.cache.register::<FsCache>(FS_CACHE_PLUGIN_ID)?;
        Ok(factories)
    }
}

// =============================================================================
// ServiceContainer
// =============================================================================

/// Ready-to-use services composed from resolved plugin instances.
///
/// Construction is the only lifecycle moment: every configured plugin
/// reference is resolved exactly once, in declaration order, and any failure
/// aborts the build with no partial service set. The container owns the
/// instances for the life of the process; dropping it drops every plugin and
/// releases their handles on all exit paths.
pub struct ServiceContainer {
    log: LogService,
    cache: CacheService,
}

impl ServiceContainer {
    /// Resolves the configuration's plugin references through `factories`
    /// and composes the services.
    pub fn build(config: &AppConfig, factories: &PluginFactories) -> RuntimeResult<Self> {
        let mut sinks = Vec::with_capacity(config.logging.plugins.len());
        for reference in &config.logging.plugins {
            let sink =
                factories
                    .logging
                    .resolve(&reference.plugin_id, &config.cwd, &reference.settings)?;
            sinks.push(sink);
        }

        let cache_ref = &config.cache.plugin;
        let cache_plugin =
            factories
                .cache
                .resolve(&cache_ref.plugin_id, &config.cwd, &cache_ref.settings)?;
        let cache = CacheService::new(
            cache_plugin,
            config.cache.skip_cache,
            config.cache.clear_cache,
        )?;

        info!(
            log_plugins = sinks.len(),
            cache_plugin = %cache_ref.plugin_id,
            skip_cache = config.cache.skip_cache,
            "Service container ready"
        );

        Ok(Self {
            log: LogService::new(sinks, config.logging.log_source),
            cache,
        })
    }

    /// The multiplexing log service.
    pub fn log(&self) -> &LogService {
        &self.log
    }

    /// The cache service.
    pub fn cache(&self) -> &CacheService {
        &self.cache
    }
}

/// Loads the configuration and builds a container over the built-in plugins.
///
/// The one-call bootstrap for hosts without third-party plugins: equivalent
/// to [`load_config`] followed by [`ServiceContainer::build`] with
/// [`PluginFactories::with_builtins`].
pub fn load_service_container(
    path: Option<&Path>,
    overrides: Value,
) -> RuntimeResult<ServiceContainer> {
    let config = load_config(path, overrides)?;
    let factories = PluginFactories::with_builtins()?;
    ServiceContainer::build(&config, &factories)
}
