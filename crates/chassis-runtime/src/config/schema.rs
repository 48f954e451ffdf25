//! Configuration schema definitions.

use std::hash::{Hash, Hasher};
use std::path::PathBuf;

use chassis_core::SettingsMap;
use chassis_framework::plugin::builtin::{FS_CACHE_PLUGIN_ID, FS_LOGGER_PLUGIN_ID};
use serde::{Deserialize, Serialize};

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// The working directory every relative plugin path resolves against.
    /// Absolute and existing after a successful load.
    #[serde(default = "default_cwd")]
    pub cwd: PathBuf,

    /// Logging service configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Cache service configuration.
    #[serde(default)]
    pub cache: CacheConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            cwd: default_cwd(),
            logging: LoggingConfig::default(),
            cache: CacheConfig::default(),
        }
    }
}

fn default_cwd() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

/// A reference to a plugin: its identifier plus the raw settings section the
/// plugin validates for itself.
///
/// Two references are equal when their identifiers are equal; the settings
/// section does not participate in equality or hashing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginRef {
    /// The plugin identifier to resolve.
    pub plugin_id: String,

    /// Raw settings for the plugin. Validation happens in the plugin itself.
    #[serde(default)]
    pub settings: SettingsMap,
}

impl PluginRef {
    /// Creates a reference with an empty settings section.
    pub fn new(plugin_id: impl Into<String>) -> Self {
        Self {
            plugin_id: plugin_id.into(),
            settings: SettingsMap::new(),
        }
    }
}

impl PartialEq for PluginRef {
    fn eq(&self, other: &Self) -> bool {
        self.plugin_id == other.plugin_id
    }
}

impl Eq for PluginRef {}

impl Hash for PluginRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.plugin_id.hash(state);
    }
}

/// Cache service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// When true the cache service reports every key absent and drops every
    /// write without touching the plugin.
    #[serde(default)]
    pub skip_cache: bool,

    /// Clear the cache once during container construction.
    #[serde(default)]
    pub clear_cache: bool,

    /// The cache plugin to resolve.
    #[serde(default = "default_cache_plugin")]
    pub plugin: PluginRef,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            skip_cache: false,
            clear_cache: false,
            plugin: default_cache_plugin(),
        }
    }
}

fn default_cache_plugin() -> PluginRef {
    PluginRef::new(FS_CACHE_PLUGIN_ID)
}

/// Logging service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Attach the caller-supplied source to each record.
    #[serde(default = "default_log_source")]
    pub log_source: bool,

    /// The logging plugins to resolve. Declaration order is fan-out order.
    #[serde(default = "default_logging_plugins")]
    pub plugins: Vec<PluginRef>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_source: default_log_source(),
            plugins: default_logging_plugins(),
        }
    }
}

fn default_log_source() -> bool {
    true
}

fn default_logging_plugins() -> Vec<PluginRef> {
    vec![PluginRef::new(FS_LOGGER_PLUGIN_ID)]
}
