//! Plugin factories: identifier-to-descriptor registries.

use std::collections::HashMap;
use std::path::Path;

use chassis_core::{CachePlugin, LogPlugin, SettingsMap};
use tracing::debug;

use super::contract::Plugin;
use super::descriptor::{PluginDescriptor, PluginInstance, ResolveError};
use crate::error::{FactoryError, FactoryResult};

// =============================================================================
// Generic Factory
// =============================================================================

/// The generic plugin registry: a flat, case-sensitive mapping from
/// identifier to [`PluginDescriptor`].
///
/// Lookup is O(1). The first registration of an identifier wins; later ones
/// are rejected with [`FactoryError::DuplicateRegistration`]. Resolution
/// never caches; every call constructs a fresh, independent instance.
#[derive(Debug, Default)]
pub struct Factory {
    descriptors: HashMap<String, PluginDescriptor>,
}

impl Factory {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a descriptor under `identifier`.
    pub fn register(
        &mut self,
        identifier: impl Into<String>,
        descriptor: PluginDescriptor,
    ) -> FactoryResult<()> {
        let identifier = identifier.into();
        if self.descriptors.contains_key(&identifier) {
            return Err(FactoryError::DuplicateRegistration(identifier));
        }
        debug!(plugin = %identifier, "Registered plugin");
        self.descriptors.insert(identifier, descriptor);
        Ok(())
    }

    /// Resolves `identifier` into a live instance.
    ///
    /// Derives settings and constructs in one pass. Settings failures are
    /// wrapped with the identifier to preserve attribution; construction
    /// failures propagate verbatim.
    pub fn resolve(
        &self,
        identifier: &str,
        cwd: &Path,
        raw: &SettingsMap,
    ) -> FactoryResult<PluginInstance> {
        let descriptor = self
            .descriptors
            .get(identifier)
            .ok_or_else(|| FactoryError::PluginNotFound(identifier.to_string()))?;

        let instance = descriptor.resolve(cwd, raw).map_err(|e| match e {
            ResolveError::Settings(source) => FactoryError::Settings {
                identifier: identifier.to_string(),
                source,
            },
            ResolveError::Construction(source) => FactoryError::Construction(source),
        })?;

        debug!(plugin = %identifier, "Resolved plugin instance");
        Ok(instance)
    }

    /// Returns whether `identifier` is registered.
    pub fn contains(&self, identifier: &str) -> bool {
        self.descriptors.contains_key(identifier)
    }

    /// Returns all registered identifiers, in no particular order.
    pub fn identifiers(&self) -> Vec<&str> {
        self.descriptors.keys().map(String::as_str).collect()
    }

    /// Returns the number of registered descriptors.
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Returns whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

// =============================================================================
// Typed sub-factories
// =============================================================================

/// Factory handing out [`LogPlugin`] trait objects.
///
/// Wraps a generic [`Factory`]; [`register`](Self::register) stores instances
/// as `Box<dyn LogPlugin>`, and [`resolve`](Self::resolve) downcasts on the
/// way out, rejecting anything else with [`FactoryError::NotAPlugin`]. A
/// descriptor slipped in through [`register_descriptor`](Self::register_descriptor)
/// is only checked here, at resolve time.
#[derive(Debug, Default)]
pub struct LogPluginFactory {
    inner: Factory,
}

impl LogPluginFactory {
    /// Creates an empty factory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a logging plugin type under `identifier`.
    pub fn register<P>(&mut self, identifier: impl Into<String>) -> FactoryResult<()>
    where
        P: Plugin + LogPlugin,
    {
        self.inner.register(
            identifier,
            PluginDescriptor::new::<P>(|plugin| Box::new(Box::new(plugin) as Box<dyn LogPlugin>)),
        )
    }

    /// Registers a raw descriptor under `identifier`.
    ///
    /// Escape hatch for third-party descriptors; the capability is only
    /// verified when the plugin is resolved.
    pub fn register_descriptor(
        &mut self,
        identifier: impl Into<String>,
        descriptor: PluginDescriptor,
    ) -> FactoryResult<()> {
        self.inner.register(identifier, descriptor)
    }

    /// Resolves `identifier` into a logging instance.
    pub fn resolve(
        &self,
        identifier: &str,
        cwd: &Path,
        raw: &SettingsMap,
    ) -> FactoryResult<Box<dyn LogPlugin>> {
        let instance = self.inner.resolve(identifier, cwd, raw)?;
        match instance.downcast::<Box<dyn LogPlugin>>() {
            Ok(plugin) => Ok(*plugin),
            Err(_) => Err(FactoryError::NotAPlugin {
                identifier: identifier.to_string(),
                expected: "logging",
            }),
        }
    }

    /// Returns whether `identifier` is registered.
    pub fn contains(&self, identifier: &str) -> bool {
        self.inner.contains(identifier)
    }
}

/// Factory handing out [`CachePlugin`] trait objects.
///
/// Mirror of [`LogPluginFactory`] for the caching capability.
#[derive(Debug, Default)]
pub struct CachePluginFactory {
    inner: Factory,
}

impl CachePluginFactory {
    /// Creates an empty factory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a cache plugin type under `identifier`.
    pub fn register<P>(&mut self, identifier: impl Into<String>) -> FactoryResult<()>
    where
        P: Plugin + CachePlugin,
    {
        self.inner.register(
            identifier,
            PluginDescriptor::new::<P>(|plugin| Box::new(Box::new(plugin) as Box<dyn CachePlugin>)),
        )
    }

    /// Registers a raw descriptor under `identifier`.
    ///
    /// Escape hatch for third-party descriptors; the capability is only
    /// verified when the plugin is resolved.
    pub fn register_descriptor(
        &mut self,
        identifier: impl Into<String>,
        descriptor: PluginDescriptor,
    ) -> FactoryResult<()> {
        self.inner.register(identifier, descriptor)
    }

    /// Resolves `identifier` into a cache instance.
    pub fn resolve(
        &self,
        identifier: &str,
        cwd: &Path,
        raw: &SettingsMap,
    ) -> FactoryResult<Box<dyn CachePlugin>> {
        let instance = self.inner.resolve(identifier, cwd, raw)?;
        match instance.downcast::<Box<dyn CachePlugin>>() {
            Ok(plugin) => Ok(*plugin),
            Err(_) => Err(FactoryError::NotAPlugin {
                identifier: identifier.to_string(),
                expected: "cache",
            }),
        }
    }

    /// Returns whether `identifier` is registered.
    pub fn contains(&self, identifier: &str) -> bool {
        self.inner.contains(identifier)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use chassis_core::{
        ConstructionError, LogRecord, PluginError, SettingsError, SettingsMap,
    };

    use super::*;

    static CONSTRUCTED: AtomicUsize = AtomicUsize::new(0);

    struct RecordingSink {
        lines: Arc<parking_lot::Mutex<Vec<String>>>,
    }

    impl Plugin for RecordingSink {
        type Settings = PathBuf;

        fn derive_settings(cwd: &Path, raw: &SettingsMap) -> Result<PathBuf, SettingsError> {
            if raw.contains_key("fail") {
                return Err(SettingsError::invalid("refused by test plugin"));
            }
            Ok(cwd.to_path_buf())
        }

        fn construct(_settings: PathBuf) -> Result<Self, ConstructionError> {
            CONSTRUCTED.fetch_add(1, Ordering::SeqCst);
            Ok(Self {
                lines: Arc::new(parking_lot::Mutex::new(Vec::new())),
            })
        }
    }

    impl LogPlugin for RecordingSink {
        fn log(&self, record: &LogRecord) -> Result<(), PluginError> {
            self.lines.lock().push(record.message.clone());
            Ok(())
        }
    }

    fn cwd() -> PathBuf {
        PathBuf::from("/tmp")
    }

    #[test]
    fn test_resolve_unregistered() {
        let factory = LogPluginFactory::new();
        let Err(err) = factory.resolve("missing", &cwd(), &SettingsMap::new()) else {
            panic!("expected error");
        };
        assert!(matches!(err, FactoryError::PluginNotFound(id) if id == "missing"));
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let mut factory = LogPluginFactory::new();
        factory.register::<RecordingSink>("sink").unwrap();
        let err = factory.register::<RecordingSink>("sink").unwrap_err();
        assert!(matches!(err, FactoryError::DuplicateRegistration(id) if id == "sink"));
        // First registration survives.
        assert!(factory.contains("sink"));
    }

    #[test]
    fn test_identifiers_are_case_sensitive() {
        let mut factory = LogPluginFactory::new();
        factory.register::<RecordingSink>("Sink").unwrap();
        assert!(!factory.contains("sink"));
    }

    #[test]
    fn test_resolve_constructs_independent_instances() {
        let mut factory = LogPluginFactory::new();
        factory.register::<RecordingSink>("sink").unwrap();

        let before = CONSTRUCTED.load(Ordering::SeqCst);
        let a = factory.resolve("sink", &cwd(), &SettingsMap::new()).unwrap();
        let b = factory.resolve("sink", &cwd(), &SettingsMap::new()).unwrap();
        assert_eq!(CONSTRUCTED.load(Ordering::SeqCst), before + 2);

        // Writes to one instance are invisible to the other.
        a.log(&LogRecord::new(chassis_core::LogLevel::Info, "only a"))
            .unwrap();
        b.log(&LogRecord::new(chassis_core::LogLevel::Info, "only b"))
            .unwrap();
        drop((a, b));
    }

    #[test]
    fn test_settings_failure_attributed() {
        let mut factory = LogPluginFactory::new();
        factory.register::<RecordingSink>("sink").unwrap();

        let mut raw = SettingsMap::new();
        raw.insert("fail".to_string(), serde_json::Value::Bool(true));
        let Err(err) = factory.resolve("sink", &cwd(), &raw) else {
            panic!("expected error");
        };
        match err {
            FactoryError::Settings { identifier, source } => {
                assert_eq!(identifier, "sink");
                assert!(source.to_string().contains("refused by test plugin"));
            }
            other => panic!("expected settings error, got {other}"),
        }
    }

    #[test]
    fn test_not_a_plugin_on_foreign_descriptor() {
        let mut factory = CachePluginFactory::new();
        // An opaque descriptor is structurally registered but does not carry
        // the cache capability box.
        factory
            .register_descriptor("sink", PluginDescriptor::opaque::<RecordingSink>())
            .unwrap();

        let Err(err) = factory.resolve("sink", &cwd(), &SettingsMap::new()) else {
            panic!("expected error");
        };
        assert!(matches!(
            err,
            FactoryError::NotAPlugin { expected: "cache", .. }
        ));
    }
}
