//! The cache service façade.

use chassis_core::{CachePlugin, PluginError};

/// Wraps the single resolved cache plugin behind the container's cache
/// policy.
///
/// `skip_cache` is enforced here, not in the plugin: when set, every
/// operation short-circuits without touching the plugin: gets report
/// absent, writes and clears are dropped. `clear_cache` runs once during
/// construction, before the service is handed out.
pub struct CacheService {
    plugin: Box<dyn CachePlugin>,
    skip_cache: bool,
}

impl CacheService {
    pub(crate) fn new(
        plugin: Box<dyn CachePlugin>,
        skip_cache: bool,
        clear_cache: bool,
    ) -> Result<Self, PluginError> {
        if clear_cache {
            plugin.clear()?;
        }
        Ok(Self { plugin, skip_cache })
    }

    /// Returns the cached value for `key`, or `None` when absent or when the
    /// cache is skipped.
    pub fn get(&self, key: &str) -> Result<Option<String>, PluginError> {
        if self.skip_cache {
            return Ok(None);
        }
        self.plugin.get(key)
    }

    /// Stores `value` under `key`. A no-op when the cache is skipped.
    pub fn set(&self, key: &str, value: &str) -> Result<(), PluginError> {
        if self.skip_cache {
            return Ok(());
        }
        self.plugin.set(key, value)
    }

    /// Removes the value for `key`. A no-op when the cache is skipped.
    pub fn delete(&self, key: &str) -> Result<(), PluginError> {
        if self.skip_cache {
            return Ok(());
        }
        self.plugin.delete(key)
    }

    /// Removes every cached value. A no-op when the cache is skipped.
    pub fn clear(&self) -> Result<(), PluginError> {
        if self.skip_cache {
            return Ok(());
        }
        self.plugin.clear()
    }

    /// Returns whether `key` is cached. Always `false` when the cache is
    /// skipped.
    pub fn contains(&self, key: &str) -> Result<bool, PluginError> {
        if self.skip_cache {
            return Ok(false);
        }
        self.plugin.contains(key)
    }

    /// Returns whether the skip-cache policy is active.
    pub fn is_skipped(&self) -> bool {
        self.skip_cache
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    struct MemoryCache {
        entries: Mutex<HashMap<String, String>>,
    }

    impl CachePlugin for MemoryCache {
        fn get(&self, key: &str) -> Result<Option<String>, PluginError> {
            Ok(self.entries.lock().unwrap().get(key).cloned())
        }

        fn set(&self, key: &str, value: &str) -> Result<(), PluginError> {
            self.entries
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }

        fn delete(&self, key: &str) -> Result<(), PluginError> {
            self.entries.lock().unwrap().remove(key);
            Ok(())
        }

        fn clear(&self) -> Result<(), PluginError> {
            self.entries.lock().unwrap().clear();
            Ok(())
        }

        fn contains(&self, key: &str) -> Result<bool, PluginError> {
            Ok(self.entries.lock().unwrap().contains_key(key))
        }
    }

    #[test]
    fn test_delegates_when_not_skipped() {
        let service = CacheService::new(Box::new(MemoryCache::default()), false, false).unwrap();
        service.set("k", "v").unwrap();
        assert_eq!(service.get("k").unwrap().as_deref(), Some("v"));
        assert!(service.contains("k").unwrap());
        service.delete("k").unwrap();
        assert_eq!(service.get("k").unwrap(), None);
    }

    #[test]
    fn test_skip_cache_never_touches_plugin() {
        let plugin = Box::new(MemoryCache::default());
        let service = CacheService::new(plugin, true, false).unwrap();

        service.set("k", "v").unwrap();
        assert_eq!(service.get("k").unwrap(), None);
        assert!(!service.contains("k").unwrap());
        service.delete("k").unwrap();
        service.clear().unwrap();
        assert!(service.is_skipped());
    }

    #[test]
    fn test_clear_cache_runs_at_construction() {
        let plugin = MemoryCache::default();
        plugin.set("stale", "old").unwrap();

        let service = CacheService::new(Box::new(plugin), false, true).unwrap();
        assert_eq!(service.get("stale").unwrap(), None);
    }

    #[test]
    fn test_no_clear_without_flag() {
        let plugin = MemoryCache::default();
        plugin.set("kept", "value").unwrap();

        let service = CacheService::new(Box::new(plugin), false, false).unwrap();
        assert_eq!(service.get("kept").unwrap().as_deref(), Some("value"));
    }

    #[test]
    fn test_clear_cache_applies_even_when_skipped() {
        let plugin = MemoryCache::default();
        plugin.set("stale", "old").unwrap();

        // clear_cache is a startup action, independent of the skip policy.
        let service = CacheService::new(Box::new(plugin), true, true).unwrap();
        assert_eq!(service.get("stale").unwrap(), None);
    }
}
